//! Scope depth and name-lookup contexts.

use cpc_ir::Name;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Context {
    /// Fully qualified namespace name.
    name: Name,
    /// Depth the context was opened at.
    depth: u32,
    is_namespace: bool,
}

/// Current block depth plus the active `using` / `namespace` contexts.
///
/// Depth 0 is the top level. A `using` lasts until the block that contains
/// it ends; a `namespace` lasts until its closing brace.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    depth: u32,
    contexts: Vec<Context>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Open a block; returns the new depth.
    pub fn enter(&mut self) -> u32 {
        self.depth += 1;
        self.depth
    }

    /// Close the current block, dropping its `using` contexts. Returns the
    /// depth that was left so the caller can clear its table entries.
    pub fn leave(&mut self) -> u32 {
        let left = self.depth;
        self.contexts
            .retain(|ctx| ctx.is_namespace || ctx.depth < left);
        self.depth = left.saturating_sub(1);
        left
    }

    pub fn push_using(&mut self, namespace: Name) {
        self.contexts.push(Context {
            name: namespace,
            depth: self.depth,
            is_namespace: false,
        });
    }

    /// Enter a namespace. `qualified` is the full prefix, e.g. `a::b`.
    pub fn push_namespace(&mut self, qualified: Name) {
        self.contexts.push(Context {
            name: qualified,
            depth: self.depth,
            is_namespace: true,
        });
    }

    /// Leave the innermost namespace, along with any `using` opened inside
    /// it.
    pub fn pop_namespace(&mut self) -> Option<Name> {
        let idx = self.contexts.iter().rposition(|ctx| ctx.is_namespace)?;
        let ns = self.contexts[idx].name;
        self.contexts.truncate(idx);
        Some(ns)
    }

    /// Innermost enclosing namespace, used to qualify declarations.
    pub fn namespace(&self) -> Option<Name> {
        self.contexts
            .iter()
            .rev()
            .find(|ctx| ctx.is_namespace)
            .map(|ctx| ctx.name)
    }

    /// Prefixes to try after the bare name, innermost first.
    pub fn lookup_prefixes(&self) -> impl Iterator<Item = Name> + '_ {
        self.contexts.iter().rev().map(|ctx| ctx.name)
    }
}

#[cfg(test)]
mod tests;
