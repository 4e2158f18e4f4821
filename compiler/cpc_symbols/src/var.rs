//! Variable table.

use cpc_ir::{Name, TypeId};

use crate::{OpenTable, ScopedKey};

/// Variable types keyed by (name, depth). Redeclaring at the same depth
/// overwrites.
#[derive(Default, Debug, Clone)]
pub struct VarTable {
    table: OpenTable<ScopedKey, TypeId>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the key was not already declared.
    #[inline]
    pub fn set(&mut self, key: ScopedKey, ty: TypeId) -> bool {
        self.table.set(key, ty)
    }

    #[inline]
    pub fn get(&self, key: ScopedKey) -> Option<TypeId> {
        self.table.get(&key).copied()
    }

    #[inline]
    pub fn del(&mut self, key: ScopedKey) -> Option<TypeId> {
        self.table.del(&key)
    }

    /// Innermost declaration of `name` at `depth` or any outer depth.
    pub fn resolve(&self, name: Name, depth: u32) -> Option<(TypeId, u32)> {
        (0..=depth)
            .rev()
            .find_map(|d| self.get(ScopedKey::new(name, d)).map(|ty| (ty, d)))
    }

    pub fn add_all(&mut self, other: &VarTable) {
        self.table.add_all(&other.table);
    }

    pub fn remove_depth(&mut self, depth: u32) {
        self.table.retain(|key, _| key.depth != depth);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests;
