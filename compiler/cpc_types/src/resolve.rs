//! Name and overload resolution.
//!
//! A name is tried bare first, then as `prefix::name` for every active
//! `using`/`namespace` context, innermost first. Each candidate is searched
//! from the current depth outward.

use cpc_ir::{Name, TypeId};
use cpc_symbols::{lookup_qualified, ScopedKey};
use smallvec::SmallVec;

use crate::CheckEnv;

/// Overload chosen for a call site.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    pub mangled: Name,
    pub ret: TypeId,
    /// Subset-match count of the chosen overload.
    pub matched: usize,
    pub depth: u32,
}

impl CheckEnv<'_> {
    fn candidates(&self, name: Name) -> SmallVec<[Name; 4]> {
        let mut names = SmallVec::new();
        names.push(name);
        names.extend(
            self.scope
                .lookup_prefixes()
                .filter_map(|prefix| lookup_qualified(prefix, name, self.interner, self.scratch)),
        );
        names
    }

    fn depths(&self) -> impl Iterator<Item = u32> {
        (0..=self.scope.depth()).rev()
    }

    /// Type of the innermost visible variable named `name`.
    pub fn resolve_var(&self, name: Name) -> Option<TypeId> {
        let depth = self.scope.depth();
        self.candidates(name)
            .into_iter()
            .find_map(|candidate| self.symbols.vars.resolve(candidate, depth))
            .map(|(ty, _)| ty)
    }

    /// Struct or enum type declared as `name`.
    pub fn resolve_type_name(&self, name: Name) -> Option<TypeId> {
        self.candidates(name).into_iter().find_map(|candidate| {
            self.depths().find_map(|depth| {
                self.symbols
                    .types
                    .get(&ScopedKey::new(candidate, depth))
                    .copied()
            })
        })
    }

    /// Whether any overload named `name` is visible.
    pub fn function_declared(&self, name: Name) -> bool {
        self.candidates(name).into_iter().any(|candidate| {
            self.depths()
                .any(|depth| self.symbols.funcs.has_name(ScopedKey::new(candidate, depth)))
        })
    }

    /// Pick the overload for `name(args)`.
    ///
    /// Exact parameter types are tried before relaxed compatibility. Within
    /// a pass the highest subset-match count wins; ties go to the innermost
    /// declaration.
    pub fn resolve_call(&self, name: Name, args: &[TypeId]) -> Option<Resolved> {
        let candidates = self.candidates(name);
        let resolved = [true, false]
            .into_iter()
            .find_map(|absolute| self.best_overload(&candidates, args, absolute));
        if let Some(found) = resolved {
            tracing::debug!(
                name = self.interner.lookup(name),
                mangled = self.interner.lookup(found.mangled),
                matched = found.matched,
                "overload chosen"
            );
        }
        resolved
    }

    fn best_overload(&self, candidates: &[Name], args: &[TypeId], absolute: bool) -> Option<Resolved> {
        let mut best: Option<Resolved> = None;
        for &candidate in candidates {
            for depth in self.depths() {
                let key = ScopedKey::new(candidate, depth);
                for overload in self.symbols.funcs.overloads(key) {
                    let Some(matched) = overload.match_args(args, absolute, self.types) else {
                        continue;
                    };
                    if best.is_some_and(|current| current.matched >= matched) {
                        continue;
                    }
                    best = Some(Resolved {
                        mangled: overload.mangled,
                        ret: overload.ret,
                        matched,
                        depth,
                    });
                }
            }
        }
        best
    }
}
