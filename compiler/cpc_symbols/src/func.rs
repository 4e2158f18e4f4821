//! Function table with overload chains.

use cpc_ir::{Name, TypeArena, TypeId};
use smallvec::SmallVec;

use crate::{OpenTable, ScopedKey};

/// One declared signature of a function name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overload {
    /// Unique link name, see [`mangle`](crate::mangle).
    pub mangled: Name,
    pub params: SmallVec<[TypeId; 4]>,
    /// Trailing `...`.
    pub variadic: bool,
    pub is_native: bool,
    pub ret: TypeId,
    /// The full function type.
    pub ty: TypeId,
}

impl Overload {
    /// Pairwise-equal parameter lists; return types never distinguish
    /// overloads.
    fn same_params(&self, other: &Overload, types: &TypeArena) -> bool {
        self.variadic == other.variadic
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(&a, &b)| types.equal(a, b))
    }

    /// Number of matched fixed parameters, or `None` when `args` do not
    /// fit. Extra arguments are absorbed by a trailing `...`.
    pub fn match_args(&self, args: &[TypeId], absolute: bool, types: &TypeArena) -> Option<usize> {
        let arity = self.params.len();
        if (!self.variadic && arity != args.len()) || (self.variadic && arity > args.len()) {
            return None;
        }
        let fits = |(&declared, &actual): (&TypeId, &TypeId)| {
            if absolute {
                types.equal(actual, declared)
            } else {
                types.compatible(actual, declared)
            }
        };
        self.params.iter().zip(args).all(fits).then_some(arity)
    }
}

/// Overload chains keyed by (name, depth).
#[derive(Default, Debug)]
pub struct FuncTable {
    table: OpenTable<ScopedKey, SmallVec<[Overload; 1]>>,
}

impl FuncTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `overload`. Replaces an overload with an equal parameter
    /// list, otherwise extends the chain. Returns `true` on replacement.
    pub fn set(&mut self, key: ScopedKey, overload: Overload, types: &TypeArena) -> bool {
        if let Some(chain) = self.table.get_mut(&key) {
            if let Some(existing) = chain.iter_mut().find(|o| o.same_params(&overload, types)) {
                *existing = overload;
                return true;
            }
            chain.push(overload);
            return false;
        }
        self.table.set(key, smallvec::smallvec![overload]);
        false
    }

    /// First overload under `key` accepting `args`, with its subset-match
    /// count.
    pub fn get(
        &self,
        key: ScopedKey,
        args: &[TypeId],
        absolute: bool,
        types: &TypeArena,
    ) -> Option<(&Overload, usize)> {
        self.table.get(&key)?.iter().find_map(|overload| {
            overload
                .match_args(args, absolute, types)
                .map(|count| (overload, count))
        })
    }

    /// Every overload declared under `key`.
    pub fn overloads(&self, key: ScopedKey) -> &[Overload] {
        self.table.get(&key).map_or(&[], |chain| chain.as_slice())
    }

    /// Remove the overload named `mangled`. The key is tombstoned once its
    /// chain is empty.
    pub fn del(&mut self, key: ScopedKey, mangled: Name) -> Option<Overload> {
        let chain = self.table.get_mut(&key)?;
        let idx = chain.iter().position(|o| o.mangled == mangled)?;
        let removed = chain.remove(idx);
        if chain.is_empty() {
            self.table.del(&key);
        }
        Some(removed)
    }

    /// Remove the whole chain under `key`.
    pub fn del_full(&mut self, key: ScopedKey) -> Option<SmallVec<[Overload; 1]>> {
        self.table.del(&key)
    }

    /// Whether `key` is declared at all.
    #[inline]
    pub fn has_name(&self, key: ScopedKey) -> bool {
        self.table.contains(&key)
    }

    pub fn add_all(&mut self, other: &FuncTable) {
        self.table.add_all(&other.table);
    }

    pub fn remove_depth(&mut self, depth: u32) {
        self.table.retain(|key, _| key.depth != depth);
    }

    /// Declared keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests;
