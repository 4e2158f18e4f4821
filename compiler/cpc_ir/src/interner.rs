//! Arena-backed string interner.

use std::hash::BuildHasher;

use cpc_alloc::{AllocError, Arena, ArenaStr};
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::Name;

/// Maps strings to dense [`Name`]s.
///
/// String bytes live in a private [`Arena`] that is never rewound, so every
/// handle stays valid for the life of the interner. Lookup buckets are keyed
/// by hash and hold the (almost always single) names with that hash.
pub struct StringInterner {
    text: Arena,
    strings: Vec<ArenaStr>,
    buckets: FxHashMap<u64, SmallVec<[Name; 1]>>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::with_reserve(cpc_alloc::DEFAULT_RESERVE)
    }

    /// Interner whose string bytes may use at most `reserve` bytes.
    pub fn with_reserve(reserve: usize) -> Self {
        let mut interner = StringInterner {
            text: Arena::with_reserve(reserve),
            strings: Vec::with_capacity(256),
            buckets: FxHashMap::default(),
        };
        // Zero-length strings never touch the arena, so this cannot fail.
        if let Ok(empty) = interner.text.alloc_str("") {
            interner.strings.push(empty);
            interner
                .buckets
                .entry(FxBuildHasher.hash_one(""))
                .or_default()
                .push(Name::EMPTY);
        }
        interner
    }

    /// Intern `text`, returning the existing name if already present.
    pub fn try_intern(&mut self, text: &str) -> Result<Name, AllocError> {
        let hash = FxBuildHasher.hash_one(text);
        if let Some(name) = self.find(hash, text) {
            return Ok(name);
        }

        let stored = self.text.alloc_str(text)?;
        let raw = u32::try_from(self.strings.len()).map_err(|_| AllocError::PoolExhausted {
            max_slots: u32::MAX as usize,
        })?;
        let name = Name::from_raw(raw);
        self.strings.push(stored);
        self.buckets.entry(hash).or_default().push(name);
        Ok(name)
    }

    /// Intern `text`.
    ///
    /// # Panics
    /// Panics if the interner's 1 GiB text reservation is exhausted.
    pub fn intern(&mut self, text: &str) -> Name {
        self.try_intern(text)
            .unwrap_or_else(|err| panic!("string interner: {err}"))
    }

    /// Name of `text` if it was interned before.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.find(FxBuildHasher.hash_one(text), text)
    }

    /// Text of `name`; unknown names read as `""`.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings
            .get(name.index())
            .map_or("", |&stored| self.text.get_str(stored))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    fn find(&self, hash: u64, text: &str) -> Option<Name> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&name| self.lookup(name) == text)
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
