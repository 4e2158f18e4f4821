//! Open-addressed hash table with linear probing and tombstones.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Smallest non-zero capacity.
pub const MIN_CAPACITY: usize = 8;

/// Maximum load factor, as a fraction (`3 / 4`).
pub const MAX_LOAD_NUMER: usize = 3;
pub const MAX_LOAD_DENOM: usize = 4;

#[derive(Clone)]
enum Slot<K, V> {
    Empty,
    /// Deleted entry. Keeps probe chains intact and counts toward load.
    Tombstone,
    Full(K, V),
}

/// Hash map with linear probing.
///
/// `len` counts live keys. Load is computed over live keys plus tombstones,
/// so probing always finds an empty slot. A set that would push the load
/// above 3/4 first rehashes into a larger table (minimum
/// [`MIN_CAPACITY`], otherwise doubling), which also drops tombstones.
#[derive(Clone)]
pub struct OpenTable<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    /// Live keys plus tombstones.
    used: usize,
}

impl<K, V> Default for OpenTable<K, V> {
    fn default() -> Self {
        OpenTable {
            slots: Vec::new(),
            len: 0,
            used: 0,
        }
    }
}

enum Probe {
    Found(usize),
    /// First reusable slot (tombstone or empty) on the probe path.
    Vacant(usize),
}

impl<K: Copy + Eq + Hash, V> OpenTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots that are live or tombstoned.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Insert or overwrite. Returns `true` when `key` was not present.
    pub fn set(&mut self, key: K, value: V) -> bool {
        if (self.used + 1) * MAX_LOAD_DENOM > self.capacity() * MAX_LOAD_NUMER {
            self.grow();
        }
        match self.probe(&key) {
            Probe::Found(idx) => {
                self.slots[idx] = Slot::Full(key, value);
                false
            }
            Probe::Vacant(idx) => {
                if matches!(self.slots[idx], Slot::Empty) {
                    self.used += 1;
                }
                self.slots[idx] = Slot::Full(key, value);
                self.len += 1;
                true
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(idx) => match &self.slots[idx] {
                Slot::Full(_, value) => Some(value),
                Slot::Empty | Slot::Tombstone => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(idx) => match &mut self.slots[idx] {
                Slot::Full(_, value) => Some(value),
                Slot::Empty | Slot::Tombstone => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, leaving a tombstone.
    pub fn del(&mut self, key: &K) -> Option<V> {
        let Probe::Found(idx) = self.probe(key) else {
            return None;
        };
        match std::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Full(_, value) => {
                self.len -= 1;
                Some(value)
            }
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Tombstone every entry for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        for slot in &mut self.slots {
            if let Slot::Full(key, value) = slot {
                if !keep(key, value) {
                    *slot = Slot::Tombstone;
                    self.len -= 1;
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Full(key, value) => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
        self.used = 0;
    }

    fn probe(&self, key: &K) -> Probe {
        let cap = self.capacity();
        if cap == 0 {
            return Probe::Vacant(0);
        }
        let mut idx = bucket(key, cap);
        let mut tombstone = None;
        // `used < cap`, so an empty slot ends every probe.
        loop {
            match &self.slots[idx] {
                Slot::Empty => return Probe::Vacant(tombstone.unwrap_or(idx)),
                Slot::Tombstone => {
                    tombstone.get_or_insert(idx);
                }
                Slot::Full(existing, _) if existing == key => return Probe::Found(idx),
                Slot::Full(..) => {}
            }
            idx = (idx + 1) % cap;
        }
    }

    fn grow(&mut self) {
        let cap = if self.capacity() < MIN_CAPACITY {
            MIN_CAPACITY
        } else {
            self.capacity() * 2
        };
        tracing::debug!(from = self.capacity(), to = cap, live = self.len, "table resize");

        let old = std::mem::replace(&mut self.slots, Vec::with_capacity(cap));
        self.slots.resize_with(cap, || Slot::Empty);
        self.len = 0;
        self.used = 0;
        for slot in old {
            if let Slot::Full(key, value) = slot {
                let mut idx = bucket(&key, cap);
                while matches!(self.slots[idx], Slot::Full(..)) {
                    idx = (idx + 1) % cap;
                }
                self.slots[idx] = Slot::Full(key, value);
                self.len += 1;
                self.used += 1;
            }
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> OpenTable<K, V> {
    /// Copy every live entry of `other` into `self`, overwriting duplicates.
    pub fn add_all(&mut self, other: &OpenTable<K, V>) {
        for (key, value) in other.iter() {
            self.set(*key, value.clone());
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OpenTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for slot in &self.slots {
            if let Slot::Full(key, value) = slot {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "only the low bits survive the modulo"
)]
fn bucket<K: Hash>(key: &K, cap: usize) -> usize {
    FxBuildHasher.hash_one(key) as usize % cap
}

#[cfg(test)]
mod tests;
