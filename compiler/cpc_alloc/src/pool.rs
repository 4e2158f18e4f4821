//! Fixed-slot pool with a free list.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::AllocError;

/// Number of slots committed at once when the free list runs dry.
pub const POOL_BATCH: usize = 32;

/// Default slot ceiling for a pool.
pub const DEFAULT_POOL_SLOTS: usize = 1 << 24;

/// Typed handle to a pool slot.
///
/// Slot indices are stable for the life of the allocation; a freed index is
/// handed out again by a later `alloc`.
pub trait PoolKey: Copy {
    fn from_slot(slot: u32) -> Self;
    fn slot(self) -> u32;
}

enum Slot<T> {
    Live(T),
    Free { next: Option<u32> },
}

/// Slab of same-typed slots.
///
/// A fresh batch is chained in ascending order so a new pool hands out
/// slots `0, 1, 2, ...`. Freed slots are reused most-recent-first.
pub struct Pool<T, K> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    live: usize,
    max_slots: usize,
    _key: PhantomData<fn() -> K>,
}

impl<T, K: PoolKey> Pool<T, K> {
    pub fn new() -> Self {
        Self::with_max_slots(DEFAULT_POOL_SLOTS)
    }

    pub fn with_max_slots(max_slots: usize) -> Self {
        Pool {
            slots: Vec::new(),
            free_head: None,
            live: 0,
            max_slots: max_slots.min(u32::MAX as usize),
            _key: PhantomData,
        }
    }

    pub fn alloc(&mut self, value: T) -> Result<K, AllocError> {
        if self.free_head.is_none() {
            self.grow()?;
        }
        let Some(slot) = self.free_head else {
            return Err(AllocError::PoolExhausted {
                max_slots: self.max_slots,
            });
        };
        let entry = &mut self.slots[slot as usize];
        self.free_head = match entry {
            Slot::Free { next } => *next,
            Slot::Live(_) => None,
        };
        *entry = Slot::Live(value);
        self.live += 1;
        Ok(K::from_slot(slot))
    }

    /// Return a slot to the free list, handing back its value.
    ///
    /// Freeing an already-free slot is a no-op returning `None`.
    pub fn dealloc(&mut self, key: K) -> Option<T> {
        let slot = key.slot();
        let entry = self.slots.get_mut(slot as usize)?;
        if matches!(entry, Slot::Free { .. }) {
            return None;
        }
        let previous = std::mem::replace(
            entry,
            Slot::Free {
                next: self.free_head,
            },
        );
        self.free_head = Some(slot);
        self.live -= 1;
        match previous {
            Slot::Live(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    pub fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.slot() as usize)? {
            Slot::Live(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.slot() as usize)? {
            Slot::Live(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// Live allocations.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Committed slots, live or free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Bulk release of every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Live(value) => Some((K::from_slot(slot_index(idx)), value)),
            Slot::Free { .. } => None,
        })
    }

    fn grow(&mut self) -> Result<(), AllocError> {
        let start = self.slots.len();
        let count = POOL_BATCH.min(self.max_slots - start);
        if count == 0 {
            return Err(AllocError::PoolExhausted {
                max_slots: self.max_slots,
            });
        }
        tracing::trace!(start, count, "pool commit");
        self.slots.reserve_exact(count);
        for idx in start + 1..start + count {
            self.slots.push(Slot::Free {
                next: Some(slot_index(idx)),
            });
        }
        self.slots.push(Slot::Free { next: None });
        self.free_head = Some(slot_index(start));
        Ok(())
    }
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "slot count is bounded by max_slots <= u32::MAX"
)]
fn slot_index(idx: usize) -> u32 {
    idx as u32
}

impl<T, K: PoolKey> Default for Pool<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: PoolKey> Index<K> for Pool<T, K> {
    type Output = T;

    fn index(&self, key: K) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("pool slot {} is not live", key.slot()),
        }
    }
}

impl<T, K: PoolKey> IndexMut<K> for Pool<T, K> {
    fn index_mut(&mut self, key: K) -> &mut T {
        let slot = key.slot();
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("pool slot {slot} is not live"),
        }
    }
}

impl<T, K> fmt::Debug for Pool<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("live", &self.live)
            .field("capacity", &self.slots.len())
            .field("max_slots", &self.max_slots)
            .finish()
    }
}
