//! Recycled short-lived arenas.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::Arena;

/// Hands out throwaway arenas and takes them back.
///
/// Arenas are identified by a stable index. A returned arena is rewound and
/// pushed on the free list, keeping its committed memory for the next user.
/// Nested acquisitions always receive distinct arenas, so a callee's scratch
/// space never aliases its caller's.
pub struct ScratchPool {
    slots: RefCell<Vec<Arena>>,
    free: RefCell<Vec<usize>>,
    reserve: usize,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self::with_reserve(crate::DEFAULT_RESERVE)
    }

    /// Pool whose arenas each reserve `reserve` bytes.
    pub fn with_reserve(reserve: usize) -> Self {
        ScratchPool {
            slots: RefCell::new(Vec::new()),
            free: RefCell::new(Vec::new()),
            reserve,
        }
    }

    /// Borrow an arena until the guard is dropped.
    pub fn get(&self) -> ScratchArena<'_> {
        let recycled = self.free.borrow_mut().pop();
        let (index, arena) = match recycled {
            Some(index) => {
                let arena = std::mem::take(&mut self.slots.borrow_mut()[index]);
                (index, arena)
            }
            None => {
                let mut slots = self.slots.borrow_mut();
                slots.push(Arena::with_reserve(0));
                (slots.len() - 1, Arena::with_reserve(self.reserve))
            }
        };
        tracing::trace!(index, "scratch acquired");
        ScratchArena {
            pool: self,
            index,
            arena,
        }
    }

    /// Arenas ever created by this pool.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Arenas currently handed out.
    pub fn in_use(&self) -> usize {
        self.len() - self.free.borrow().len()
    }

    fn give_back(&self, index: usize, mut arena: Arena) {
        arena.clear();
        self.slots.borrow_mut()[index] = arena;
        self.free.borrow_mut().push(index);
        tracing::trace!(index, "scratch returned");
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle to a scratch arena; returns it to the pool on drop.
pub struct ScratchArena<'p> {
    pool: &'p ScratchPool,
    index: usize,
    arena: Arena,
}

impl ScratchArena<'_> {
    /// Stable index of the underlying arena within its pool.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for ScratchArena<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        &self.arena
    }
}

impl DerefMut for ScratchArena<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}

impl Drop for ScratchArena<'_> {
    fn drop(&mut self) {
        let arena = std::mem::replace(&mut self.arena, Arena::with_reserve(0));
        self.pool.give_back(self.index, arena);
    }
}
