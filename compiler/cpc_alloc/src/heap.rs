//! First-fit free-list heap for variable-sized blocks.
//!
//! A standalone facility of the allocator crate: the front end's own nodes
//! live in pools and arenas, so no later stage allocates from a [`Heap`].

use crate::arena::{COMMIT_CHUNK, DEFAULT_RESERVE};
use crate::AllocError;

/// Every block size is rounded up to this alignment.
pub const HEAP_ALIGN: usize = 8;

/// A live heap allocation. `size` is the rounded size actually reserved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeapBlock {
    pub offset: u32,
    pub size: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FreeRange {
    offset: usize,
    size: usize,
}

impl FreeRange {
    #[inline]
    fn end(self) -> usize {
        self.offset + self.size
    }
}

/// General-purpose allocator over a committed byte range.
///
/// Free ranges are kept sorted by offset and coalesced with their
/// neighbours on release. When no range fits, the committed boundary grows
/// in [`COMMIT_CHUNK`] steps up to the reservation.
pub struct Heap {
    memory: Vec<u8>,
    reserve: usize,
    free: Vec<FreeRange>,
}

impl Heap {
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_RESERVE)
    }

    pub fn with_reserve(reserve: usize) -> Self {
        Heap {
            memory: Vec::new(),
            reserve: reserve.min(u32::MAX as usize),
            free: Vec::new(),
        }
    }

    #[inline]
    pub fn committed(&self) -> usize {
        self.memory.len()
    }

    /// Total bytes sitting in free ranges.
    pub fn free_bytes(&self) -> usize {
        self.free.iter().map(|range| range.size).sum()
    }

    pub fn alloc(&mut self, size: usize) -> Result<HeapBlock, AllocError> {
        let size = round_to_align(size.max(1));
        let idx = match self.free.iter().position(|range| range.size >= size) {
            Some(idx) => idx,
            None => self.grow(size)?,
        };

        let range = self.free[idx];
        if range.size == size {
            self.free.remove(idx);
        } else {
            self.free[idx] = FreeRange {
                offset: range.offset + size,
                size: range.size - size,
            };
        }
        Ok(block(range.offset, size))
    }

    /// Return a block to the free list.
    ///
    /// Rejects blocks that overlap a free range or lie outside the
    /// committed region.
    pub fn dealloc(&mut self, blk: HeapBlock) -> Result<(), AllocError> {
        let range = FreeRange {
            offset: blk.offset as usize,
            size: blk.size as usize,
        };
        let invalid = AllocError::InvalidFree { offset: blk.offset };
        if range.size == 0 || range.end() > self.memory.len() {
            return Err(invalid);
        }

        let idx = self.free.partition_point(|free| free.offset < range.offset);
        let overlaps_prev = idx > 0 && self.free[idx - 1].end() > range.offset;
        let overlaps_next = self.free.get(idx).is_some_and(|next| next.offset < range.end());
        if overlaps_prev || overlaps_next {
            return Err(invalid);
        }

        self.free.insert(idx, range);
        self.coalesce(idx);
        Ok(())
    }

    pub fn bytes(&self, blk: HeapBlock) -> &[u8] {
        let start = blk.offset as usize;
        self.memory.get(start..start + blk.size as usize).unwrap_or(&[])
    }

    pub fn bytes_mut(&mut self, blk: HeapBlock) -> &mut [u8] {
        let start = blk.offset as usize;
        self.memory
            .get_mut(start..start + blk.size as usize)
            .unwrap_or(&mut [])
    }

    /// Release every block at once. Committed memory is kept.
    pub fn clear(&mut self) {
        self.free.clear();
        if !self.memory.is_empty() {
            self.free.push(FreeRange {
                offset: 0,
                size: self.memory.len(),
            });
        }
    }

    /// Commit enough memory for `size` bytes and return the index of the
    /// free range that now satisfies the request.
    fn grow(&mut self, size: usize) -> Result<usize, AllocError> {
        let old_len = self.memory.len();
        let tail = self.free.last().filter(|range| range.end() == old_len).map_or(0, |r| r.size);
        let shortfall = size - tail;
        let new_len = old_len + shortfall.div_ceil(COMMIT_CHUNK) * COMMIT_CHUNK;
        if old_len + shortfall > self.reserve {
            return Err(AllocError::OutOfReserve {
                requested: size,
                used: old_len,
                reserve: self.reserve,
            });
        }
        let new_len = new_len.min(self.reserve);
        tracing::trace!(from = old_len, to = new_len, "heap commit");
        self.memory.resize(new_len, 0);

        let added = FreeRange {
            offset: old_len,
            size: new_len - old_len,
        };
        self.free.push(added);
        let idx = self.free.len() - 1;
        Ok(self.coalesce(idx))
    }

    /// Merge the range at `idx` with its neighbours; returns its new index.
    fn coalesce(&mut self, mut idx: usize) -> usize {
        if idx + 1 < self.free.len() && self.free[idx].end() == self.free[idx + 1].offset {
            self.free[idx].size += self.free[idx + 1].size;
            self.free.remove(idx + 1);
        }
        if idx > 0 && self.free[idx - 1].end() == self.free[idx].offset {
            self.free[idx - 1].size += self.free[idx].size;
            self.free.remove(idx);
            idx -= 1;
        }
        idx
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn round_to_align(size: usize) -> usize {
    size.div_ceil(HEAP_ALIGN) * HEAP_ALIGN
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "heap reservation is clamped to u32::MAX"
)]
fn block(offset: usize, size: usize) -> HeapBlock {
    HeapBlock {
        offset: offset as u32,
        size: size as u32,
    }
}

#[cfg(test)]
mod tests;
