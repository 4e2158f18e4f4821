//! Forward-only byte arena.

use std::fmt;

use crate::AllocError;

/// Granularity of committed memory.
pub const COMMIT_CHUNK: usize = 8 * 1024;

/// Default address-space reservation (1 GiB).
pub const DEFAULT_RESERVE: usize = 1 << 30;

/// Byte offset of an allocation inside its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaPtr(u32);

impl ArenaPtr {
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }
}

/// A byte range inside an arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArenaSlice {
    pub ptr: ArenaPtr,
    pub len: u32,
}

impl ArenaSlice {
    pub const EMPTY: ArenaSlice = ArenaSlice {
        ptr: ArenaPtr(0),
        len: 0,
    };

    #[inline]
    fn range(self) -> std::ops::Range<usize> {
        let start = self.ptr.offset();
        start..start + self.len as usize
    }
}

/// A UTF-8 range inside an arena. Only produced by [`Arena::alloc_str`] and
/// [`ArenaWriter::finish`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArenaStr(ArenaSlice);

impl ArenaStr {
    #[inline]
    pub fn len(self) -> usize {
        self.0.len as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.len == 0
    }

    #[inline]
    pub fn slice(self) -> ArenaSlice {
        self.0
    }
}

/// Saved allocation cursor, see [`Arena::checkpoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
}

/// Bump allocator over a reserved range.
///
/// `memory.len()` is the committed boundary. It only grows in
/// [`COMMIT_CHUNK`] multiples (clamped to the reservation) and only shrinks
/// through [`Arena::decommit_unused`] or [`Arena::reset`].
///
/// Allocations are never freed individually. Callers rewind with
/// [`Arena::rollback`] or [`Arena::dealloc`], which invalidates everything
/// allocated after the target position.
pub struct Arena {
    memory: Vec<u8>,
    reserve: usize,
    pos: usize,
}

impl Arena {
    /// Arena with the default 1 GiB reservation and nothing committed.
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_RESERVE)
    }

    /// Arena limited to `reserve` bytes. Offsets are 32-bit, so the
    /// reservation is clamped to `u32::MAX`.
    pub fn with_reserve(reserve: usize) -> Self {
        Arena {
            memory: Vec::new(),
            reserve: reserve.min(u32::MAX as usize),
            pos: 0,
        }
    }

    #[inline]
    pub fn reserve(&self) -> usize {
        self.reserve
    }

    /// Current allocation cursor.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes currently backed by memory.
    #[inline]
    pub fn committed(&self) -> usize {
        self.memory.len()
    }

    /// Allocate `size` bytes at the cursor.
    ///
    /// Contents are unspecified: a rewound range keeps its old bytes. Use
    /// [`Arena::alloc_zeroed`] when that matters.
    pub fn alloc(&mut self, size: usize) -> Result<ArenaPtr, AllocError> {
        let end = self
            .pos
            .checked_add(size)
            .filter(|&end| end <= self.reserve)
            .ok_or(AllocError::OutOfReserve {
                requested: size,
                used: self.pos,
                reserve: self.reserve,
            })?;

        if end > self.memory.len() {
            self.commit(end - self.memory.len());
        }

        // `end <= reserve <= u32::MAX`, so the start fits too.
        #[expect(
            clippy::cast_possible_truncation,
            reason = "reserve is clamped to u32::MAX"
        )]
        let ptr = ArenaPtr(self.pos as u32);
        self.pos = end;
        Ok(ptr)
    }

    pub fn alloc_zeroed(&mut self, size: usize) -> Result<ArenaPtr, AllocError> {
        let ptr = self.alloc(size)?;
        self.memory[ptr.offset()..ptr.offset() + size].fill(0);
        Ok(ptr)
    }

    /// Copy `bytes` into the arena.
    pub fn alloc_bytes(&mut self, bytes: &[u8]) -> Result<ArenaSlice, AllocError> {
        let ptr = self.alloc(bytes.len())?;
        self.memory[ptr.offset()..ptr.offset() + bytes.len()].copy_from_slice(bytes);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length is bounded by the reservation"
        )]
        let len = bytes.len() as u32;
        Ok(ArenaSlice { ptr, len })
    }

    pub fn alloc_str(&mut self, text: &str) -> Result<ArenaStr, AllocError> {
        self.alloc_bytes(text.as_bytes()).map(ArenaStr)
    }

    /// Bytes of a previous allocation. Empty if the range was decommitted.
    pub fn bytes(&self, slice: ArenaSlice) -> &[u8] {
        self.memory.get(slice.range()).unwrap_or(&[])
    }

    pub fn bytes_mut(&mut self, slice: ArenaSlice) -> &mut [u8] {
        self.memory.get_mut(slice.range()).unwrap_or(&mut [])
    }

    /// Text of a previous string allocation.
    ///
    /// A handle that outlived a rollback may point at overwritten bytes; in
    /// that case the result is empty rather than invalid UTF-8.
    pub fn get_str(&self, text: ArenaStr) -> &str {
        std::str::from_utf8(self.bytes(text.0)).unwrap_or("")
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { pos: self.pos }
    }

    /// Rewind the cursor to `mark`. Rewinding never moves forward.
    #[inline]
    pub fn rollback(&mut self, mark: Checkpoint) {
        self.dealloc_to(mark.pos);
    }

    pub fn dealloc_to(&mut self, pos: usize) {
        self.pos = self.pos.min(pos);
    }

    /// Release the last `size` bytes, clamped to what is allocated.
    pub fn dealloc(&mut self, size: usize) {
        self.pos -= size.min(self.pos);
    }

    /// Rewind to zero, keeping committed memory for reuse.
    pub fn clear(&mut self) {
        self.pos = 0;
    }

    /// Rewind to zero and give back all committed memory.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.decommit_unused();
    }

    /// Shrink the committed boundary to the cursor, rounded up to a chunk.
    pub fn decommit_unused(&mut self) {
        let keep = round_to_chunk(self.pos).min(self.reserve);
        if keep < self.memory.len() {
            tracing::trace!(from = self.memory.len(), to = keep, "arena decommit");
            self.memory.truncate(keep);
            self.memory.shrink_to(keep);
        }
    }

    fn commit(&mut self, shortfall: usize) {
        let target = (self.memory.len() + round_to_chunk(shortfall)).min(self.reserve);
        tracing::trace!(from = self.memory.len(), to = target, "arena commit");
        self.memory.resize(target, 0);
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("pos", &self.pos)
            .field("committed", &self.memory.len())
            .field("reserve", &self.reserve)
            .finish()
    }
}

#[inline]
fn round_to_chunk(size: usize) -> usize {
    size.div_ceil(COMMIT_CHUNK) * COMMIT_CHUNK
}

/// `fmt::Write` sink that appends formatted text to an arena.
///
/// Holding the arena mutably keeps the written bytes contiguous.
pub struct ArenaWriter<'a> {
    arena: &'a mut Arena,
    start: usize,
}

impl<'a> ArenaWriter<'a> {
    pub fn new(arena: &'a mut Arena) -> Self {
        let start = arena.pos();
        ArenaWriter { arena, start }
    }

    /// Handle to everything written so far.
    pub fn finish(self) -> ArenaStr {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "positions are bounded by the reservation"
        )]
        let slice = ArenaSlice {
            ptr: ArenaPtr(self.start as u32),
            len: (self.arena.pos() - self.start) as u32,
        };
        ArenaStr(slice)
    }
}

impl fmt::Write for ArenaWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.arena.alloc_bytes(s.as_bytes()).map(drop).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests;
