//! Memory management for the front end.
//!
//! Every later stage allocates out of one of four structures:
//!
//! - [`Arena`]: forward-only bump allocation over a reserved byte range,
//!   committed lazily in [`COMMIT_CHUNK`] steps, with checkpoint/rollback and
//!   bulk reset but no per-object free.
//! - [`Pool`]: fixed-size typed slots with a free list, grown in batches of
//!   [`POOL_BATCH`]. AST and type nodes live here.
//! - [`Heap`]: a first-fit free-list allocator for variable-sized blocks that
//!   do need to be returned individually.
//! - [`ScratchPool`]: recycled short-lived arenas handed out behind a guard
//!   that rewinds and returns them on drop.
//!
//! Offsets are handed out instead of pointers. The committed/reserved split is
//! tracked logically over a growable buffer.

mod arena;
mod error;
mod heap;
mod pool;
mod scratch;

pub use arena::{Arena, ArenaPtr, ArenaSlice, ArenaStr, ArenaWriter, Checkpoint, COMMIT_CHUNK, DEFAULT_RESERVE};
pub use error::AllocError;
pub use heap::{Heap, HeapBlock, HEAP_ALIGN};
pub use pool::{Pool, PoolKey, DEFAULT_POOL_SLOTS, POOL_BATCH};
pub use scratch::{ScratchArena, ScratchPool};
