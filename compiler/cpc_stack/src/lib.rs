//! Stack growth for recursive descent.
//!
//! The parser, the checker and the bytecode lowering all recurse once per
//! nesting level of the source program. A pathological input such as ten
//! thousand nested parentheses would otherwise overflow the native stack, so
//! every recursive entry point runs its body through [`with_stack`].
//!
//! On wasm32 the call is a plain passthrough.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if fewer than
/// [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of native stack still available, when the platform can tell.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining() -> Option<usize> {
    None
}
