//! Constant folding for the cpcom front end.
//!
//! A constant expression subtree is lowered to a [`Chunk`] of byte
//! opcodes, run on a small stack machine, and the resulting [`Value`] is
//! written back into the AST as a single literal node.
//!
//! ```text
//! 2 + 3 * 4   =>   PUSH 0  PUSH 1  PUSH 2  MUL  ADD   =>   Int(14)
//! ```
//!
//! Evaluation never reports diagnostics. Anything the machine cannot
//! evaluate (an integral division by zero, a bool in arithmetic) leaves the
//! subtree as it was.

mod chunk;
mod folder;
mod lower;
mod value;
mod vm;

pub use chunk::{Chunk, Opcode, MAX_CONSTANTS};
pub use folder::Folder;
pub use lower::lower;
pub use value::{Value, ValueKind};
pub use vm::run;

/// Why a subtree could not be evaluated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FoldError {
    #[error("expression is not constant")]
    NotConstant,
    #[error("integral division by zero")]
    DivisionByZero,
    #[error("`{}` cannot be applied to these operands", .op.as_str())]
    Operands { op: Opcode },
    #[error("more than {} constants in one chunk", MAX_CONSTANTS)]
    TooManyConstants,
    #[error("value stack underflow")]
    StackUnderflow,
    #[error("{depth} values left on the stack")]
    Unbalanced { depth: usize },
    #[error("invalid opcode {0:#04x}")]
    BadOpcode(u8),
    #[error("constant binding no longer in scope")]
    Unbound,
}
