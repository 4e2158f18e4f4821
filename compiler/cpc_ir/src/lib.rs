//! Core data structures shared by every front-end stage.
//!
//! - [`Span`] source ranges and [`Name`] interned identifiers
//! - [`Token`] / [`TokenKind`] produced by the lexer
//! - [`AstArena`] holding pool-allocated [`Expr`] and [`Stmt`] nodes
//! - [`TypeArena`] holding pool-allocated [`TypeDesc`] descriptors
//!
//! Nodes never point at each other directly. Children are referenced by
//! [`ExprId`] / [`StmtId`] / [`TypeId`], which are stable pool slot indices,
//! and variable-length child lists are exact-length ranges into a flat side
//! table.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod ids;
mod interner;
mod name;
mod span;
mod token;
pub mod types;

pub use ast::{
    AssignOp, AstArena, BinaryOp, Expr, ExprFlags, ExprKind, Stmt, StmtKind, UnaryOp,
};
pub use ids::{ExprId, ExprRange, FieldRange, NameRange, StmtId, StmtRange, TypeId, TypeRange};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{LexError, Token, TokenKind};
pub use types::{Field, FuncSig, TypeArena, TypeDesc, TypeKind};
