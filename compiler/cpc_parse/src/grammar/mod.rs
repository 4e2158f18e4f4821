//! Grammar productions.
//!
//! Each module extends [`Parser`](crate::Parser) with the methods for one
//! part of the language:
//!
//! - [`expr`]: precedence climbing over the operator table
//! - [`stmt`]: statements, declarations and scopes
//! - [`ty`]: basic, function and named types

mod expr;
mod stmt;
mod ty;

pub use expr::Prec;
