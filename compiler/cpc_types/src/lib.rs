//! Type checker for the cpcom front end.
//!
//! The parser hands every finished expression to a [`TypeChecker`], which
//! infers a type for each node, records it in [`Expr::ty`](cpc_ir::Expr),
//! and reports operator, assignment, return, print and call mismatches.
//!
//! # Module Organization
//!
//! - `operators`: per-operator tables of accepted operand pairs
//! - `checker`: expression inference and statement-level checks
//! - `resolve`: identifier and overload resolution across scopes

mod checker;
pub mod operators;
mod resolve;

pub use checker::{CheckEnv, TypeChecker};
pub use operators::{check_binary, check_unary, OpResult, OpTable};
pub use resolve::Resolved;
