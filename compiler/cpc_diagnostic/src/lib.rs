//! Diagnostic reporting for the cpcom front end.
//!
//! Every stage reports problems as [`Diagnostic`] values tagged with an
//! [`ErrorCode`]. The first digit of the code names the reporting [`Stage`].
//! Diagnostics are collected in a [`DiagnosticQueue`], which applies the
//! per-statement latch and the error ceiling.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained by emitting an error, so a stage
//! that returns one has provably reported something.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::{ErrorCode, Stage};
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use span_utils::LineIndex;
