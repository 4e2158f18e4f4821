//! cpcom front end.
//!
//! Turns source text into a typed AST with constant subtrees folded,
//! plus the diagnostics found on the way. Code generation consumes the
//! result through [`Compilation`]; nothing here reads files or exits the
//! process.
//!
//! ```text
//! let compilation = cpcom::compile_source("x := 2 + 3;", &CompilerConfig::default())?;
//! assert!(!compilation.has_errors());
//! ```
//!
//! Set `RUST_LOG` (for example `RUST_LOG=cpc_parse=debug`) and call
//! [`init_tracing`] to see declarations, overload choices and folds.

mod config;

use std::sync::Once;

use cpc_alloc::AllocError;
use cpc_ir::{AstArena, StmtId, StringInterner, TypeArena};

pub use config::CompilerConfig;
pub use cpc_diagnostic::{Diagnostic, ErrorCode, Stage};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber reading its filter from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Result of compiling one source text.
pub struct Compilation {
    pub ast: AstArena,
    pub types: TypeArena,
    pub interner: StringInterner,
    /// Top-level statements in source order.
    pub items: Vec<StmtId>,
    /// Sorted by line and column.
    pub diagnostics: Vec<Diagnostic>,
    /// The error limit stopped the parse before the end of the input.
    pub truncated: bool,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.diagnostics.iter().map(|diag| diag.code)
    }

    /// One line per diagnostic, e.g.
    /// `checker error [E2001] 1:6: operator ...`.
    pub fn render_diagnostics(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            out.push_str(&diag.to_string());
            out.push('\n');
        }
        out
    }
}

/// Lex, parse, check and fold `source`.
///
/// Problems in the source are returned as diagnostics. The error is only
/// for a configuration whose pools cannot even hold the built-in types.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile_source(source: &str, config: &CompilerConfig) -> Result<Compilation, AllocError> {
    let output = cpc_parse::parse(source, &config.parse_options())?;
    tracing::debug!(
        items = output.items.len(),
        errors = output.diagnostics.len(),
        truncated = output.truncated,
        "compiled"
    );
    Ok(Compilation {
        ast: output.ast,
        types: output.types,
        interner: output.interner,
        items: output.items,
        diagnostics: output.diagnostics,
        truncated: output.truncated,
    })
}
