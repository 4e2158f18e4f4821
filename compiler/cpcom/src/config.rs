//! Compiler settings.

use cpc_alloc::{DEFAULT_POOL_SLOTS, DEFAULT_RESERVE};
use cpc_diagnostic::DiagnosticConfig;
use cpc_parse::ParseOptions;

/// Settings for one compilation. The default reproduces the classic
/// behaviour: at most 20 errors, constant folding on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilerConfig {
    /// Errors kept before the parse stops (0 = unlimited).
    pub error_limit: usize,
    pub fold_constants: bool,
    /// Byte reservation of the interner and of each scratch arena.
    pub arena_reserve: usize,
    /// Slot ceiling of each node pool.
    pub pool_reserve: usize,
    /// Drop reports identical in code and position.
    pub deduplicate: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            error_limit: 20,
            fold_constants: true,
            arena_reserve: DEFAULT_RESERVE,
            pool_reserve: DEFAULT_POOL_SLOTS,
            deduplicate: true,
        }
    }
}

impl CompilerConfig {
    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    #[must_use]
    pub fn without_folding(mut self) -> Self {
        self.fold_constants = false;
        self
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            fold_constants: self.fold_constants,
            diagnostics: DiagnosticConfig {
                error_limit: self.error_limit,
                deduplicate: self.deduplicate,
            },
            arena_reserve: self.arena_reserve,
            pool_slots: self.pool_reserve,
        }
    }
}
