//! Diagnostic queue.
//!
//! Features:
//! - Per-statement latch: after the first report in a statement, further
//!   reports are suppressed until [`DiagnosticQueue::begin_statement`]
//! - Error ceiling: past `error_limit`, reports are dropped and the queue is
//!   marked truncated
//! - Deduplication of identical (code, position) reports
//! - `ErrorGuaranteed` proof that errors were emitted

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed, LineIndex};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a report identical in code and position to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No ceiling and no deduplication (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    /// A report was accepted since the last statement boundary.
    latched: bool,
    /// Reports suppressed by the latch.
    suppressed: usize,
    truncated: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            latched: false,
            suppressed: 0,
            truncated: false,
            config,
        }
    }

    /// Mark a statement boundary, releasing the latch.
    #[inline]
    pub fn begin_statement(&mut self) {
        self.latched = false;
    }

    /// Whether a report was accepted in the current statement.
    #[inline]
    pub fn statement_has_error(&self) -> bool {
        self.latched
    }

    /// Queue an error at an explicit 1-based position.
    ///
    /// The report may be suppressed by the latch, the ceiling or
    /// deduplication; an error exists in every case, so proof is returned.
    pub fn emit(&mut self, diag: Diagnostic, line: u32, column: u32) -> ErrorGuaranteed {
        self.add(diag.at(line, column));
        ErrorGuaranteed::new()
    }

    /// Queue a lexical error at an explicit 1-based position.
    ///
    /// Error tokens are skipped while the parser advances, which may be past
    /// the end of the statement that owns the latch, so lexical errors are
    /// never suppressed by it. They still set it.
    pub fn emit_lexical(&mut self, diag: Diagnostic, line: u32, column: u32) -> ErrorGuaranteed {
        let latched = std::mem::replace(&mut self.latched, false);
        self.add(diag.at(line, column));
        self.latched |= latched;
        ErrorGuaranteed::new()
    }

    /// Queue an error positioned at the start of its primary span.
    pub fn emit_spanned(&mut self, diag: Diagnostic, lines: &LineIndex) -> ErrorGuaranteed {
        let (line, column) = diag
            .primary_span()
            .map_or((1, 1), |span| lines.span_start(span));
        self.emit(diag, line, column)
    }

    fn add(&mut self, diag: Diagnostic) {
        if self.truncated {
            return;
        }
        if self.latched {
            self.suppressed += 1;
            tracing::trace!(code = %diag.code, "diagnostic suppressed by statement latch");
            return;
        }
        if self.config.deduplicate && self.is_duplicate(&diag) {
            return;
        }
        if self.limit_reached() {
            tracing::warn!(limit = self.config.error_limit, "error limit reached");
            self.truncated = true;
            self.diagnostics
                .push(too_many_errors(self.config.error_limit).at(diag.line, diag.column));
            return;
        }
        self.latched = true;
        self.error_count += 1;
        self.diagnostics.push(diag);
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        self.diagnostics.iter().rev().any(|queued| {
            queued.code == diag.code && queued.line == diag.line && queued.column == diag.column
        })
    }

    /// Whether the next accepted report would exceed the ceiling.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Whether a report was dropped because of the ceiling.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take every queued diagnostic, sorted by position.
    ///
    /// Resets the counters; the truncation flag is kept so the caller can
    /// still observe it.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let already_sorted = self
            .diagnostics
            .windows(2)
            .all(|w| (w[0].line, w[0].column) <= (w[1].line, w[1].column));
        if !already_sorted {
            self.diagnostics.sort_by_key(|d| (d.line, d.column));
        }
        self.error_count = 0;
        self.suppressed = 0;
        self.latched = false;
        std::mem::take(&mut self.diagnostics)
    }
}

/// "too many errors" diagnostic appended when the ceiling is hit.
#[cold]
pub fn too_many_errors(limit: usize) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting due to {limit} previous errors"))
        .with_note("raise `error_limit` to see more")
}

#[cfg(test)]
mod tests;
