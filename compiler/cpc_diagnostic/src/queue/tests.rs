use pretty_assertions::assert_eq;

use super::*;
use cpc_ir::Span;

fn mismatch(message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001).with_message(message)
}

#[test]
fn latch_suppresses_rest_of_statement() {
    let mut queue = DiagnosticQueue::new();
    queue.begin_statement();
    let _ = queue.emit(mismatch("first"), 1, 1);
    let _ = queue.emit(mismatch("second"), 1, 5);
    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.suppressed_count(), 1);
    assert!(queue.statement_has_error());

    queue.begin_statement();
    let _ = queue.emit(mismatch("third"), 2, 1);
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn lexical_errors_pass_the_latch_and_set_it() {
    let mut queue = DiagnosticQueue::new();
    queue.begin_statement();
    let _ = queue.emit(mismatch("checker"), 1, 6);
    let _ = queue.emit_lexical(Diagnostic::error(ErrorCode::E0007), 2, 1);
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.suppressed_count(), 0);

    queue.begin_statement();
    let _ = queue.emit_lexical(Diagnostic::error(ErrorCode::E0002), 3, 1);
    assert!(queue.statement_has_error());
    let _ = queue.emit(mismatch("follow-up"), 3, 4);
    assert_eq!(queue.error_count(), 3);
    assert_eq!(queue.suppressed_count(), 1);
}

#[test]
fn ceiling_truncates_and_appends_note() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 3,
        deduplicate: true,
    });
    for line in 1..=5 {
        queue.begin_statement();
        let _ = queue.emit(mismatch("bad"), line, 1);
    }
    assert!(queue.truncated());
    assert!(queue.limit_reached());
    let flushed = queue.flush();
    assert_eq!(flushed.len(), 4);
    assert_eq!(flushed[3].code, ErrorCode::E9002);
    assert!(queue.truncated());
}

#[test]
fn duplicates_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    queue.begin_statement();
    let _ = queue.emit(mismatch("a"), 4, 2);
    queue.begin_statement();
    let _ = queue.emit(mismatch("a"), 4, 2);
    assert_eq!(queue.error_count(), 1);
}

#[test]
fn flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    let lines = LineIndex::new("a\nb\nc");
    for offset in [4, 0, 2] {
        queue.begin_statement();
        let diag = mismatch("x").with_label(Span::new(offset, offset + 1), "here");
        let _ = queue.emit_spanned(diag, &lines);
    }
    let positions: Vec<_> = queue.flush().iter().map(|d| (d.line, d.column)).collect();
    assert_eq!(positions, vec![(1, 1), (2, 1), (3, 1)]);
    assert_eq!(queue.error_count(), 0);
    assert!(queue.has_errors().is_none());
}
