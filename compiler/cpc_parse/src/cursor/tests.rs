use pretty_assertions::assert_eq;

use super::*;

#[test]
fn window_starts_filled() {
    let cursor = Cursor::new("x : int");
    assert_eq!(cursor.current_kind(), TokenKind::Ident);
    assert_eq!(cursor.next_kind(), TokenKind::Colon);
    assert_eq!(cursor.previous_span(), Span::DUMMY);
}

#[test]
fn bump_shifts_and_reports_previous() {
    let mut cursor = Cursor::new("a + b");
    let a = cursor.bump();
    assert_eq!(cursor.lexeme(a), "a");
    assert_eq!(cursor.previous_span(), a.span);
    assert_eq!(cursor.current_kind(), TokenKind::Plus);
    assert_eq!(cursor.next_kind(), TokenKind::Ident);
}

#[test]
fn eof_repeats() {
    let mut cursor = Cursor::new("1");
    cursor.bump();
    assert!(cursor.is_at_end());
    cursor.bump();
    cursor.bump();
    assert!(cursor.is_at_end());
    assert_eq!(cursor.next_kind(), TokenKind::Eof);
}

#[test]
fn copies_are_independent() {
    let mut cursor = Cursor::new("a b c");
    let saved = cursor;
    cursor.bump();
    cursor.bump();
    assert_eq!(cursor.lexeme(cursor.current()), "c");
    assert_eq!(saved.lexeme(saved.current()), "a");
}
