use super::*;

#[test]
fn keyword_ranges() {
    assert!(TokenKind::Struct.is_keyword());
    assert!(TokenKind::Print.is_keyword());
    assert!(TokenKind::Ulong.is_type_keyword());
    assert!(TokenKind::Int.is_type_keyword());
    assert!(!TokenKind::Return.is_type_keyword());
    assert!(!TokenKind::ThinArrow.is_keyword());
    assert!(!TokenKind::Ident.is_keyword());
}

#[test]
fn count_covers_last_kind() {
    assert_eq!(TokenKind::COUNT, TokenKind::Ulong.index() + 1);
}

#[test]
fn lexeme_reads_span() {
    let source = "x = 123l;";
    let token = Token::new(TokenKind::LongLit, Span::new(4, 8), 1, 5);
    assert_eq!(token.lexeme(source), "123l");
}

#[test]
fn error_tokens_carry_their_cause() {
    let token = Token::error(LexError::UnterminatedString, Span::new(0, 4), 1, 1);
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.error.map(LexError::message), Some("unterminated string literal"));
}
