use super::*;

#[test]
fn empty_set() {
    let set = TokenSet::new();
    assert_eq!(set.count(), 0);
    assert!(!set.contains(TokenKind::Semicolon));
}

#[test]
fn with_adds_kinds() {
    let set = TokenSet::new()
        .with(TokenKind::Semicolon)
        .with(TokenKind::Ulong);
    assert_eq!(set.count(), 2);
    assert!(set.contains(TokenKind::Semicolon));
    assert!(set.contains(TokenKind::Ulong));
    assert!(!set.contains(TokenKind::Comma));
}

#[test]
fn adding_twice_is_idempotent() {
    let set = TokenSet::new().with(TokenKind::If).with(TokenKind::If);
    assert_eq!(set.count(), 1);
}

#[test]
fn statement_boundary_members() {
    assert!(STMT_BOUNDARY.contains(TokenKind::Return));
    assert!(STMT_BOUNDARY.contains(TokenKind::CloseBrace));
    assert!(STMT_BOUNDARY.contains(TokenKind::Eof));
    assert!(!STMT_BOUNDARY.contains(TokenKind::Ident));
    assert!(!STMT_BOUNDARY.contains(TokenKind::Semicolon));
}
