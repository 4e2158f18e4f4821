//! Error recovery.
//!
//! After a syntax error the statement being parsed is abandoned and the
//! cursor skips ahead to a point where a new statement can begin.

use cpc_ir::TokenKind;

const _: () = assert!(TokenKind::COUNT <= 128, "TokenSet holds at most 128 kinds");

/// Bitset over [`TokenKind`] discriminants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const fn new() -> Self {
        TokenSet(0)
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        TokenSet(self.0 | (1 << kind.index()))
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Tokens that can only begin a statement, plus the end of a block and of
/// the file. Recovery stops in front of these.
pub const STMT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Return)
    .with(TokenKind::Print)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Do)
    .with(TokenKind::OpenBrace)
    .with(TokenKind::CloseBrace)
    .with(TokenKind::Struct)
    .with(TokenKind::Enum)
    .with(TokenKind::Namespace)
    .with(TokenKind::Using)
    .with(TokenKind::Native)
    .with(TokenKind::Const)
    .with(TokenKind::Eof);

#[cfg(test)]
mod tests;
