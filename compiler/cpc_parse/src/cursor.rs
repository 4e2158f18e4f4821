//! Two-token window over the lexer.

use cpc_ir::{Span, Token, TokenKind};
use cpc_lexer::Lexer;

/// The parser's view of the token stream: the token being parsed
/// (`current`) and one token of lookahead (`next`).
///
/// Tokens are pulled from the [`Lexer`] on demand. The whole cursor is
/// `Copy`, which is what makes a parser snapshot a plain value.
#[derive(Copy, Clone, Debug)]
pub struct Cursor<'src> {
    lexer: Lexer<'src>,
    current: Token,
    next: Token,
    previous: Span,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let next = lexer.next_token();
        Cursor {
            lexer,
            current,
            next,
            previous: Span::DUMMY,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.current
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current.span
    }

    #[inline]
    pub fn next_kind(&self) -> TokenKind {
        self.next.kind
    }

    /// Span of the last token shifted out of the window.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    #[inline]
    pub fn lexeme(&self, token: Token) -> &'src str {
        token.lexeme(self.lexer.source())
    }

    /// Shift the window by one token and return the token shifted out.
    ///
    /// Error tokens are shifted like any other; reporting them is the
    /// parser's job.
    pub fn bump(&mut self) -> Token {
        let token = self.current;
        self.previous = token.span;
        self.current = self.next;
        self.next = self.lexer.next_token();
        token
    }
}

#[cfg(test)]
mod tests;
