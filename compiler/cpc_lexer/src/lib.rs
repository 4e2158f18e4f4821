//! Hand-written scanner for cpcom source text.
//!
//! [`Lexer`] produces one [`Token`] per call to [`Lexer::next_token`]; there
//! is no pre-tokenised buffer. The scanner state is `Copy`, so a parser can
//! snapshot it by value and restore it to backtrack.
//!
//! Lexical errors are returned as [`TokenKind::Error`] tokens carrying a
//! [`LexError`]; scanning resumes after the offending text.

mod keywords;
pub mod literal;

use cpc_ir::{LexError, Span, Token, TokenKind};

pub use keywords::classify as classify_keyword;

/// On-demand scanner over a source string.
#[derive(Copy, Clone, Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    /// First byte of the token being scanned.
    start: usize,
    current: usize,
    /// 1-based line and byte column of `current`.
    line: u32,
    col: u32,
    start_line: u32,
    start_col: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            start: 0,
            current: 0,
            line: 1,
            col: 1,
            start_line: 1,
            start_col: 1,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Scan the next token. Returns [`TokenKind::Eof`] forever once the
    /// source is exhausted.
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_trivia() {
            return error;
        }
        self.start = self.current;
        self.start_line = self.line;
        self.start_col = self.col;

        let Some(c) = self.peek() else {
            return self.make(TokenKind::Eof);
        };
        self.bump();

        use TokenKind as T;
        match c {
            b'(' => self.make(T::OpenParen),
            b')' => self.make(T::CloseParen),
            b'[' => self.make(T::OpenBracket),
            b']' => self.make(T::CloseBracket),
            b'{' => self.make(T::OpenBrace),
            b'}' => self.make(T::CloseBrace),
            b',' => self.make(T::Comma),
            b';' => self.make(T::Semicolon),
            b':' => self.make(T::Colon),
            b'?' => self.make(T::Question),
            b'\\' => self.make(T::Backslash),

            b'=' => self.pick(&[(b'=', T::EqualEqual), (b'>', T::FatArrow)], T::Equal),
            b'!' => self.pick(&[(b'=', T::BangEqual)], T::Bang),
            b'|' => self.pick(&[(b'=', T::PipeEqual), (b'|', T::PipePipe)], T::Pipe),
            b'~' => self.pick(&[(b'=', T::TildeEqual)], T::Tilde),
            b'^' => self.pick(&[(b'=', T::CaretEqual)], T::Caret),
            b'&' => self.pick(&[(b'=', T::AmpEqual), (b'&', T::AmpAmp)], T::Amp),
            b'+' => self.pick(&[(b'=', T::PlusEqual), (b'+', T::PlusPlus)], T::Plus),
            b'-' => self.pick(
                &[(b'=', T::MinusEqual), (b'-', T::MinusMinus), (b'>', T::ThinArrow)],
                T::Minus,
            ),
            b'*' => self.pick(&[(b'=', T::StarEqual)], T::Star),
            b'/' => self.pick(&[(b'=', T::SlashEqual)], T::Slash),
            b'%' => self.pick(&[(b'=', T::PercentEqual)], T::Percent),
            b'<' => self.pick(&[(b'=', T::LessEqual), (b'<', T::ShiftLeft)], T::Less),
            b'>' => self.pick(&[(b'=', T::GreaterEqual), (b'>', T::ShiftRight)], T::Greater),
            b'.' => {
                if self.peek() == Some(b'.') && self.peek_next() == Some(b'.') {
                    self.bump();
                    self.bump();
                    self.make(T::Ellipsis)
                } else {
                    self.make(T::Dot)
                }
            }

            b'"' => self.string(),
            b'\'' => self.char_literal(),
            b'0'..=b'9' => self.number(),
            b'@' => self.tag(),
            c if is_ident_start(c) => self.identifier(),
            _ => {
                // Keep spans on character boundaries.
                while self.peek().is_some_and(|b| b & 0xC0 == 0x80) {
                    self.bump();
                }
                self.error(LexError::UnexpectedCharacter)
            }
        }
    }

    // ─── Trivia ───

    /// Skip whitespace and comments. An unterminated block comment is
    /// returned as an error token.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(b' ' | b'\t' | b'\r' | b'\n'), _) => self.bump(),
                (Some(b'/'), Some(b'/')) => {
                    let rest = &self.source.as_bytes()[self.current..];
                    let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                    self.skip(len);
                }
                (Some(b'/'), Some(b'*')) => {
                    if let Some(error) = self.block_comment() {
                        return Some(error);
                    }
                }
                _ => return None,
            }
        }
    }

    fn block_comment(&mut self) -> Option<Token> {
        self.start = self.current;
        self.start_line = self.line;
        self.start_col = self.col;
        self.skip(2);

        let mut depth = 1u32;
        while depth > 0 {
            let rest = &self.source.as_bytes()[self.current..];
            let Some(jump) = memchr::memchr2(b'*', b'/', rest) else {
                self.skip(rest.len());
                return Some(self.error(LexError::UnterminatedComment));
            };
            self.skip(jump);
            match (self.peek(), self.peek_next()) {
                (Some(b'*'), Some(b'/')) => {
                    self.skip(2);
                    depth -= 1;
                }
                (Some(b'/'), Some(b'*')) => {
                    self.skip(2);
                    depth += 1;
                }
                _ => self.bump(),
            }
        }
        None
    }

    // ─── Operators ───

    /// Consume the first byte in `options` that follows, or emit `no`.
    fn pick(&mut self, options: &[(u8, TokenKind)], no: TokenKind) -> Token {
        for &(expected, kind) in options {
            if self.eat(expected) {
                return self.make(kind);
            }
        }
        self.make(no)
    }

    // ─── Literals ───

    fn number(&mut self) -> Token {
        self.eat_while(|b| b.is_ascii_digit());

        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
            self.eat_while(|b| b.is_ascii_digit());
            let kind = match self.peek() {
                Some(b'f' | b'F') => {
                    self.bump();
                    TokenKind::FloatLit
                }
                Some(b'd' | b'D') => {
                    self.bump();
                    TokenKind::DoubleLit
                }
                _ => TokenKind::DoubleLit,
            };
            return self.finish_number(kind);
        }

        if matches!(self.peek(), Some(b'l' | b'L')) {
            self.bump();
            return self.finish_number(TokenKind::LongLit);
        }
        self.finish_number(TokenKind::IntLit)
    }

    /// Any identifier character after a literal is a bad suffix; the whole
    /// run is consumed into the error token.
    fn finish_number(&mut self, kind: TokenKind) -> Token {
        if self.peek().is_some_and(is_ident_continue) {
            self.eat_while(is_ident_continue);
            return self.error(LexError::InvalidNumberSuffix);
        }
        self.make(kind)
    }

    fn string(&mut self) -> Token {
        loop {
            let rest = &self.source.as_bytes()[self.current..];
            let Some(jump) = memchr::memchr2(b'"', b'\\', rest) else {
                self.skip(rest.len());
                return self.error(LexError::UnterminatedString);
            };
            self.skip(jump);
            if self.eat(b'"') {
                return self.make(TokenKind::StringLit);
            }
            // Backslash: the escaped character never terminates.
            self.bump();
            if self.peek().is_some() {
                self.bump_char();
            }
        }
    }

    fn char_literal(&mut self) -> Token {
        match self.peek() {
            None | Some(b'\n') => return self.error(LexError::UnterminatedChar),
            Some(b'\\') => {
                self.bump();
                if self.peek().is_none() {
                    return self.error(LexError::UnterminatedChar);
                }
                self.bump_char();
            }
            Some(b'\'') => {
                self.bump();
                return self.error(LexError::UnterminatedChar);
            }
            Some(_) => self.bump_char(),
        }
        if self.eat(b'\'') {
            return self.make(TokenKind::CharLit);
        }

        // More than one character: resynchronise at the closing quote when it
        // is on the same line.
        let rest = &self.source.as_bytes()[self.current..];
        let line_end = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        match memchr::memchr(b'\'', &rest[..line_end]) {
            Some(close) => {
                self.skip(close + 1);
                self.error(LexError::CharLiteralTooLong)
            }
            None => self.error(LexError::UnterminatedChar),
        }
    }

    fn tag(&mut self) -> Token {
        match self.peek() {
            Some(b'!') => {
                self.bump();
                self.make(TokenKind::Tag)
            }
            Some(b) if is_ident_start(b) => {
                self.eat_while(is_ident_continue);
                self.make(TokenKind::Tag)
            }
            _ => self.error(LexError::InvalidTag),
        }
    }

    fn identifier(&mut self) -> Token {
        self.eat_while(is_ident_continue);
        let kind = keywords::classify(&self.source.as_bytes()[self.start..self.current]);
        self.make(kind)
    }

    // ─── Cursor ───

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current + 1).copied()
    }

    #[inline]
    fn bump(&mut self) {
        if let Some(b) = self.peek() {
            self.current += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Advance over one full UTF-8 character.
    fn bump_char(&mut self) {
        self.bump();
        while self.peek().is_some_and(|b| b & 0xC0 == 0x80) {
            self.bump();
        }
    }

    #[inline]
    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    /// Advance `len` bytes, updating line and column in bulk.
    fn skip(&mut self, len: usize) {
        let bytes = &self.source.as_bytes()[self.current..self.current + len];
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                self.line += count(memchr::memchr_iter(b'\n', bytes).count());
                self.col = 1 + count(len - last - 1);
            }
            None => self.col += count(len),
        }
        self.current += len;
    }

    // ─── Token construction ───

    fn span(&self) -> Span {
        Span::from_range(self.start..self.current)
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.span(), self.start_line, self.start_col)
    }

    fn error(&self, error: LexError) -> Token {
        Token::error(error, self.span(), self.start_line, self.start_col)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to, but not including, end of file.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Scan all of `source`, ending with the `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            return tokens;
        }
    }
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
