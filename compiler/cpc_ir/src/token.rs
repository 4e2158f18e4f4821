//! Lexer output.

use std::fmt;

use crate::Span;

/// A lexed token. Text is recovered from the source with `span`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Set only on [`TokenKind::Error`] tokens.
    pub error: Option<LexError>,
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based column (in bytes) of the first byte.
    pub col: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, line: u32, col: u32) -> Self {
        Token {
            kind,
            error: None,
            span,
            line,
            col,
        }
    }

    #[inline]
    pub const fn error(error: LexError, span: Span, line: u32, col: u32) -> Self {
        Token {
            kind: TokenKind::Error,
            error: Some(error),
            span,
            line,
            col,
        }
    }

    /// End-of-input sentinel at `offset`.
    #[inline]
    pub const fn eof(offset: u32, line: u32, col: u32) -> Self {
        Token::new(TokenKind::Eof, Span::new(offset, offset), line, col)
    }

    #[inline]
    pub fn lexeme(self, source: &str) -> &str {
        self.span.slice(source)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {} ({}:{})", self.kind, self.span, self.line, self.col)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    crate::static_assert_size!(TokenKind, 1);
    crate::static_assert_size!(Token, 20);
}

/// Lexical failures carried by [`TokenKind::Error`] tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexError {
    UnterminatedString,
    UnterminatedChar,
    UnterminatedComment,
    UnexpectedCharacter,
    InvalidNumberSuffix,
    CharLiteralTooLong,
    InvalidTag,
}

impl LexError {
    pub const fn message(self) -> &'static str {
        match self {
            LexError::UnterminatedString => "unterminated string literal",
            LexError::UnterminatedChar => "unterminated character literal",
            LexError::UnterminatedComment => "unterminated comment block",
            LexError::UnexpectedCharacter => "unexpected character",
            LexError::InvalidNumberSuffix => "unrecognised number suffix",
            LexError::CharLiteralTooLong => "only one character permitted in character literal",
            LexError::InvalidTag => "expected identifier or `!` after `@`",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Closed set of token kinds.
///
/// The discriminant doubles as an index into the parser's precedence table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    Error,
    Eof,

    // ─── Literals ───
    Ident,
    StringLit,
    IntLit,
    LongLit,
    FloatLit,
    DoubleLit,
    CharLit,
    /// `@name` or `@!`
    Tag,

    // ─── Operators ───
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Backslash,
    BangEqual,
    EqualEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    ShiftLeft,
    ShiftRight,
    PlusPlus,
    MinusMinus,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmpEqual,
    PipeEqual,
    CaretEqual,
    TildeEqual,

    // ─── Punctuation ───
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    Question,
    /// `=>`
    FatArrow,
    /// `->`
    ThinArrow,

    // ─── Keywords ───
    Struct,
    Enum,
    Union,
    FlagEnum,
    Return,
    Break,
    Continue,
    Import,
    Null,
    Nullptr,
    Const,
    If,
    Else,
    Do,
    For,
    While,
    Switch,
    Match,
    Case,
    Default,
    True,
    False,
    Native,
    Namespace,
    Using,
    Sizeof,
    Offsetof,
    Cinclude,
    Cinsert,
    Operator,
    Typedef,
    Func,
    Print,

    // ─── Type keywords ───
    Int,
    Cstring,
    Float,
    Bool,
    Double,
    Char,
    Short,
    Long,
    Void,
    Uchar,
    Ushort,
    Uint,
    Ulong,
}

impl TokenKind {
    /// Number of kinds; sizes per-kind lookup tables.
    pub const COUNT: usize = TokenKind::Ulong as usize + 1;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_keyword(self) -> bool {
        (self as u8) >= (TokenKind::Struct as u8)
    }

    pub const fn is_type_keyword(self) -> bool {
        (self as u8) >= (TokenKind::Int as u8)
    }

    /// Human-readable form used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
            TokenKind::Ident => "identifier",
            TokenKind::StringLit => "string literal",
            TokenKind::IntLit => "integer literal",
            TokenKind::LongLit => "long literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::DoubleLit => "double literal",
            TokenKind::CharLit => "character literal",
            TokenKind::Tag => "tag",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Bang => "!",
            TokenKind::Backslash => "\\",
            TokenKind::BangEqual => "!=",
            TokenKind::EqualEqual => "==",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Equal => "=",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusEqual => "-=",
            TokenKind::StarEqual => "*=",
            TokenKind::SlashEqual => "/=",
            TokenKind::PercentEqual => "%=",
            TokenKind::AmpEqual => "&=",
            TokenKind::PipeEqual => "|=",
            TokenKind::CaretEqual => "^=",
            TokenKind::TildeEqual => "~=",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::FatArrow => "=>",
            TokenKind::ThinArrow => "->",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::Union => "union",
            TokenKind::FlagEnum => "flagenum",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Import => "import",
            TokenKind::Null => "null",
            TokenKind::Nullptr => "nullptr",
            TokenKind::Const => "const",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Switch => "switch",
            TokenKind::Match => "match",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Native => "native",
            TokenKind::Namespace => "namespace",
            TokenKind::Using => "using",
            TokenKind::Sizeof => "sizeof",
            TokenKind::Offsetof => "offsetof",
            TokenKind::Cinclude => "cinclude",
            TokenKind::Cinsert => "cinsert",
            TokenKind::Operator => "operator",
            TokenKind::Typedef => "typedef",
            TokenKind::Func => "func",
            TokenKind::Print => "print",
            TokenKind::Int => "int",
            TokenKind::Cstring => "cstring",
            TokenKind::Float => "float",
            TokenKind::Bool => "bool",
            TokenKind::Double => "double",
            TokenKind::Char => "char",
            TokenKind::Short => "short",
            TokenKind::Long => "long",
            TokenKind::Void => "void",
            TokenKind::Uchar => "uchar",
            TokenKind::Ushort => "ushort",
            TokenKind::Uint => "uint",
            TokenKind::Ulong => "ulong",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests;
