//! Operator precedence table.

use cpc_ir::TokenKind;

/// Binding power of an infix token, weakest first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Prec {
    /// Not an infix operator.
    None,
    /// `=` and the compound assignments. Right-associative.
    Assign,
    LogOr,
    LogAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Compare,
    Shift,
    Term,
    Factor,
    /// Postfix `(` and `.`.
    Call,
}

impl Prec {
    /// The next stronger level, used for the right operand of a
    /// left-associative operator.
    pub const fn next(self) -> Prec {
        match self {
            Prec::None => Prec::Assign,
            Prec::Assign => Prec::LogOr,
            Prec::LogOr => Prec::LogAnd,
            Prec::LogAnd => Prec::BitOr,
            Prec::BitOr => Prec::BitXor,
            Prec::BitXor => Prec::BitAnd,
            Prec::BitAnd => Prec::Equality,
            Prec::Equality => Prec::Compare,
            Prec::Compare => Prec::Shift,
            Prec::Shift => Prec::Term,
            Prec::Term => Prec::Factor,
            Prec::Factor | Prec::Call => Prec::Call,
        }
    }

    /// Table lookup by token kind.
    #[inline]
    pub fn of(kind: TokenKind) -> Prec {
        INFIX[kind.index()]
    }
}

static INFIX: [Prec; TokenKind::COUNT] = build_table();

const fn build_table() -> [Prec; TokenKind::COUNT] {
    let mut table = [Prec::None; TokenKind::COUNT];
    let bindings = [
        (TokenKind::Equal, Prec::Assign),
        (TokenKind::PlusEqual, Prec::Assign),
        (TokenKind::MinusEqual, Prec::Assign),
        (TokenKind::StarEqual, Prec::Assign),
        (TokenKind::SlashEqual, Prec::Assign),
        (TokenKind::PercentEqual, Prec::Assign),
        (TokenKind::AmpEqual, Prec::Assign),
        (TokenKind::PipeEqual, Prec::Assign),
        (TokenKind::CaretEqual, Prec::Assign),
        (TokenKind::TildeEqual, Prec::Assign),
        (TokenKind::PipePipe, Prec::LogOr),
        (TokenKind::AmpAmp, Prec::LogAnd),
        (TokenKind::Pipe, Prec::BitOr),
        (TokenKind::Caret, Prec::BitXor),
        (TokenKind::Amp, Prec::BitAnd),
        (TokenKind::EqualEqual, Prec::Equality),
        (TokenKind::BangEqual, Prec::Equality),
        (TokenKind::Less, Prec::Compare),
        (TokenKind::LessEqual, Prec::Compare),
        (TokenKind::Greater, Prec::Compare),
        (TokenKind::GreaterEqual, Prec::Compare),
        (TokenKind::ShiftLeft, Prec::Shift),
        (TokenKind::ShiftRight, Prec::Shift),
        (TokenKind::Plus, Prec::Term),
        (TokenKind::Minus, Prec::Term),
        (TokenKind::Star, Prec::Factor),
        (TokenKind::Slash, Prec::Factor),
        (TokenKind::Percent, Prec::Factor),
        (TokenKind::OpenParen, Prec::Call),
        (TokenKind::Dot, Prec::Call),
    ];
    let mut i = 0;
    while i < bindings.len() {
        let (kind, prec) = bindings[i];
        table[kind.index()] = prec;
        i += 1;
    }
    table
}
