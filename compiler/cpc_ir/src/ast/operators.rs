//! Operator kinds carried by unary, binary and assignment nodes.

use crate::TokenKind;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling, used in diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Percent => Self::Mod,
            TokenKind::Amp => Self::BitAnd,
            TokenKind::Pipe => Self::BitOr,
            TokenKind::Caret => Self::BitXor,
            TokenKind::ShiftLeft => Self::Shl,
            TokenKind::ShiftRight => Self::Shr,
            TokenKind::EqualEqual => Self::Eq,
            TokenKind::BangEqual => Self::NotEq,
            TokenKind::Less => Self::Lt,
            TokenKind::LessEqual => Self::LtEq,
            TokenKind::Greater => Self::Gt,
            TokenKind::GreaterEqual => Self::GtEq,
            TokenKind::AmpAmp => Self::And,
            TokenKind::PipePipe => Self::Or,
            _ => return None,
        })
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    PreInc,
    PreDec,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::PreInc => "++",
            Self::PreDec => "--",
        }
    }

    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Minus => Self::Neg,
            TokenKind::Plus => Self::Plus,
            TokenKind::Bang => Self::Not,
            TokenKind::Tilde => Self::BitNot,
            TokenKind::PlusPlus => Self::PreInc,
            TokenKind::MinusMinus => Self::PreDec,
            _ => return None,
        })
    }

    /// Whether the operand must be assignable.
    pub const fn mutates(self) -> bool {
        matches!(self, Self::PreInc | Self::PreDec)
    }
}

/// `=`, a compound assignment, or `~=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
    /// `a ~= b` stores `~b` into `a`.
    Complement,
}

impl AssignOp {
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Equal => Self::Assign,
            TokenKind::PlusEqual => Self::Compound(BinaryOp::Add),
            TokenKind::MinusEqual => Self::Compound(BinaryOp::Sub),
            TokenKind::StarEqual => Self::Compound(BinaryOp::Mul),
            TokenKind::SlashEqual => Self::Compound(BinaryOp::Div),
            TokenKind::PercentEqual => Self::Compound(BinaryOp::Mod),
            TokenKind::AmpEqual => Self::Compound(BinaryOp::BitAnd),
            TokenKind::PipeEqual => Self::Compound(BinaryOp::BitOr),
            TokenKind::CaretEqual => Self::Compound(BinaryOp::BitXor),
            TokenKind::TildeEqual => Self::Complement,
            _ => return None,
        })
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Compound(BinaryOp::Add) => "+=",
            Self::Compound(BinaryOp::Sub) => "-=",
            Self::Compound(BinaryOp::Mul) => "*=",
            Self::Compound(BinaryOp::Div) => "/=",
            Self::Compound(BinaryOp::Mod) => "%=",
            Self::Compound(BinaryOp::BitAnd) => "&=",
            Self::Compound(BinaryOp::BitOr) => "|=",
            Self::Compound(BinaryOp::BitXor) => "^=",
            Self::Compound(op) => op.as_symbol(),
            Self::Complement => "~=",
        }
    }
}
