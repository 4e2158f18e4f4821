//! Expression nodes.

use std::fmt;

use bitflags::bitflags;

use super::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::{ExprId, ExprRange, Name, Span, StmtId, TypeId};

bitflags! {
    /// Per-node facts recorded while parsing and checking.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ExprFlags: u8 {
        /// The node is an lvalue.
        const CAN_ASSIGN = 1 << 0;
        /// Every leaf is a literal or a folded constant binding.
        const IS_CONSTANT = 1 << 1;
    }
}

/// Expression node.
#[derive(Copy, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Resolved type; [`TypeId::INVALID`] until checked.
    pub ty: TypeId,
    pub flags: ExprFlags,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            ty: TypeId::INVALID,
            flags: ExprFlags::empty(),
            span,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ExprFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn can_assign(&self) -> bool {
        self.flags.contains(ExprFlags::CAN_ASSIGN)
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.flags.contains(ExprFlags::IS_CONSTANT)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?} @ {:?}", self.kind, self.ty, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// Placeholder produced after a syntax error.
    Error,

    // Literals
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(u8),
    /// String literal with quotes stripped and escapes left as written.
    Str(Name),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },

    /// Variable reference.
    Var(Name),
    /// Call by name. `mangled` is filled in once overload resolution picks
    /// a target.
    Call {
        callee: Name,
        args: ExprRange,
        mangled: Option<Name>,
    },
    Member {
        object: ExprId,
        field: Name,
    },
    /// Function literal. `ty` is a function type.
    Lambda {
        ty: TypeId,
        body: StmtId,
    },
    /// Parenthesized expression.
    Group(ExprId),
}

impl ExprKind {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Int(_)
                | ExprKind::Long(_)
                | ExprKind::Float(_)
                | ExprKind::Double(_)
                | ExprKind::Bool(_)
                | ExprKind::Char(_)
                | ExprKind::Str(_)
        )
    }
}
