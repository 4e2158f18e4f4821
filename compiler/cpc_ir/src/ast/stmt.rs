//! Statement nodes.

use std::fmt;

use crate::{ExprId, Name, Span, StmtId, StmtRange, TypeId};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Placeholder produced after a syntax error.
    Error,
    Expr(ExprId),
    Block(StmtRange),
    Return(Option<ExprId>),
    Print(ExprId),
    VarDecl {
        name: Name,
        ty: TypeId,
        init: Option<ExprId>,
        is_const: bool,
    },
    /// Function declaration. `body` is `None` for `native` functions.
    FuncDecl {
        name: Name,
        mangled: Name,
        ty: TypeId,
        body: Option<StmtId>,
        is_native: bool,
    },
    StructDecl {
        name: Name,
        ty: TypeId,
    },
    EnumDecl {
        name: Name,
        ty: TypeId,
    },
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    DoWhile {
        body: StmtId,
        cond: ExprId,
    },
    Namespace {
        name: Name,
        body: StmtRange,
    },
    Using(Name),
}
