//! Pool-backed AST.
//!
//! Nodes live in two [`Pool`]s and refer to each other by id. Child lists
//! (call arguments, block bodies) are exact-length ranges into flat side
//! tables, so a node never owns heap memory of its own.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprFlags, ExprKind};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind};

use cpc_alloc::{AllocError, Pool};
use smallvec::SmallVec;

use crate::{ExprId, ExprRange, StmtId, StmtRange};

/// Storage for every expression and statement of one compilation unit.
pub struct AstArena {
    exprs: Pool<Expr, ExprId>,
    stmts: Pool<Stmt, StmtId>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
}

#[derive(Copy, Clone)]
enum NodeId {
    Expr(ExprId),
    Stmt(StmtId),
}

impl AstArena {
    pub fn new() -> Self {
        Self::with_max_slots(cpc_alloc::DEFAULT_POOL_SLOTS)
    }

    /// Arena whose node pools each hold at most `max_slots` live nodes.
    pub fn with_max_slots(max_slots: usize) -> Self {
        AstArena {
            exprs: Pool::with_max_slots(max_slots),
            stmts: Pool::with_max_slots(max_slots),
            expr_lists: Vec::new(),
            stmt_lists: Vec::new(),
        }
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> Result<ExprId, AllocError> {
        self.exprs.alloc(expr)
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> Result<StmtId, AllocError> {
        self.stmts.alloc(stmt)
    }

    /// Copy `ids` into an exact-length list.
    pub fn alloc_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        let range = ExprRange::new(list_index(self.expr_lists.len()), list_index(ids.len()));
        self.expr_lists.extend_from_slice(ids);
        range
    }

    pub fn alloc_stmt_list(&mut self, ids: &[StmtId]) -> StmtRange {
        let range = StmtRange::new(list_index(self.stmt_lists.len()), list_index(ids.len()));
        self.stmt_lists.extend_from_slice(ids);
        range
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    #[inline]
    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id]
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.to_range()]
    }

    /// Live expression nodes.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Live statement nodes.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Overwrite `id` with `replacement` and return the replaced node's
    /// children to the pool. Returns the number of nodes released.
    pub fn replace_expr(&mut self, id: ExprId, replacement: Expr) -> usize {
        let old = std::mem::replace(&mut self.exprs[id], replacement);
        let mut work = SmallVec::<[NodeId; 16]>::new();
        self.push_expr_children(&old.kind, &mut work);
        self.release(work)
    }

    /// Release `id` and everything below it.
    pub fn release_expr(&mut self, id: ExprId) -> usize {
        self.release(smallvec::smallvec![NodeId::Expr(id)])
    }

    pub fn release_stmt(&mut self, id: StmtId) -> usize {
        self.release(smallvec::smallvec![NodeId::Stmt(id)])
    }

    /// Iterative so that deep trees cannot exhaust the stack.
    fn release(&mut self, mut work: SmallVec<[NodeId; 16]>) -> usize {
        let mut released = 0;
        while let Some(node) = work.pop() {
            match node {
                NodeId::Expr(id) => {
                    if let Some(expr) = self.exprs.dealloc(id) {
                        released += 1;
                        self.push_expr_children(&expr.kind, &mut work);
                    }
                }
                NodeId::Stmt(id) => {
                    if let Some(stmt) = self.stmts.dealloc(id) {
                        released += 1;
                        self.push_stmt_children(&stmt.kind, &mut work);
                    }
                }
            }
        }
        released
    }

    fn push_expr_children(&self, kind: &ExprKind, work: &mut SmallVec<[NodeId; 16]>) {
        match *kind {
            ExprKind::Unary { operand, .. } => work.push(NodeId::Expr(operand)),
            ExprKind::Binary { left, right, .. } => {
                work.push(NodeId::Expr(left));
                work.push(NodeId::Expr(right));
            }
            ExprKind::Assign { target, value, .. } => {
                work.push(NodeId::Expr(target));
                work.push(NodeId::Expr(value));
            }
            ExprKind::Call { args, .. } => {
                work.extend(self.expr_list(args).iter().map(|&arg| NodeId::Expr(arg)));
            }
            ExprKind::Member { object, .. } => work.push(NodeId::Expr(object)),
            ExprKind::Lambda { body, .. } => work.push(NodeId::Stmt(body)),
            ExprKind::Group(inner) => work.push(NodeId::Expr(inner)),
            ExprKind::Error
            | ExprKind::Int(_)
            | ExprKind::Long(_)
            | ExprKind::Float(_)
            | ExprKind::Double(_)
            | ExprKind::Bool(_)
            | ExprKind::Char(_)
            | ExprKind::Str(_)
            | ExprKind::Var(_) => {}
        }
    }

    fn push_stmt_children(&self, kind: &StmtKind, work: &mut SmallVec<[NodeId; 16]>) {
        match *kind {
            StmtKind::Expr(expr) | StmtKind::Print(expr) | StmtKind::Return(Some(expr)) => {
                work.push(NodeId::Expr(expr));
            }
            StmtKind::Block(body) | StmtKind::Namespace { body, .. } => {
                work.extend(self.stmt_list(body).iter().map(|&stmt| NodeId::Stmt(stmt)));
            }
            StmtKind::VarDecl {
                init: Some(init), ..
            } => work.push(NodeId::Expr(init)),
            StmtKind::FuncDecl {
                body: Some(body), ..
            } => work.push(NodeId::Stmt(body)),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                work.push(NodeId::Expr(cond));
                work.push(NodeId::Stmt(then_branch));
                if let Some(else_branch) = else_branch {
                    work.push(NodeId::Stmt(else_branch));
                }
            }
            StmtKind::While { cond, body } | StmtKind::DoWhile { body, cond } => {
                work.push(NodeId::Expr(cond));
                work.push(NodeId::Stmt(body));
            }
            StmtKind::Error
            | StmtKind::Return(None)
            | StmtKind::VarDecl { init: None, .. }
            | StmtKind::FuncDecl { body: None, .. }
            | StmtKind::StructDecl { .. }
            | StmtKind::EnumDecl { .. }
            | StmtKind::Using(_) => {}
        }
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "list tables are bounded by the pool slot ceiling"
)]
fn list_index(len: usize) -> u32 {
    len as u32
}
