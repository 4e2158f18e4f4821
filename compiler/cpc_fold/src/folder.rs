//! Folding driver and constant bindings.

use cpc_ir::{AstArena, ExprId, ExprKind, Name};
use cpc_symbols::ScopedKey;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{lower, run, Chunk, FoldError, Value};

/// Folds constant subtrees and remembers the values of folded `const`
/// declarations, keyed by (name, depth) like the symbol tables.
#[derive(Default, Debug)]
pub struct Folder {
    bindings: FxHashMap<ScopedKey, Value>,
}

impl Folder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value of a `const` declared at `depth`.
    pub fn bind(&mut self, name: Name, depth: u32, value: Value) {
        self.bindings.insert(ScopedKey::new(name, depth), value);
    }

    /// Forget a binding shadowed by a non-constant redeclaration.
    pub fn unbind(&mut self, name: Name, depth: u32) -> Option<Value> {
        self.bindings.remove(&ScopedKey::new(name, depth))
    }

    /// Binding declared exactly at `depth`.
    pub fn binding_at(&self, name: Name, depth: u32) -> Option<Value> {
        self.bindings.get(&ScopedKey::new(name, depth)).copied()
    }

    /// Innermost binding visible from `depth`.
    pub fn binding(&self, name: Name, depth: u32) -> Option<Value> {
        (0..=depth)
            .rev()
            .find_map(|d| self.binding_at(name, d))
    }

    pub fn is_bound(&self, name: Name, depth: u32) -> bool {
        self.binding(name, depth).is_some()
    }

    /// Drop every binding declared at `depth`.
    pub fn leave_scope(&mut self, depth: u32) {
        self.bindings.retain(|key, _| key.depth != depth);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Lower `id` and run it without touching the AST.
    pub fn evaluate(&self, ast: &AstArena, id: ExprId, depth: u32) -> Result<Value, FoldError> {
        let mut chunk = Chunk::new();
        lower(ast, id, &|name| self.is_bound(name, depth), &mut chunk)?;
        run(&chunk, |name| self.binding(name, depth))
    }

    /// Replace every maximal constant subtree under `id` with a literal.
    ///
    /// Returns the value of `id` when it is (or became) a literal.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn fold(&self, ast: &mut AstArena, id: ExprId, depth: u32) -> Option<Value> {
        self.fold_expr(ast, id, depth)
    }

    fn fold_expr(&self, ast: &mut AstArena, id: ExprId, depth: u32) -> Option<Value> {
        cpc_stack::with_stack(|| {
            let expr = *ast.expr(id);
            if let Some(value) = Value::from_literal(&expr.kind) {
                return Some(value);
            }
            if expr.is_constant() {
                match self.evaluate(ast, id, depth) {
                    Ok(value) => {
                        let released = ast.replace_expr(id, value.to_literal(expr.span));
                        tracing::debug!(?value, released, "folded constant subtree");
                        return Some(value);
                    }
                    Err(error) => tracing::debug!(%error, "constant subtree left in place"),
                }
            }

            let mut children = SmallVec::<[ExprId; 4]>::new();
            match expr.kind {
                ExprKind::Unary { operand, .. } => children.push(operand),
                ExprKind::Binary { left, right, .. } => children.extend([left, right]),
                ExprKind::Assign { value, .. } => children.push(value),
                ExprKind::Call { args, .. } => children.extend_from_slice(ast.expr_list(args)),
                ExprKind::Member { object, .. } => children.push(object),
                ExprKind::Group(inner) => children.push(inner),
                _ => {}
            }
            for child in children {
                self.fold_expr(ast, child, depth);
            }
            None
        })
    }
}
