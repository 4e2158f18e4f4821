//! AST to bytecode.

use cpc_ir::{AstArena, ExprId, ExprKind, Name};

use crate::{Chunk, FoldError, Opcode, Value};

/// Append code evaluating `id` to `chunk`.
///
/// Literals become `PUSH`, constant-flagged names accepted by `is_bound`
/// become `LOAD`,
/// operators are emitted after their operands. Anything else is
/// [`FoldError::NotConstant`].
pub fn lower(
    ast: &AstArena,
    id: ExprId,
    is_bound: &dyn Fn(Name) -> bool,
    chunk: &mut Chunk,
) -> Result<(), FoldError> {
    cpc_stack::with_stack(|| {
        let expr = ast.expr(id);
        if let Some(value) = Value::from_literal(&expr.kind) {
            return chunk.push_constant(value);
        }
        match expr.kind {
            ExprKind::Group(inner) => lower(ast, inner, is_bound, chunk),
            ExprKind::Var(name) if expr.is_constant() && is_bound(name) => chunk.load(name),
            ExprKind::Binary { op, left, right } => {
                lower(ast, left, is_bound, chunk)?;
                lower(ast, right, is_bound, chunk)?;
                chunk.write_op(Opcode::from_binary(op));
                Ok(())
            }
            ExprKind::Unary { op, operand } => {
                if op.mutates() {
                    return Err(FoldError::NotConstant);
                }
                lower(ast, operand, is_bound, chunk)?;
                if let Some(code) = Opcode::from_unary(op) {
                    chunk.write_op(code);
                }
                Ok(())
            }
            _ => Err(FoldError::NotConstant),
        }
    })
}
