//! Expression parsing.
//!
//! Precedence climbing over the table in [`operators`]. Unary operators
//! bind tighter than every infix operator and looser than the postfix
//! call and member forms.
//!
//! Every node records two facts as it is built: `CAN_ASSIGN` for lvalues
//! (variables and their members) and `IS_CONSTANT` when all leaves are
//! literals or folded `const` bindings. The folder only looks at the
//! latter.

mod operators;
mod primary;

use cpc_diagnostic::ErrorCode;
use cpc_fold::Value;
use cpc_ir::{
    AssignOp, BinaryOp, Expr, ExprFlags, ExprId, ExprKind, Span, TokenKind, TypeId, UnaryOp,
};
use smallvec::SmallVec;

use crate::{PResult, Parser};

pub use operators::Prec;

impl Parser<'_> {
    /// Parse an expression whose infix operators all bind at least as
    /// tightly as `min_prec`.
    ///
    /// `is_rhs` marks a value position (operand, argument, condition,
    /// initializer). Assignment is only an operator outside value
    /// positions; inside one, `=` ends the expression.
    pub(crate) fn parse_expr(&mut self, min_prec: Prec, is_rhs: bool) -> PResult<ExprId> {
        cpc_stack::with_stack(|| {
            let mut left = self.parse_unary()?;
            loop {
                let prec = Prec::of(self.current_kind());
                if prec == Prec::None || prec < min_prec {
                    break;
                }
                left = match prec {
                    Prec::Assign if is_rhs => break,
                    Prec::Assign => self.parse_assign(left)?,
                    Prec::Call => self.parse_postfix(left)?,
                    _ => self.parse_binary(left, prec)?,
                };
            }
            Ok(left)
        })
    }

    /// A whole expression in value position.
    #[inline]
    pub(crate) fn parse_value(&mut self) -> PResult<ExprId> {
        self.parse_expr(Prec::Assign, true)
    }

    fn parse_binary(&mut self, left: ExprId, prec: Prec) -> PResult<ExprId> {
        let Some(op) = BinaryOp::from_token(self.current_kind()) else {
            return Err(self.unexpected("a binary operator"));
        };
        self.advance();
        let right = self.parse_expr(prec.next(), true)?;

        let (lhs, rhs) = (self.ast.expr(left), self.ast.expr(right));
        let span = lhs.span.merge(rhs.span);
        let flags = constant_if(lhs.is_constant() && rhs.is_constant());
        self.alloc_expr(ExprKind::Binary { op, left, right }, span, flags)
    }

    /// `target op= value`, right-associative.
    fn parse_assign(&mut self, target: ExprId) -> PResult<ExprId> {
        let op_token = self.current();
        let Some(op) = AssignOp::from_token(op_token.kind) else {
            return Err(self.unexpected("an assignment operator"));
        };
        self.advance();
        let value = self.parse_expr(Prec::Assign, false)?;

        let target_expr = *self.ast.expr(target);
        let span = target_expr.span.merge(self.ast.expr(value).span);
        if !target_expr.can_assign() {
            self.report(
                ErrorCode::E1004,
                target_expr.span,
                format!("invalid left-hand side of `{}`", op.as_symbol()),
                "cannot be assigned to",
            );
            self.ast.release_expr(target);
            self.ast.release_expr(value);
            return self.error_expr(span);
        }
        self.alloc_expr(ExprKind::Assign { op, target, value }, span, ExprFlags::empty())
    }

    /// Prefix operators, then a primary with its postfix forms.
    fn parse_unary(&mut self) -> PResult<ExprId> {
        let Some(op) = UnaryOp::from_token(self.current_kind()) else {
            return self.parse_primary();
        };
        let op_span = self.advance().span;
        let operand = self.parse_expr(Prec::Call, true)?;

        let operand_expr = *self.ast.expr(operand);
        let span = op_span.merge(operand_expr.span);
        if op.mutates() && !operand_expr.can_assign() {
            self.report(
                ErrorCode::E1004,
                operand_expr.span,
                format!("`{}` needs an assignable operand", op.as_symbol()),
                "cannot be modified",
            );
            self.ast.release_expr(operand);
            return self.error_expr(span);
        }
        let flags = constant_if(operand_expr.is_constant() && !op.mutates());
        self.alloc_expr(ExprKind::Unary { op, operand }, span, flags)
    }

    /// `callee(args)` or `object.field`.
    fn parse_postfix(&mut self, left: ExprId) -> PResult<ExprId> {
        let object = *self.ast.expr(left);
        if self.eat(TokenKind::Dot) {
            let (field, field_span) = self.expect_ident()?;
            let flags = if object.can_assign() {
                ExprFlags::CAN_ASSIGN
            } else {
                ExprFlags::empty()
            };
            let span = object.span.merge(field_span);
            return self.alloc_expr(ExprKind::Member { object: left, field }, span, flags);
        }

        self.expect(TokenKind::OpenParen)?;
        let mut args = SmallVec::<[ExprId; 8]>::new();
        if !self.check(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_value()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen)?;
        let span = object.span.merge(self.previous_span());

        let ExprKind::Var(callee) = object.kind else {
            self.report(
                ErrorCode::E1001,
                object.span,
                "only named functions can be called".to_owned(),
                "not a function name",
            );
            self.ast.release_expr(left);
            for arg in args {
                self.ast.release_expr(arg);
            }
            return self.error_expr(span);
        };
        let args = self.ast.alloc_expr_list(&args);
        let call = ExprKind::Call {
            callee,
            args,
            mangled: None,
        };
        // The callee's variable node becomes the call node.
        self.ast.replace_expr(left, Expr::new(call, span));
        Ok(left)
    }

    /// Type-check a complete expression, then fold it.
    pub(crate) fn finish_expr(&mut self, id: ExprId) -> TypeId {
        let ty = self.checker().check_expr(id);
        self.fold(id);
        ty
    }

    /// Fold the constant subtrees of an already checked expression.
    pub(crate) fn fold(&mut self, id: ExprId) -> Option<Value> {
        if !self.options.fold_constants {
            return None;
        }
        self.folder.fold(&mut self.ast, id, self.scope.depth())
    }

    pub(crate) fn alloc_expr(
        &mut self,
        kind: ExprKind,
        span: Span,
        flags: ExprFlags,
    ) -> PResult<ExprId> {
        Ok(self.ast.alloc_expr(Expr::new(kind, span).with_flags(flags))?)
    }

    fn error_expr(&mut self, span: Span) -> PResult<ExprId> {
        self.alloc_expr(ExprKind::Error, span, ExprFlags::empty())
    }
}

#[inline]
fn constant_if(constant: bool) -> ExprFlags {
    if constant {
        ExprFlags::IS_CONSTANT
    } else {
        ExprFlags::empty()
    }
}
