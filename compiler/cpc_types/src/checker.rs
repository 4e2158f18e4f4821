//! Expression inference and statement checks.

use cpc_alloc::ScratchPool;
use cpc_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, LineIndex};
use cpc_ir::{
    AssignOp, AstArena, BinaryOp, ExprId, ExprKind, ExprRange, Name, Span, StringInterner,
    TypeArena, TypeId, TypeKind, UnaryOp,
};
use cpc_symbols::{Scope, SymbolTables};
use smallvec::SmallVec;

use crate::operators::{check_binary, check_unary, OpResult};

/// Read-only state the checker consults.
#[derive(Copy, Clone)]
pub struct CheckEnv<'a> {
    pub types: &'a TypeArena,
    pub interner: &'a StringInterner,
    pub symbols: &'a SymbolTables,
    pub scope: &'a Scope,
    pub scratch: &'a ScratchPool,
    pub lines: &'a LineIndex,
}

/// Checks one expression or statement at a time.
///
/// The checker is cheap to build; the parser creates one per statement
/// from its own tables.
pub struct TypeChecker<'a> {
    env: CheckEnv<'a>,
    ast: &'a mut AstArena,
    diagnostics: &'a mut DiagnosticQueue,
}

impl<'a> TypeChecker<'a> {
    pub fn new(
        env: CheckEnv<'a>,
        ast: &'a mut AstArena,
        diagnostics: &'a mut DiagnosticQueue,
    ) -> Self {
        TypeChecker {
            env,
            ast,
            diagnostics,
        }
    }

    /// Infer the type of `id` and every node below it.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn check_expr(&mut self, id: ExprId) -> TypeId {
        self.infer(id)
    }

    /// `return value;` inside a function returning `expected`. `None` means
    /// top level, where any value is accepted.
    pub fn check_return(&mut self, value: Option<ExprId>, expected: Option<TypeId>, span: Span) {
        let actual = value.map(|id| (id, self.infer(id)));
        let Some(expected) = expected.filter(|&ty| ty != TypeId::INVALID) else {
            return;
        };
        match actual {
            None if expected != TypeId::VOID => {
                let message = format!("missing return value of type `{}`", self.describe(expected));
                self.report(ErrorCode::E2002, span, message, "return without a value");
            }
            None | Some((_, TypeId::INVALID)) => {}
            Some((id, ty)) if expected == TypeId::VOID => {
                if ty != TypeId::VOID {
                    let message = format!(
                        "function returning `Void` cannot return a value of type `{}`",
                        self.describe(ty)
                    );
                    self.report(ErrorCode::E2002, self.span(id), message, "unexpected value");
                }
            }
            Some((id, ty)) => {
                if ty == TypeId::VOID || !self.env.types.compatible(ty, expected) {
                    let message = format!(
                        "expected return type `{}`, found `{}`",
                        self.describe(expected),
                        self.describe(ty)
                    );
                    self.report(ErrorCode::E2002, self.span(id), message, "returned here");
                }
            }
        }
    }

    pub fn check_print(&mut self, value: ExprId) {
        let ty = self.infer(value);
        let types = self.env.types;
        let printable = ty == TypeId::INVALID
            || ty == TypeId::BOOL
            || ty == TypeId::CSTRING
            || types.is_numeric(ty)
            || matches!(types.kind(ty), TypeKind::Enum { .. });
        if !printable {
            let message = format!("cannot print a value of type `{}`", self.describe(ty));
            self.report(ErrorCode::E2003, self.span(value), message, "not printable");
        }
    }

    /// `if`, `while` and `do ... while` conditions.
    pub fn check_condition(&mut self, cond: ExprId) {
        let ty = self.infer(cond);
        let ok = ty == TypeId::INVALID || ty == TypeId::BOOL || self.env.types.is_numeric(ty);
        if !ok {
            let message = format!(
                "condition must be `Bool` or numeric, found `{}`",
                self.describe(ty)
            );
            self.report(ErrorCode::E2009, self.span(cond), message, "condition");
        }
    }

    /// Initializer of `name : declared = init`. With no declared type
    /// (`name := init`) the initializer's type is adopted. Returns the type
    /// the variable gets.
    pub fn check_initializer(&mut self, name: Name, declared: TypeId, init: ExprId) -> TypeId {
        let ty = self.infer(init);
        if declared == TypeId::INVALID {
            return ty;
        }
        if !self.env.types.compatible(ty, declared) {
            let message = format!(
                "`{}` is declared `{}` but initialized with `{}`",
                self.env.interner.lookup(name),
                self.describe(declared),
                self.describe(ty)
            );
            self.report(ErrorCode::E2007, self.span(init), message, "initializer");
        }
        declared
    }

    fn infer(&mut self, id: ExprId) -> TypeId {
        cpc_stack::with_stack(|| {
            let ty = self.infer_kind(id);
            self.ast.expr_mut(id).ty = ty;
            ty
        })
    }

    fn infer_kind(&mut self, id: ExprId) -> TypeId {
        let expr = *self.ast.expr(id);
        match expr.kind {
            ExprKind::Error => TypeId::INVALID,
            ExprKind::Int(_) => TypeId::INTEGER,
            ExprKind::Long(_) => TypeId::LONG,
            ExprKind::Float(_) => TypeId::FLOAT,
            ExprKind::Double(_) => TypeId::DOUBLE,
            ExprKind::Bool(_) => TypeId::BOOL,
            ExprKind::Char(_) => TypeId::CHAR,
            ExprKind::Str(_) => TypeId::CSTRING,
            ExprKind::Group(inner) => self.infer(inner),
            ExprKind::Lambda { ty, .. } => ty,
            ExprKind::Var(name) => self.infer_var(name, expr.span),
            ExprKind::Unary { op, operand } => self.infer_unary(op, operand, expr.span),
            ExprKind::Binary { op, left, right } => self.infer_binary(op, left, right, expr.span),
            ExprKind::Assign { op, target, value } => {
                self.infer_assign(op, target, value, expr.span)
            }
            ExprKind::Call { callee, args, .. } => self.infer_call(id, callee, args, expr.span),
            ExprKind::Member { object, field } => self.infer_member(object, field, expr.span),
        }
    }

    fn infer_var(&mut self, name: Name, span: Span) -> TypeId {
        if let Some(ty) = self.env.resolve_var(name) {
            return ty;
        }
        let message = format!("undefined variable `{}`", self.env.interner.lookup(name));
        self.report(ErrorCode::E2004, span, message, "not found in this scope");
        TypeId::INVALID
    }

    fn infer_unary(&mut self, op: UnaryOp, operand: ExprId, span: Span) -> TypeId {
        let ty = self.infer(operand);
        let result = check_unary(self.env.types, op, ty);
        if let OpResult::Mismatch { .. } = result {
            let message = format!(
                "operator `{}` cannot be applied to `{}`",
                op.as_symbol(),
                self.describe(ty)
            );
            self.report(ErrorCode::E2001, span, message, "invalid operand");
        }
        result.ty()
    }

    fn infer_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId, span: Span) -> TypeId {
        let lhs = self.infer(left);
        let rhs = self.infer(right);
        self.apply_binary(op.as_symbol(), op, lhs, rhs, span)
    }

    fn apply_binary(
        &mut self,
        symbol: &str,
        op: BinaryOp,
        lhs: TypeId,
        rhs: TypeId,
        span: Span,
    ) -> TypeId {
        let result = check_binary(self.env.types, op, lhs, rhs);
        if let OpResult::Mismatch { .. } = result {
            let message = format!(
                "operator `{symbol}` cannot be applied to `{}` and `{}`",
                self.describe(lhs),
                self.describe(rhs)
            );
            self.report(ErrorCode::E2001, span, message, "mismatched operands");
        }
        result.ty()
    }

    fn infer_assign(&mut self, op: AssignOp, target: ExprId, value: ExprId, span: Span) -> TypeId {
        let target_ty = self.infer(target);
        let value_ty = self.infer(value);
        let stored = match op {
            AssignOp::Assign => value_ty,
            AssignOp::Compound(bin) => {
                self.apply_binary(op.as_symbol(), bin, target_ty, value_ty, span)
            }
            AssignOp::Complement => {
                let result = check_unary(self.env.types, UnaryOp::BitNot, value_ty);
                if let OpResult::Mismatch { .. } = result {
                    let message = format!(
                        "operator `~=` cannot be applied to `{}` and `{}`",
                        self.describe(target_ty),
                        self.describe(value_ty)
                    );
                    self.report(ErrorCode::E2001, span, message, "mismatched operands");
                }
                result.ty()
            }
        };
        if !self.env.types.compatible(stored, target_ty) {
            let message = format!(
                "cannot assign `{}` to `{}`",
                self.describe(stored),
                self.describe(target_ty)
            );
            self.report(ErrorCode::E2011, self.span(value), message, "assigned here");
        }
        target_ty
    }

    fn infer_call(&mut self, id: ExprId, callee: Name, args: ExprRange, span: Span) -> TypeId {
        let arg_ids: SmallVec<[ExprId; 8]> = self.ast.expr_list(args).iter().copied().collect();
        let arg_types: SmallVec<[TypeId; 8]> = arg_ids.iter().map(|&arg| self.infer(arg)).collect();

        if let Some(resolved) = self.env.resolve_call(callee, &arg_types) {
            if let ExprKind::Call { mangled, .. } = &mut self.ast.expr_mut(id).kind {
                *mangled = Some(resolved.mangled);
            }
            return resolved.ret;
        }

        let name = self.env.interner.lookup(callee);
        if self.env.function_declared(callee) {
            let listed: Vec<String> = arg_types
                .iter()
                .map(|&ty| format!("`{}`", self.describe(ty)))
                .collect();
            let message = format!("no overload of `{name}` accepts ({})", listed.join(", "));
            self.report(ErrorCode::E2005, span, message, "no matching overload");
        } else {
            let message = format!("undefined function `{name}`");
            self.report(ErrorCode::E2006, span, message, "not found in this scope");
        }
        TypeId::INVALID
    }

    fn infer_member(&mut self, object: ExprId, field: Name, span: Span) -> TypeId {
        // `Color.Red`: an enum name in value position.
        if let ExprKind::Var(name) = self.ast.expr(object).kind {
            if self.env.resolve_var(name).is_none() {
                if let Some(enum_ty) = self.env.resolve_type_name(name) {
                    self.ast.expr_mut(object).ty = enum_ty;
                    return self.enum_variant(enum_ty, field, span);
                }
            }
        }

        let object_ty = self.infer(object);
        match *self.env.types.kind(object_ty) {
            TypeKind::Invalid => TypeId::INVALID,
            TypeKind::Struct { fields, .. } => {
                if let Some(found) = self
                    .env
                    .types
                    .fields(fields)
                    .iter()
                    .find(|f| f.name == field)
                {
                    return found.ty;
                }
                self.unknown_field(object_ty, field, span);
                TypeId::INVALID
            }
            TypeKind::Enum { .. } => self.enum_variant(object_ty, field, span),
            _ => {
                self.unknown_field(object_ty, field, span);
                TypeId::INVALID
            }
        }
    }

    fn enum_variant(&mut self, enum_ty: TypeId, variant: Name, span: Span) -> TypeId {
        if let TypeKind::Enum { variants, .. } = *self.env.types.kind(enum_ty) {
            if self.env.types.variants(variants).contains(&variant) {
                return enum_ty;
            }
        }
        self.unknown_field(enum_ty, variant, span);
        TypeId::INVALID
    }

    #[cold]
    fn unknown_field(&mut self, ty: TypeId, field: Name, span: Span) {
        let message = format!(
            "`{}` has no member `{}`",
            self.describe(ty),
            self.env.interner.lookup(field)
        );
        self.report(ErrorCode::E2008, span, message, "unknown member");
    }

    fn describe(&self, ty: TypeId) -> &'a str {
        self.env.types.describe(ty, self.env.interner)
    }

    #[inline]
    fn span(&self, id: ExprId) -> Span {
        self.ast.expr(id).span
    }

    fn report(&mut self, code: ErrorCode, span: Span, message: String, label: &str) {
        let diag = Diagnostic::error(code)
            .with_message(message)
            .with_label(span, label);
        self.diagnostics.emit_spanned(diag, self.env.lines);
    }
}
