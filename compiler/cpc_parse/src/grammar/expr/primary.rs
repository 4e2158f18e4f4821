//! Primary expressions: literals, names, groups and function literals.

use cpc_diagnostic::{Diagnostic, ErrorCode};
use cpc_ir::{ExprFlags, ExprId, ExprKind, Name, TokenKind};
use cpc_lexer::literal;

use super::Prec;
use crate::{describe, PResult, ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> PResult<ExprId> {
        let token = self.current();
        let lexeme = self.cursor.lexeme(token);
        let (kind, target) = match token.kind {
            TokenKind::IntLit => (literal::int_value(lexeme).map(ExprKind::Int), "int"),
            TokenKind::LongLit => (literal::long_value(lexeme).map(ExprKind::Long), "long"),
            TokenKind::FloatLit => (literal::float_value(lexeme).map(ExprKind::Float), "float"),
            TokenKind::DoubleLit => (literal::double_value(lexeme).map(ExprKind::Double), "double"),
            TokenKind::CharLit => (literal::char_value(lexeme).map(ExprKind::Char), "char"),
            TokenKind::True => (Some(ExprKind::Bool(true)), "bool"),
            TokenKind::False => (Some(ExprKind::Bool(false)), "bool"),
            TokenKind::StringLit => {
                self.advance();
                let text = self.interner.try_intern(literal::string_contents(lexeme))?;
                return self.alloc_expr(ExprKind::Str(text), token.span, ExprFlags::empty());
            }
            TokenKind::Ident => return self.parse_variable(),
            TokenKind::OpenParen => return self.parse_group(),
            TokenKind::Func => return self.parse_lambda(),
            _ => return Err(self.expected_expression()),
        };
        self.advance();

        if let Some(kind) = kind {
            return self.alloc_expr(kind, token.span, ExprFlags::IS_CONSTANT);
        }
        self.report(
            ErrorCode::E1006,
            token.span,
            format!("literal `{lexeme}` does not fit in `{target}`"),
            "out of range",
        );
        self.error_expr(token.span)
    }

    /// A variable reference. References to a folded `const` are constant
    /// instead of assignable.
    fn parse_variable(&mut self) -> PResult<ExprId> {
        let (name, span) = self.expect_ident()?;
        let flags = if self.is_constant_binding(name) {
            ExprFlags::IS_CONSTANT
        } else {
            ExprFlags::CAN_ASSIGN
        };
        self.alloc_expr(ExprKind::Var(name), span, flags)
    }

    /// Whether the innermost declaration of `name` is a folded constant.
    fn is_constant_binding(&self, name: Name) -> bool {
        self.symbols
            .vars
            .resolve(name, self.depth())
            .is_some_and(|(_, depth)| self.folder.binding_at(name, depth).is_some())
    }

    fn parse_group(&mut self) -> PResult<ExprId> {
        let open = self.advance().span;
        let inner = self.parse_expr(Prec::Assign, true)?;
        self.expect(TokenKind::CloseParen)?;
        let span = open.merge(self.previous_span());
        let flags = if self.ast.expr(inner).is_constant() {
            ExprFlags::IS_CONSTANT
        } else {
            ExprFlags::empty()
        };
        self.alloc_expr(ExprKind::Group(inner), span, flags)
    }

    /// `func(params) -> ret { body }` in expression position.
    fn parse_lambda(&mut self) -> PResult<ExprId> {
        let start = self.advance().span;
        let ty = self.parse_function_signature()?;
        let body = self.parse_function_body(ty)?;
        let span = start.merge(self.previous_span());
        self.alloc_expr(ExprKind::Lambda { ty, body }, span, ExprFlags::empty())
    }

    #[cold]
    fn expected_expression(&mut self) -> ParseError {
        let found = self.current();
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message(format!("expected expression, found {}", describe(found.kind)))
            .with_label(found.span, "expected expression");
        self.diagnostics.emit(diag, found.line, found.col).into()
    }
}
