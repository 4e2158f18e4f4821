//! Statement parsing.
//!
//! Every statement starts a new diagnostic latch window. Control flow and
//! blocks live here; declarations are in [`decl`].

mod decl;

use cpc_ir::{ExprId, Name, Span, Stmt, StmtId, StmtKind, StmtRange, TokenKind, TypeId};
use cpc_symbols::ScopedKey;
use smallvec::SmallVec;

use crate::{PResult, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> PResult<StmtId> {
        cpc_stack::with_stack(|| {
            self.diagnostics.begin_statement();
            match self.current_kind() {
                TokenKind::Return => self.parse_return(),
                TokenKind::Print => self.parse_print(),
                TokenKind::If => self.parse_if(),
                TokenKind::While => self.parse_while(),
                TokenKind::Do => self.parse_do_while(),
                TokenKind::OpenBrace => self.parse_block(),
                TokenKind::Struct => self.parse_struct(),
                TokenKind::Enum => self.parse_enum(),
                TokenKind::Namespace => self.parse_namespace(),
                TokenKind::Using => self.parse_using(),
                TokenKind::Native => self.parse_native(),
                TokenKind::Const => self.parse_const(),
                TokenKind::Ident if self.next_is(TokenKind::Colon) => {
                    let start = self.current_span();
                    self.parse_declaration(false, start)
                }
                TokenKind::Semicolon => {
                    let span = self.advance().span;
                    let empty = self.ast.alloc_stmt_list(&[]);
                    self.alloc_stmt(StmtKind::Block(empty), span)
                }
                _ => self.parse_expr_stmt(),
            }
        })
    }

    fn parse_expr_stmt(&mut self) -> PResult<StmtId> {
        let expr = self.parse_expr(super::Prec::Assign, false)?;
        // Checked before `;` is consumed: advancing past it may report the
        // next statement's lexical errors.
        self.finish_expr(expr);
        self.expect(TokenKind::Semicolon)?;
        let span = self.ast.expr(expr).span.merge(self.previous_span());
        self.alloc_stmt(StmtKind::Expr(expr), span)
    }

    fn parse_return(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_value()?)
        };
        let expected = self.returns.last().copied();
        let return_span = start.merge(self.previous_span());
        self.checker().check_return(value, expected, return_span);
        if let Some(value) = value {
            self.fold(value);
        }
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());
        self.alloc_stmt(StmtKind::Return(value), span)
    }

    fn parse_print(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let value = self.parse_value()?;
        self.checker().check_print(value);
        self.fold(value);
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());
        self.alloc_stmt(StmtKind::Print(value), span)
    }

    fn parse_if(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let cond = self.parse_condition()?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        self.alloc_stmt(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        )
    }

    fn parse_while(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let cond = self.parse_condition()?;
        let body = self.parse_statement()?;
        let span = start.merge(self.previous_span());
        self.alloc_stmt(StmtKind::While { cond, body }, span)
    }

    fn parse_do_while(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let body = self.parse_statement()?;
        self.diagnostics.begin_statement();
        self.expect(TokenKind::While)?;
        let cond = self.parse_condition()?;
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());
        self.alloc_stmt(StmtKind::DoWhile { body, cond }, span)
    }

    fn parse_condition(&mut self) -> PResult<ExprId> {
        let cond = self.parse_value()?;
        self.checker().check_condition(cond);
        self.fold(cond);
        Ok(cond)
    }

    /// `{ statements }` in a scope of its own.
    fn parse_block(&mut self) -> PResult<StmtId> {
        let open = self.expect(TokenKind::OpenBrace)?.span;
        self.enter_scope();
        let body = self.parse_braced_items();
        self.leave_scope();
        let span = open.merge(self.previous_span());
        self.alloc_stmt(StmtKind::Block(body?), span)
    }

    /// Body of a function literal. Parameters are declared in the body's
    /// scope; `return` is checked against the signature's return type.
    pub(crate) fn parse_function_body(&mut self, ty: TypeId) -> PResult<StmtId> {
        let open = self.expect(TokenKind::OpenBrace)?.span;
        let depth = self.enter_scope();
        let ret = match self.types.function(ty) {
            Some(sig) => {
                let params = self.types.params(sig).iter().zip(self.types.param_names(sig));
                for (&param, &name) in params {
                    if name != Name::EMPTY {
                        self.symbols.vars.set(ScopedKey::new(name, depth), param);
                    }
                }
                sig.ret
            }
            None => TypeId::INVALID,
        };
        self.returns.push(ret);
        let body = self.parse_braced_items();
        self.returns.pop();
        self.leave_scope();
        let span = open.merge(self.previous_span());
        self.alloc_stmt(StmtKind::Block(body?), span)
    }

    /// Statements up to and including the closing `}`. The opening brace
    /// has already been consumed.
    ///
    /// Statements that fail are skipped. Items are gathered in a growable
    /// buffer and copied into an exact-length list at the end.
    pub(crate) fn parse_braced_items(&mut self) -> PResult<StmtRange> {
        let mut items = SmallVec::<[StmtId; 16]>::new();
        loop {
            if self.eat(TokenKind::CloseBrace) || self.diagnostics.truncated() {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(self.unexpected("`}`"));
            }
            let start = self.current_span();
            match self.parse_statement() {
                Ok(stmt) => items.push(stmt),
                Err(ParseError::Reported(reported)) => self.synchronize(start, reported),
                Err(error @ ParseError::Alloc(_)) => return Err(error),
            }
        }
        Ok(self.ast.alloc_stmt_list(&items))
    }

    pub(crate) fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> PResult<StmtId> {
        Ok(self.ast.alloc_stmt(Stmt::new(kind, span))?)
    }
}
