//! Type parsing.
//!
//! ```text
//! type      = basic | "func" signature | identifier
//! signature = "(" [ param { "," param } ] ")" [ "->" type ]
//! param     = type [ identifier ] | "..."
//! ```

use cpc_diagnostic::{Diagnostic, ErrorCode};
use cpc_ir::{Name, TokenKind, TypeId};
use smallvec::SmallVec;

use crate::{describe, PResult, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> PResult<TypeId> {
        cpc_stack::with_stack(|| {
            let token = self.current();
            let ty = match token.kind {
                TokenKind::Int => TypeId::INTEGER,
                TokenKind::Long => TypeId::LONG,
                TokenKind::Float => TypeId::FLOAT,
                TokenKind::Double => TypeId::DOUBLE,
                TokenKind::Bool => TypeId::BOOL,
                TokenKind::Char => TypeId::CHAR,
                TokenKind::Cstring => TypeId::CSTRING,
                TokenKind::Void => TypeId::VOID,
                TokenKind::Func => {
                    self.advance();
                    return self.parse_function_signature();
                }
                TokenKind::Ident => return self.parse_named_type(),
                kind if kind.is_type_keyword() => {
                    let diag = Diagnostic::error(ErrorCode::E1003)
                        .with_message(format!("type `{}` is not supported", kind.describe()))
                        .with_label(token.span, "unsupported type");
                    return Err(self.diagnostics.emit(diag, token.line, token.col).into());
                }
                _ => return Err(self.expected_type()),
            };
            self.advance();
            Ok(ty)
        })
    }

    /// Parameter list and return type after `func`. A missing return type
    /// means `void`; a trailing `...` accepts any number of extra
    /// arguments.
    pub(crate) fn parse_function_signature(&mut self) -> PResult<TypeId> {
        self.expect(TokenKind::OpenParen)?;
        let mut params = SmallVec::<[TypeId; 8]>::new();
        let mut names = SmallVec::<[Name; 8]>::new();
        let mut variadic = false;
        if !self.check(TokenKind::CloseParen) {
            loop {
                if self.eat(TokenKind::Ellipsis) {
                    variadic = true;
                    break;
                }
                params.push(self.parse_type()?);
                let name = if self.check(TokenKind::Ident) {
                    self.expect_ident()?.0
                } else {
                    Name::EMPTY
                };
                names.push(name);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen)?;
        let ret = if self.eat(TokenKind::ThinArrow) {
            self.parse_type()?
        } else {
            TypeId::VOID
        };
        let ty = self.types.make_function(
            &params,
            &names,
            ret,
            variadic,
            &mut self.interner,
            &self.scratch,
        )?;
        Ok(ty)
    }

    /// A struct or enum name. Unknown names are reported and parse as the
    /// invalid type.
    fn parse_named_type(&mut self) -> PResult<TypeId> {
        let (name, span) = self.expect_ident()?;
        if let Some(ty) = self.env().resolve_type_name(name) {
            return Ok(ty);
        }
        self.report(
            ErrorCode::E2010,
            span,
            format!("unknown type `{}`", self.interner.lookup(name)),
            "not found in this scope",
        );
        Ok(TypeId::INVALID)
    }

    #[cold]
    fn expected_type(&mut self) -> ParseError {
        let found = self.current();
        let diag = Diagnostic::error(ErrorCode::E1003)
            .with_message(format!("expected type, found {}", describe(found.kind)))
            .with_label(found.span, "expected type");
        self.diagnostics.emit(diag, found.line, found.col).into()
    }
}
