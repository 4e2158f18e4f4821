//! Declarations.
//!
//! ```text
//! x : int = 1;            x := 1;            const k := 2 * 8;
//! f := func(int a) -> int { return a; }
//! native puts : func(cstring s) -> int;
//! struct Point { x : int; y : int; }
//! enum Color { Red, Green, Blue }
//! namespace math { ... }    using math;    using outer.inner;
//! ```
//!
//! Inside a namespace every declared name is stored qualified
//! (`math::f`). Namespaces do not open a scope.

use cpc_diagnostic::ErrorCode;
use cpc_ir::{Field, FuncSig, Name, Span, StmtId, StmtKind, TokenKind, TypeId};
use cpc_symbols::{lookup_qualified, mangle, qualify, Overload, ScopedKey};
use smallvec::SmallVec;

use crate::{PResult, Parser};

impl Parser<'_> {
    /// `const name : type = value;` or `const name := value;`.
    pub(super) fn parse_const(&mut self) -> PResult<StmtId> {
        let is_declaration = self.look_ahead(|p| {
            p.cursor.bump();
            p.check(TokenKind::Ident) && p.next_is(TokenKind::Colon)
        });
        let start = self.advance().span;
        if !is_declaration {
            return Err(self.unexpected("`name :` after `const`"));
        }
        self.parse_declaration(true, start)
    }

    /// `name : type [= value];` or `name := value;`. A function literal
    /// initializer declares a function and takes no `;`.
    pub(super) fn parse_declaration(&mut self, is_const: bool, start: Span) -> PResult<StmtId> {
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let declared = if self.check(TokenKind::Equal) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let init = if self.eat(TokenKind::Equal) {
            if self.check(TokenKind::Func) {
                return self.parse_function_decl(name, declared, start);
            }
            Some(self.parse_value()?)
        } else {
            None
        };

        let declared = declared.unwrap_or(TypeId::INVALID);
        let ty = match init {
            Some(init) => self.checker().check_initializer(name, declared, init),
            None => {
                if is_const {
                    self.report(
                        ErrorCode::E1002,
                        start.merge(self.previous_span()),
                        format!("constant `{}` needs a value", self.interner.lookup(name)),
                        "missing initializer",
                    );
                }
                declared
            }
        };
        let value = init.and_then(|init| self.fold(init));
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());

        let stored = self.declared_name(name)?;
        let depth = self.depth();
        self.symbols.vars.set(ScopedKey::new(stored, depth), ty);
        let binding = value.filter(|value| {
            is_const && self.types.equal(value.to_literal(span).ty, ty)
        });
        match binding {
            Some(value) => self.folder.bind(stored, depth, value),
            None => {
                self.folder.unbind(stored, depth);
            }
        }

        self.alloc_stmt(
            StmtKind::VarDecl {
                name: stored,
                ty,
                init,
                is_const,
            },
            span,
        )
    }

    /// `name : [type] = func(params) -> ret { body }`. The function is
    /// declared before its body is parsed so that it can call itself.
    fn parse_function_decl(
        &mut self,
        name: Name,
        declared: Option<TypeId>,
        start: Span,
    ) -> PResult<StmtId> {
        let func_span = self.advance().span;
        let ty = self.parse_function_signature()?;
        let signature_span = func_span.merge(self.previous_span());
        if let Some(declared) = declared.filter(|&d| d != TypeId::INVALID) {
            if !self.types.equal(declared, ty) {
                let message = format!(
                    "`{}` is declared `{}` but initialized with `{}`",
                    self.interner.lookup(name),
                    self.types.describe(declared, &self.interner),
                    self.types.describe(ty, &self.interner),
                );
                self.report(ErrorCode::E2007, signature_span, message, "initializer");
            }
        }

        let stored = self.declared_name(name)?;
        let mangled = match self.types.function(ty).copied() {
            Some(sig) => self.declare_function(stored, ty, sig, false)?,
            None => stored,
        };
        let body = self.parse_function_body(ty)?;
        let span = start.merge(self.previous_span());
        self.alloc_stmt(
            StmtKind::FuncDecl {
                name: stored,
                mangled,
                ty,
                body: Some(body),
                is_native: false,
            },
            span,
        )
    }

    /// `native name : func(...) -> ret;`: a function defined elsewhere.
    pub(super) fn parse_native(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty_span = self.current_span();
        let ty = self.parse_type()?;
        let ty_span = ty_span.merge(self.previous_span());
        let sig = self.types.function(ty).copied();
        if sig.is_none() && ty != TypeId::INVALID {
            let message = format!(
                "native `{}` must have a function type, found `{}`",
                self.interner.lookup(name),
                self.types.describe(ty, &self.interner),
            );
            self.report(ErrorCode::E1003, ty_span, message, "expected `func(...)`");
        }
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());

        let Some(sig) = sig else {
            return self.alloc_stmt(StmtKind::Error, span);
        };
        let stored = self.declared_name(name)?;
        let mangled = self.declare_function(stored, ty, sig, true)?;
        self.alloc_stmt(
            StmtKind::FuncDecl {
                name: stored,
                mangled,
                ty,
                body: None,
                is_native: true,
            },
            span,
        )
    }

    /// Add an overload of `stored` at the current depth. An overload with
    /// the same parameter types is replaced.
    fn declare_function(
        &mut self,
        stored: Name,
        ty: TypeId,
        sig: FuncSig,
        is_native: bool,
    ) -> PResult<Name> {
        let params = SmallVec::from_slice(self.types.params(&sig));
        let mangled = mangle(
            stored,
            &params,
            sig.variadic,
            &self.types,
            &mut self.interner,
            &self.scratch,
        )?;
        let overload = Overload {
            mangled,
            params,
            variadic: sig.variadic,
            is_native,
            ret: sig.ret,
            ty,
        };
        let key = ScopedKey::new(stored, self.depth());
        let replaced = self.symbols.funcs.set(key, overload, &self.types);
        tracing::debug!(
            name = self.interner.lookup(stored),
            mangled = self.interner.lookup(mangled),
            replaced,
            "function declared"
        );
        Ok(mangled)
    }

    /// `struct Name { field : type; ... }`
    pub(super) fn parse_struct(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::OpenBrace)?;
        let mut fields = SmallVec::<[Field; 8]>::new();
        while !self.check(TokenKind::CloseBrace) && !self.cursor.is_at_end() {
            let (field, field_span) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            self.expect(TokenKind::Semicolon)?;
            if fields.iter().any(|f| f.name == field) {
                let message = format!("field `{}` is declared twice", self.interner.lookup(field));
                self.report(ErrorCode::E2008, field_span, message, "duplicate field");
                continue;
            }
            fields.push(Field { name: field, ty });
        }
        self.expect(TokenKind::CloseBrace)?;
        self.eat(TokenKind::Semicolon);
        let span = start.merge(self.previous_span());

        let stored = self.declared_name(name)?;
        let ty = self.types.make_struct(stored, &fields)?;
        self.symbols.types.set(ScopedKey::new(stored, self.depth()), ty);
        self.alloc_stmt(StmtKind::StructDecl { name: stored, ty }, span)
    }

    /// `enum Name { A, B, C }` with an optional trailing comma.
    pub(super) fn parse_enum(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::OpenBrace)?;
        let mut variants = SmallVec::<[Name; 8]>::new();
        while !self.check(TokenKind::CloseBrace) {
            let (variant, _) = self.expect_ident()?;
            variants.push(variant);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::CloseBrace)?;
        self.eat(TokenKind::Semicolon);
        let span = start.merge(self.previous_span());

        let stored = self.declared_name(name)?;
        let ty = self.types.make_enum(stored, &variants)?;
        self.symbols.types.set(ScopedKey::new(stored, self.depth()), ty);
        self.alloc_stmt(StmtKind::EnumDecl { name: stored, ty }, span)
    }

    /// `namespace name { ... }`. Nested namespaces qualify their names
    /// with every enclosing namespace.
    pub(super) fn parse_namespace(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let (name, _) = self.expect_ident()?;
        let qualified = self.declared_name(name)?;
        self.expect(TokenKind::OpenBrace)?;

        tracing::debug!(namespace = self.interner.lookup(qualified), "namespace opened");
        self.scope.push_namespace(qualified);
        let body = self.parse_braced_items();
        self.scope.pop_namespace();

        let span = start.merge(self.previous_span());
        self.alloc_stmt(
            StmtKind::Namespace {
                name: qualified,
                body: body?,
            },
            span,
        )
    }

    /// `using path;` makes the names of a namespace visible unqualified
    /// until the end of the enclosing block. Segments are separated by
    /// `.`; a path relative to the enclosing namespace is preferred.
    pub(super) fn parse_using(&mut self) -> PResult<StmtId> {
        let start = self.advance().span;
        let (mut path, _) = self.expect_ident()?;
        while self.eat(TokenKind::Dot) {
            let (segment, _) = self.expect_ident()?;
            path = qualify(path, segment, &mut self.interner, &self.scratch)?;
        }
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.previous_span());

        let target = self
            .scope
            .namespace()
            .and_then(|outer| lookup_qualified(outer, path, &self.interner, &self.scratch))
            .unwrap_or(path);
        self.scope.push_using(target);
        self.alloc_stmt(StmtKind::Using(target), span)
    }
}
