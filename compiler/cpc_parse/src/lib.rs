//! Recursive descent parser for cpcom.
//!
//! The parser is the driver of the front end. It pulls tokens from the
//! lexer through a two-token [`Cursor`], builds pool-allocated AST nodes,
//! declares names in the symbol tables as scopes open and close, runs the
//! type checker on every complete expression, and hands constant subtrees
//! to the folder.
//!
//! # Error handling
//!
//! Syntax errors are reported once and abandon the current statement; the
//! cursor then skips to the next statement boundary. Semantic errors never
//! abandon anything. The diagnostic queue latches after the first report
//! of a statement and stops the parse once its error ceiling is hit.

mod cursor;
mod grammar;
mod recovery;
mod snapshot;

use cpc_alloc::{AllocError, ScratchPool, DEFAULT_POOL_SLOTS, DEFAULT_RESERVE};
use cpc_diagnostic::{
    Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode, ErrorGuaranteed, LineIndex,
};
use cpc_fold::Folder;
use cpc_ir::{
    AstArena, Name, Span, StmtId, StringInterner, Token, TokenKind, TypeArena, TypeId,
};
use cpc_symbols::{qualify, Scope, SymbolTables};
use cpc_types::{CheckEnv, TypeChecker};

pub use cursor::Cursor;
pub use grammar::Prec;
pub use recovery::{TokenSet, STMT_BOUNDARY};
pub use snapshot::Snapshot;

/// Parser settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// Replace constant subtrees with literals.
    pub fold_constants: bool,
    pub diagnostics: DiagnosticConfig,
    /// Byte reservation of the interner and of each scratch arena.
    pub arena_reserve: usize,
    /// Slot ceiling of each node pool.
    pub pool_slots: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            fold_constants: true,
            diagnostics: DiagnosticConfig::default(),
            arena_reserve: DEFAULT_RESERVE,
            pool_slots: DEFAULT_POOL_SLOTS,
        }
    }
}

/// Everything a finished parse produces.
pub struct ParseOutput {
    pub ast: AstArena,
    pub types: TypeArena,
    pub interner: StringInterner,
    /// Top-level statements in source order.
    pub items: Vec<StmtId>,
    /// Sorted by position.
    pub diagnostics: Vec<Diagnostic>,
    /// The error ceiling stopped the parse early.
    pub truncated: bool,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse a whole source text.
///
/// Fails only if the node pools cannot hold the basic types; running out
/// of memory later is reported as a diagnostic.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ParseOutput, AllocError> {
    let mut parser = Parser::new(source, options.clone())?;
    let items = parser.parse_program();
    Ok(parser.finish(items))
}

/// Why a production gave up.
#[derive(Clone, Debug)]
pub(crate) enum ParseError {
    /// A syntax error was reported; the statement is abandoned.
    Reported(ErrorGuaranteed),
    /// An allocator ran out; the parse stops.
    Alloc(AllocError),
}

impl From<AllocError> for ParseError {
    fn from(error: AllocError) -> Self {
        ParseError::Alloc(error)
    }
}

impl From<ErrorGuaranteed> for ParseError {
    fn from(proof: ErrorGuaranteed) -> Self {
        ParseError::Reported(proof)
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Parser state.
pub struct Parser<'src> {
    cursor: Cursor<'src>,
    lines: LineIndex,
    ast: AstArena,
    types: TypeArena,
    interner: StringInterner,
    symbols: SymbolTables,
    scope: Scope,
    folder: Folder,
    scratch: ScratchPool,
    diagnostics: DiagnosticQueue,
    /// Return types of the enclosing function bodies, innermost last.
    returns: Vec<TypeId>,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Result<Self, AllocError> {
        let mut interner = StringInterner::with_reserve(options.arena_reserve);
        let types = TypeArena::with_max_slots(&mut interner, options.pool_slots)?;
        let mut parser = Parser {
            cursor: Cursor::new(source),
            lines: LineIndex::new(source),
            ast: AstArena::with_max_slots(options.pool_slots),
            types,
            interner,
            symbols: SymbolTables::new(),
            scope: Scope::new(),
            folder: Folder::new(),
            scratch: ScratchPool::with_reserve(options.arena_reserve),
            diagnostics: DiagnosticQueue::with_config(options.diagnostics.clone()),
            returns: Vec::new(),
            options,
        };
        parser.skip_error_tokens();
        Ok(parser)
    }

    /// Parse statements until end of input or until the error ceiling.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Vec<StmtId> {
        let mut items = Vec::new();
        while !self.cursor.is_at_end() && !self.diagnostics.truncated() {
            let start = self.cursor.current_span();
            match self.parse_statement() {
                Ok(stmt) => items.push(stmt),
                Err(ParseError::Reported(reported)) => self.synchronize(start, reported),
                Err(ParseError::Alloc(error)) => {
                    self.report_exhausted(&error);
                    break;
                }
            }
        }
        items
    }

    pub fn finish(mut self, items: Vec<StmtId>) -> ParseOutput {
        let truncated = self.diagnostics.truncated();
        if truncated {
            tracing::warn!(
                errors = self.diagnostics.error_count(),
                "parse stopped at the error limit"
            );
        }
        ParseOutput {
            ast: self.ast,
            types: self.types,
            interner: self.interner,
            items,
            diagnostics: self.diagnostics.flush(),
            truncated,
        }
    }

    // ─── Token window ───

    #[inline]
    fn current(&self) -> Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn next_is(&self, kind: TokenKind) -> bool {
        self.cursor.next_kind() == kind
    }

    /// Shift the window, reporting and skipping any error tokens that
    /// arrive in `current`.
    fn advance(&mut self) -> Token {
        let token = self.cursor.bump();
        self.skip_error_tokens();
        token
    }

    fn skip_error_tokens(&mut self) {
        while let Some(error) = self.cursor.current().error {
            let token = self.cursor.bump();
            let diag = Diagnostic::error(ErrorCode::from_lex_error(error))
                .with_message(error.message())
                .with_label(token.span, error.message());
            self.diagnostics.emit_lexical(diag, token.line, token.col);
        }
    }

    /// Consume `kind` if it is current.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.unexpected(&format!("`{}`", kind.describe())))
    }

    /// Consume an identifier and intern it.
    fn expect_ident(&mut self) -> PResult<(Name, Span)> {
        if !self.check(TokenKind::Ident) {
            let found = self.current();
            let diag = Diagnostic::error(ErrorCode::E1005)
                .with_message(format!("expected identifier, found {}", describe(found.kind)))
                .with_label(found.span, "expected identifier");
            return Err(self.diagnostics.emit(diag, found.line, found.col).into());
        }
        let token = self.advance();
        let name = self.interner.try_intern(self.cursor.lexeme(token))?;
        Ok((name, token.span))
    }

    // ─── Diagnostics ───

    /// Report that `expected` was wanted where the current token is.
    #[cold]
    fn unexpected(&mut self, expected: &str) -> ParseError {
        let found = self.current();
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message(format!("expected {expected}, found {}", describe(found.kind)))
            .with_label(found.span, format!("expected {expected}"));
        self.diagnostics.emit(diag, found.line, found.col).into()
    }

    fn report(&mut self, code: ErrorCode, span: Span, message: String, label: &str) -> ErrorGuaranteed {
        let diag = Diagnostic::error(code)
            .with_message(message)
            .with_label(span, label);
        self.diagnostics.emit_spanned(diag, &self.lines)
    }

    #[cold]
    fn report_exhausted(&mut self, error: &AllocError) {
        tracing::warn!(%error, "allocator exhausted, stopping");
        self.diagnostics.begin_statement();
        let span = self.current_span();
        self.report(ErrorCode::E9001, span, error.to_string(), "while parsing this");
    }

    /// Skip to the next statement boundary after a syntax error.
    ///
    /// A `;` is consumed; a boundary token is left for the caller. If the
    /// failed statement consumed nothing, one token is skipped first so
    /// that the parse always makes progress.
    fn synchronize(&mut self, start: Span, reported: ErrorGuaranteed) {
        tracing::trace!(?reported, "skipping to the next statement");
        if self.current_span() == start && !self.cursor.is_at_end() {
            self.advance();
        }
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Semicolon {
                self.advance();
                return;
            }
            if STMT_BOUNDARY.contains(kind) {
                return;
            }
            self.advance();
        }
    }

    // ─── Shared state ───

    /// Read-only view for name lookups.
    fn env(&self) -> CheckEnv<'_> {
        CheckEnv {
            types: &self.types,
            interner: &self.interner,
            symbols: &self.symbols,
            scope: &self.scope,
            scratch: &self.scratch,
            lines: &self.lines,
        }
    }

    /// A type checker over the parser's tables.
    fn checker(&mut self) -> TypeChecker<'_> {
        let env = CheckEnv {
            types: &self.types,
            interner: &self.interner,
            symbols: &self.symbols,
            scope: &self.scope,
            scratch: &self.scratch,
            lines: &self.lines,
        };
        TypeChecker::new(env, &mut self.ast, &mut self.diagnostics)
    }

    /// Name under which a declaration is stored: qualified with the
    /// enclosing namespace, if any.
    fn declared_name(&mut self, name: Name) -> Result<Name, AllocError> {
        match self.scope.namespace() {
            Some(namespace) => qualify(namespace, name, &mut self.interner, &self.scratch),
            None => Ok(name),
        }
    }

    fn enter_scope(&mut self) -> u32 {
        self.scope.enter()
    }

    /// Close the innermost scope and drop everything declared in it.
    fn leave_scope(&mut self) {
        let depth = self.scope.leave();
        self.symbols.leave_depth(depth);
        self.folder.leave_scope(depth);
    }

    #[inline]
    fn depth(&self) -> u32 {
        self.scope.depth()
    }
}

/// `identifier`, `end of file` or a quoted symbol.
fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Eof
        | TokenKind::Error
        | TokenKind::Ident
        | TokenKind::StringLit
        | TokenKind::IntLit
        | TokenKind::LongLit
        | TokenKind::FloatLit
        | TokenKind::DoubleLit
        | TokenKind::CharLit
        | TokenKind::Tag => kind.describe().to_owned(),
        _ => format!("`{}`", kind.describe()),
    }
}

#[cfg(test)]
mod tests;
