//! Parser tests.
//!
//! - `expr`: precedence, assignment, literals and folding
//! - `stmt`: declarations, scopes, control flow and namespaces
//! - `recovery`: error reporting, the statement latch and the error ceiling

mod expr;
mod stmt;

use cpc_diagnostic::{DiagnosticConfig, ErrorCode};
use cpc_ir::{ExprId, StmtId, StmtKind};

use crate::{parse, ParseOptions, ParseOutput};

fn options(fold_constants: bool) -> ParseOptions {
    ParseOptions {
        fold_constants,
        diagnostics: DiagnosticConfig::unlimited(),
        ..ParseOptions::default()
    }
}

fn parse_with(source: &str, fold_constants: bool) -> ParseOutput {
    let Ok(output) = parse(source, &options(fold_constants)) else {
        panic!("parser setup failed");
    };
    output
}

fn parse_source(source: &str) -> ParseOutput {
    parse_with(source, true)
}

fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

fn assert_clean(output: &ParseOutput) {
    let messages: Vec<String> = output.diagnostics.iter().map(ToString::to_string).collect();
    assert!(messages.is_empty(), "unexpected diagnostics: {messages:#?}");
}

/// The `n`th top-level statement.
fn item(output: &ParseOutput, n: usize) -> StmtKind {
    output.ast.stmt(output.items[n]).kind
}

/// Expression of the `n`th top-level statement, which must be an
/// expression statement.
fn expr_item(output: &ParseOutput, n: usize) -> ExprId {
    let StmtKind::Expr(id) = item(output, n) else {
        panic!("statement {n} is not an expression: {:?}", item(output, n));
    };
    id
}

/// Initializer of the `n`th top-level statement, which must be a
/// variable declaration with a value.
fn init_item(output: &ParseOutput, n: usize) -> ExprId {
    let StmtKind::VarDecl { init: Some(id), .. } = item(output, n) else {
        panic!("statement {n} is not an initialized declaration: {:?}", item(output, n));
    };
    id
}

fn body_of(output: &ParseOutput, stmt: StmtId) -> Vec<StmtId> {
    let StmtKind::Block(range) = output.ast.stmt(stmt).kind else {
        panic!("not a block: {:?}", output.ast.stmt(stmt));
    };
    output.ast.stmt_list(range).to_vec()
}
