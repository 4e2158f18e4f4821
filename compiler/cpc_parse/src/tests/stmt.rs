//! Declarations, scopes, control flow and namespaces.

use cpc_diagnostic::ErrorCode;
use cpc_ir::{ExprId, ExprKind, StmtKind, TypeId};
use pretty_assertions::assert_eq;

use super::{assert_clean, body_of, codes, expr_item, init_item, item, parse_source};
use crate::ParseOutput;

/// Mangled target of the call at the root of `expr`.
fn call_target(output: &ParseOutput, expr: ExprId) -> &str {
    let ExprKind::Call {
        mangled: Some(mangled),
        ..
    } = output.ast.expr(expr).kind
    else {
        panic!("expected a resolved call, got {:?}", output.ast.expr(expr));
    };
    output.interner.lookup(mangled)
}

#[test]
fn typed_and_inferred_declarations() {
    let output = parse_source("a : long = 1; b := 2.5f; c : bool;");
    assert_clean(&output);
    let types: Vec<TypeId> = (0..3)
        .map(|n| match item(&output, n) {
            StmtKind::VarDecl { ty, .. } => ty,
            other => panic!("expected a declaration, got {other:?}"),
        })
        .collect();
    assert_eq!(types, vec![TypeId::LONG, TypeId::FLOAT, TypeId::BOOL]);
}

#[test]
fn initializer_must_fit_declared_type() {
    let output = parse_source("a : int = 1.5;");
    assert_eq!(codes(&output), vec![ErrorCode::E2007]);
}

#[test]
fn function_declaration_and_call() {
    let output = parse_source("f := func(int a) -> int { return a + 1; } x := f(2);");
    assert_clean(&output);
    let StmtKind::FuncDecl {
        mangled,
        is_native,
        body: Some(_),
        ..
    } = item(&output, 0)
    else {
        panic!("expected a function declaration");
    };
    assert!(!is_native);
    assert_eq!(output.interner.lookup(mangled), "f_1int");
    assert_eq!(call_target(&output, init_item(&output, 1)), "f_1int");
    assert_eq!(output.ast.expr(init_item(&output, 1)).ty, TypeId::INTEGER);
}

#[test]
fn overloads_resolve_by_arguments() {
    let output = parse_source(
        "f := func(int a) -> int { return a; }\n\
         f := func(int a, int b) -> long { return a + b; }\n\
         x := f(1, 2);\n\
         y := f(1);",
    );
    assert_clean(&output);
    assert_eq!(call_target(&output, init_item(&output, 2)), "f_2intint");
    assert_eq!(call_target(&output, init_item(&output, 3)), "f_1int");
    assert_eq!(output.ast.expr(init_item(&output, 2)).ty, TypeId::LONG);
}

#[test]
fn call_errors() {
    let output = parse_source("f := func(int a) {} f(true); g(1);");
    assert_eq!(codes(&output), vec![ErrorCode::E2005, ErrorCode::E2006]);
}

#[test]
fn recursion_sees_its_own_declaration() {
    let output = parse_source(
        "fact := func(int n) -> int {\n\
             if n < 2 return 1;\n\
             return n * fact(n - 1);\n\
         }",
    );
    assert_clean(&output);
    let StmtKind::FuncDecl { body: Some(body), .. } = item(&output, 0) else {
        panic!("expected a function declaration");
    };
    let stmts = body_of(&output, body);
    assert_eq!(stmts.len(), 2);
    assert!(matches!(output.ast.stmt(stmts[0]).kind, StmtKind::If { .. }));
}

#[test]
fn return_type_is_checked() {
    let output = parse_source(
        "f := func() -> int { return true; }\n\
         g := func() { return 1; }\n\
         h := func() -> int { return; }",
    );
    assert_eq!(
        codes(&output),
        vec![ErrorCode::E2002, ErrorCode::E2002, ErrorCode::E2002]
    );
}

#[test]
fn returns_widen_to_declared_type() {
    let output = parse_source("f := func(int a) -> double { return a; }");
    assert_clean(&output);
}

#[test]
fn declared_function_type_must_match() {
    let output = parse_source("f : func(int) -> int = func(bool b) -> int { return 1; }");
    assert_eq!(codes(&output), vec![ErrorCode::E2007]);
}

#[test]
fn block_scope_ends_at_brace() {
    let output = parse_source("{ x : int; x = 1; } x = 2;");
    assert_eq!(codes(&output), vec![ErrorCode::E2004]);
    assert_eq!(body_of(&output, output.items[0]).len(), 2);
}

#[test]
fn parameters_are_local_to_the_body() {
    let output = parse_source("f := func(int a) { a = 1; } a = 2;");
    assert_eq!(codes(&output), vec![ErrorCode::E2004]);
}

#[test]
fn namespace_names_are_qualified() {
    let output = parse_source(
        "namespace math { sq := func(int a) -> int { return a * a; } }\n\
         using math;\n\
         x := sq(3);",
    );
    assert_clean(&output);
    let StmtKind::Namespace { name, body } = item(&output, 0) else {
        panic!("expected a namespace");
    };
    assert_eq!(output.interner.lookup(name), "math");
    assert_eq!(output.ast.stmt_list(body).len(), 1);
    assert_eq!(call_target(&output, init_item(&output, 2)), "math::sq_1int");
}

#[test]
fn namespace_names_need_using() {
    let output = parse_source("namespace math { k : int; } x := k;");
    assert_eq!(codes(&output), vec![ErrorCode::E2004]);
}

#[test]
fn nested_using_is_relative() {
    let output = parse_source(
        "namespace outer {\n\
             namespace inner { v : int; }\n\
             using inner;\n\
             w := v;\n\
         }",
    );
    assert_clean(&output);
    let StmtKind::Namespace { body, .. } = item(&output, 0) else {
        panic!("expected a namespace");
    };
    let StmtKind::Using(target) = output.ast.stmt(output.ast.stmt_list(body)[1]).kind else {
        panic!("expected `using`");
    };
    assert_eq!(output.interner.lookup(target), "outer::inner");
}

#[test]
fn struct_members() {
    let output = parse_source("struct P { x : int; y : double; } p : P; a := p.y;");
    assert_clean(&output);
    let StmtKind::StructDecl { ty, .. } = item(&output, 0) else {
        panic!("expected a struct");
    };
    assert_eq!(output.types.describe(ty, &output.interner), "P");
    assert_eq!(output.ast.expr(init_item(&output, 2)).ty, TypeId::DOUBLE);
}

#[test]
fn struct_field_errors() {
    let output = parse_source("struct P { x : int; x : bool; } p : P; p.z = 1;");
    assert_eq!(codes(&output), vec![ErrorCode::E2008, ErrorCode::E2008]);
}

#[test]
fn enum_variants() {
    let output = parse_source("enum Color { Red, Green, Blue, } c := Color.Green; d := Color.Pink;");
    assert_eq!(codes(&output), vec![ErrorCode::E2008]);
    let StmtKind::VarDecl { ty, .. } = item(&output, 1) else {
        panic!("expected a declaration");
    };
    assert_eq!(output.types.describe(ty, &output.interner), "Color");
}

#[test]
fn unknown_type_name() {
    let output = parse_source("x : Shape;");
    assert_eq!(codes(&output), vec![ErrorCode::E2010]);
}

#[test]
fn native_variadic_function() {
    let output = parse_source("native printf : func(cstring fmt, ...) -> int; printf(\"%d\", 1, 2.5);");
    assert_clean(&output);
    let StmtKind::FuncDecl {
        is_native: true,
        body: None,
        mangled,
        ..
    } = item(&output, 0)
    else {
        panic!("expected a native declaration");
    };
    assert_eq!(output.interner.lookup(mangled), "printf_1cstring_va");
    assert_eq!(call_target(&output, expr_item(&output, 1)), "printf_1cstring_va");
}

#[test]
fn native_needs_function_type() {
    let output = parse_source("native n : int; y := 1;");
    assert_eq!(codes(&output), vec![ErrorCode::E1003]);
    assert_eq!(item(&output, 0), StmtKind::Error);
    assert_eq!(output.items.len(), 2);
}

#[test]
fn conditions_must_be_testable() {
    let output = parse_source("struct P { x : int; } p : P; if p ; while 1 ; if true ; else ;");
    assert_eq!(codes(&output), vec![ErrorCode::E2009]);
    assert!(matches!(
        item(&output, 4),
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn do_while_loop() {
    let output = parse_source("i := 0; do { i += 1; } while i < 3;");
    assert_clean(&output);
    let StmtKind::DoWhile { body, .. } = item(&output, 1) else {
        panic!("expected a do-while loop");
    };
    assert_eq!(body_of(&output, body).len(), 1);
}

#[test]
fn print_needs_printable_value() {
    let output = parse_source("struct P { x : int; } p : P; print p; print \"ok\"; print 1 + 2;");
    assert_eq!(codes(&output), vec![ErrorCode::E2003]);
    let StmtKind::Print(value) = item(&output, 4) else {
        panic!("expected `print`");
    };
    assert_eq!(output.ast.expr(value).kind, ExprKind::Int(3));
}

#[test]
fn const_needs_a_value() {
    let output = parse_source("const k : int;");
    assert_eq!(codes(&output), vec![ErrorCode::E1002]);
}
