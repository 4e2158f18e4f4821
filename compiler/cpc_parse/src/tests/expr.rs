//! Expression parsing and folding tests.

use cpc_ir::{AssignOp, BinaryOp, ExprKind, StmtKind, TypeId, UnaryOp};
use pretty_assertions::assert_eq;

use cpc_diagnostic::ErrorCode;

use super::{assert_clean, body_of, codes, expr_item, init_item, parse_source, parse_with};

#[test]
fn factor_binds_tighter_than_term() {
    let output = parse_with("1 + 2 * 3;", false);
    assert_clean(&output);

    let root = output.ast.expr(expr_item(&output, 0));
    let ExprKind::Binary {
        op: BinaryOp::Add,
        left,
        right,
    } = root.kind
    else {
        panic!("expected `+` at the root, got {root:?}");
    };
    assert_eq!(output.ast.expr(left).kind, ExprKind::Int(1));
    assert!(matches!(
        output.ast.expr(right).kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
    assert!(root.is_constant());
    assert_eq!(root.ty, TypeId::INTEGER);
}

#[test]
fn term_operators_are_left_associative() {
    let output = parse_with("10 - 4 - 3;", false);
    let ExprKind::Binary { left, right, .. } = output.ast.expr(expr_item(&output, 0)).kind else {
        panic!("expected a binary root");
    };
    assert!(matches!(
        output.ast.expr(left).kind,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
    assert_eq!(output.ast.expr(right).kind, ExprKind::Int(3));
}

#[test]
fn precedence_ladder() {
    // a || b && c == d < e << f + g * h
    let output = parse_with(
        "a : bool; b : bool; c : bool; d : int; e : int; f : int; g : int; h : int;\n\
         a || b && c == d < e << f + g * h;",
        false,
    );
    assert_clean(&output);
    let mut id = expr_item(&output, 8);
    let expected = [
        BinaryOp::Or,
        BinaryOp::And,
        BinaryOp::Eq,
        BinaryOp::Lt,
        BinaryOp::Shl,
        BinaryOp::Add,
        BinaryOp::Mul,
    ];
    for op in expected {
        let ExprKind::Binary { op: found, right, .. } = output.ast.expr(id).kind else {
            panic!("expected `{}`", op.as_symbol());
        };
        assert_eq!(found, op);
        id = right;
    }
}

#[test]
fn bitwise_levels() {
    let output = parse_with("x : int; x | 1 ^ 2 & 3;", false);
    assert_clean(&output);
    let ExprKind::Binary {
        op: BinaryOp::BitOr,
        right,
        ..
    } = output.ast.expr(expr_item(&output, 1)).kind
    else {
        panic!("expected `|` at the root");
    };
    let ExprKind::Binary {
        op: BinaryOp::BitXor,
        right,
        ..
    } = output.ast.expr(right).kind
    else {
        panic!("expected `^` under `|`");
    };
    assert!(matches!(
        output.ast.expr(right).kind,
        ExprKind::Binary {
            op: BinaryOp::BitAnd,
            ..
        }
    ));
}

#[test]
fn assignment_is_right_associative() {
    let output = parse_source("a : int; b : int; a = b = 3;");
    assert_clean(&output);
    let ExprKind::Assign {
        op: AssignOp::Assign,
        value,
        ..
    } = output.ast.expr(expr_item(&output, 2)).kind
    else {
        panic!("expected an assignment");
    };
    assert!(matches!(
        output.ast.expr(value).kind,
        ExprKind::Assign { .. }
    ));
}

#[test]
fn compound_assignment() {
    let output = parse_source("a : int; a += 2 * 3;");
    assert_clean(&output);
    let ExprKind::Assign { op, value, .. } = output.ast.expr(expr_item(&output, 1)).kind else {
        panic!("expected an assignment");
    };
    assert_eq!(op, AssignOp::Compound(BinaryOp::Add));
    assert_eq!(output.ast.expr(value).kind, ExprKind::Int(6));
}

#[test]
fn literal_is_not_assignable() {
    let output = parse_source("1 = 2;");
    assert_eq!(codes(&output), vec![ErrorCode::E1004]);
    assert_eq!(output.ast.expr(expr_item(&output, 0)).kind, ExprKind::Error);
}

#[test]
fn assignment_not_allowed_in_value_position() {
    let output = parse_source("a : int; b : int = a = 1;");
    assert_eq!(codes(&output), vec![ErrorCode::E1001]);
}

#[test]
fn prefix_operators() {
    let output = parse_with("i : int; -i; !true; ~i; ++i;", false);
    assert_clean(&output);
    let ops: Vec<UnaryOp> = (1..5)
        .map(|n| match output.ast.expr(expr_item(&output, n)).kind {
            ExprKind::Unary { op, .. } => op,
            other => panic!("expected a unary node, got {other:?}"),
        })
        .collect();
    assert_eq!(
        ops,
        vec![UnaryOp::Neg, UnaryOp::Not, UnaryOp::BitNot, UnaryOp::PreInc]
    );
}

#[test]
fn increment_needs_lvalue() {
    let output = parse_source("++3;");
    assert_eq!(codes(&output), vec![ErrorCode::E1004]);
}

#[test]
fn literal_kinds() {
    let output = parse_with(
        "a := 1; b := 2l; c := 1.5f; d := 1.5; e := 'x'; s := \"hi\"; t := false;",
        false,
    );
    assert_clean(&output);
    let kinds: Vec<ExprKind> = (0..5)
        .map(|n| output.ast.expr(init_item(&output, n)).kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ExprKind::Int(1),
            ExprKind::Long(2),
            ExprKind::Float(1.5),
            ExprKind::Double(1.5),
            ExprKind::Char(b'x'),
        ]
    );
    let ExprKind::Str(text) = output.ast.expr(init_item(&output, 5)).kind else {
        panic!("expected a string literal");
    };
    assert_eq!(output.interner.lookup(text), "hi");
    assert_eq!(output.ast.expr(init_item(&output, 6)).kind, ExprKind::Bool(false));
}

#[test]
fn integer_literal_out_of_range() {
    let output = parse_source("x := 99999999999;");
    assert_eq!(codes(&output), vec![ErrorCode::E1006]);
}

#[test]
fn folds_constant_expression() {
    let output = parse_source("x := 2 + 3 * 4;");
    assert_clean(&output);
    let init = output.ast.expr(init_item(&output, 0));
    assert_eq!(init.kind, ExprKind::Int(14));
    assert_eq!(init.ty, TypeId::INTEGER);
    assert!(init.is_constant());
    assert!(!init.can_assign());
}

#[test]
fn folding_widens() {
    let output = parse_source("x := 1 + 2.5;");
    assert_eq!(
        output.ast.expr(init_item(&output, 0)).kind,
        ExprKind::Double(3.5)
    );
}

#[test]
fn folds_inside_non_constant_expression() {
    let output = parse_source("y : int; x := y + (2 * 5);");
    assert_clean(&output);
    let ExprKind::Binary { right, .. } = output.ast.expr(init_item(&output, 1)).kind else {
        panic!("expected `y + ...` to stay a binary node");
    };
    assert_eq!(output.ast.expr(right).kind, ExprKind::Int(10));
}

#[test]
fn division_by_zero_is_not_folded() {
    let output = parse_source("x := 1 / 0;");
    assert_clean(&output);
    assert!(matches!(
        output.ast.expr(init_item(&output, 0)).kind,
        ExprKind::Binary {
            op: BinaryOp::Div,
            ..
        }
    ));
}

#[test]
fn const_bindings_fold_through_references() {
    let output = parse_source("const k := 2 * 8; v := k + 1;");
    assert_clean(&output);
    assert_eq!(output.ast.expr(init_item(&output, 1)).kind, ExprKind::Int(17));
}

#[test]
fn constants_are_not_assignable() {
    let output = parse_source("const k := 1; k = 2;");
    assert_eq!(codes(&output), vec![ErrorCode::E1004]);
}

#[test]
fn shadowed_constant_is_not_folded() {
    let output = parse_source("const k := 4; { k : int; v := k + 1; }");
    assert_clean(&output);
    let inner = body_of(&output, output.items[1]);
    let StmtKind::VarDecl { init: Some(init), .. } = output.ast.stmt(inner[1]).kind else {
        panic!("expected `v := k + 1`");
    };
    assert!(matches!(
        output.ast.expr(init).kind,
        ExprKind::Binary { .. }
    ));
}

#[test]
fn member_access_is_assignable() {
    let output = parse_source("struct P { x : int; } p : P; p.x = 3;");
    assert_clean(&output);
    let ExprKind::Assign { target, .. } = output.ast.expr(expr_item(&output, 2)).kind else {
        panic!("expected an assignment");
    };
    assert!(output.ast.expr(target).can_assign());
    assert_eq!(output.ast.expr(target).ty, TypeId::INTEGER);
}

#[test]
fn only_names_can_be_called() {
    let output = parse_source("(1)(2);");
    assert_eq!(codes(&output), vec![ErrorCode::E1001]);
}
