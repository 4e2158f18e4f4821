use pretty_assertions::assert_eq;

use super::*;
use cpc_ir::StringInterner;

fn types() -> TypeArena {
    let mut interner = StringInterner::new();
    let Ok(types) = TypeArena::new(&mut interner) else {
        panic!("type arena setup failed");
    };
    types
}

#[test]
fn arithmetic_widens_to_the_wider_operand() {
    let types = types();
    let cases = [
        (TypeId::INTEGER, TypeId::INTEGER, TypeId::INTEGER),
        (TypeId::CHAR, TypeId::INTEGER, TypeId::INTEGER),
        (TypeId::INTEGER, TypeId::LONG, TypeId::LONG),
        (TypeId::FLOAT, TypeId::LONG, TypeId::FLOAT),
        (TypeId::DOUBLE, TypeId::FLOAT, TypeId::DOUBLE),
        (TypeId::INTEGER, TypeId::DOUBLE, TypeId::DOUBLE),
        (TypeId::CHAR, TypeId::FLOAT, TypeId::FLOAT),
    ];
    for (left, right, expected) in cases {
        assert_eq!(
            check_binary(&types, BinaryOp::Add, left, right),
            OpResult::Ok(expected)
        );
        assert_eq!(
            check_binary(&types, BinaryOp::Mul, left, right),
            OpResult::Ok(expected)
        );
    }
}

#[test]
fn bool_plus_int_is_rejected_with_nominal_type() {
    let types = types();
    let result = check_binary(&types, BinaryOp::Add, TypeId::BOOL, TypeId::INTEGER);
    assert_eq!(
        result,
        OpResult::Mismatch {
            nominal: TypeId::INTEGER
        }
    );
    assert_eq!(result.ty(), TypeId::INTEGER);
}

#[test]
fn bitwise_requires_integral_operands() {
    let types = types();
    assert_eq!(
        check_binary(&types, BinaryOp::Shl, TypeId::LONG, TypeId::INTEGER),
        OpResult::Ok(TypeId::LONG)
    );
    assert_eq!(
        check_binary(&types, BinaryOp::BitAnd, TypeId::DOUBLE, TypeId::INTEGER),
        OpResult::Mismatch {
            nominal: TypeId::INTEGER
        }
    );
}

#[test]
fn comparisons_and_logic_yield_bool() {
    let types = types();
    assert_eq!(
        check_binary(&types, BinaryOp::Lt, TypeId::CHAR, TypeId::DOUBLE),
        OpResult::Ok(TypeId::BOOL)
    );
    assert_eq!(
        check_binary(&types, BinaryOp::Eq, TypeId::BOOL, TypeId::BOOL),
        OpResult::Ok(TypeId::BOOL)
    );
    assert_eq!(
        check_binary(&types, BinaryOp::Eq, TypeId::BOOL, TypeId::INTEGER),
        OpResult::Mismatch {
            nominal: TypeId::BOOL
        }
    );
    assert_eq!(
        check_binary(&types, BinaryOp::And, TypeId::BOOL, TypeId::INTEGER),
        OpResult::Mismatch {
            nominal: TypeId::BOOL
        }
    );
}

#[test]
fn invalid_operands_do_not_cascade() {
    let types = types();
    assert_eq!(
        check_binary(&types, BinaryOp::Or, TypeId::INVALID, TypeId::CSTRING),
        OpResult::Ok(TypeId::BOOL)
    );
    assert_eq!(
        check_unary(&types, UnaryOp::Neg, TypeId::INVALID),
        OpResult::Ok(TypeId::INTEGER)
    );
}

#[test]
fn unary_tables() {
    let types = types();
    assert_eq!(
        check_unary(&types, UnaryOp::Neg, TypeId::FLOAT),
        OpResult::Ok(TypeId::FLOAT)
    );
    assert_eq!(
        check_unary(&types, UnaryOp::Not, TypeId::BOOL),
        OpResult::Ok(TypeId::BOOL)
    );
    assert_eq!(
        check_unary(&types, UnaryOp::Not, TypeId::INTEGER),
        OpResult::Mismatch {
            nominal: TypeId::BOOL
        }
    );
    assert_eq!(
        check_unary(&types, UnaryOp::BitNot, TypeId::DOUBLE),
        OpResult::Mismatch {
            nominal: TypeId::INTEGER
        }
    );
}
