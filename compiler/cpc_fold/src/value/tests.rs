use pretty_assertions::assert_eq;

use super::*;

#[test]
fn widening_rank() {
    assert_eq!(
        ValueKind::Char.wider(ValueKind::Integer),
        Some(ValueKind::Integer)
    );
    assert_eq!(
        ValueKind::Double.wider(ValueKind::Long),
        Some(ValueKind::Double)
    );
    assert_eq!(
        ValueKind::Float.wider(ValueKind::Long),
        Some(ValueKind::Float)
    );
    assert_eq!(ValueKind::Bool.wider(ValueKind::Integer), None);
    assert_eq!(ValueKind::Bool.wider(ValueKind::Bool), None);
}

#[test]
fn literal_conversion_sets_type_and_flags() {
    let expr = Value::Long(7).to_literal(Span::new(2, 4));
    assert_eq!(expr.kind, ExprKind::Long(7));
    assert_eq!(expr.ty, TypeId::LONG);
    assert!(expr.is_constant());
    assert!(!expr.can_assign());
    assert_eq!(expr.span, Span::new(2, 4));

    assert_eq!(
        Value::from_literal(&ExprKind::Char(b'a')),
        Some(Value::Char(b'a'))
    );
    assert_eq!(Value::from_literal(&ExprKind::Error), None);
}

#[test]
fn narrower_values_convert_upward_only() {
    assert_eq!(Value::Char(200).as_int(), Some(200));
    assert_eq!(Value::Int(-3).as_long(), Some(-3));
    assert_eq!(Value::Long(1).as_int(), None);
    assert_eq!(Value::Int(2).as_double(), Some(2.0));
    assert_eq!(Value::Double(2.0).as_float(), None);
    assert_eq!(Value::Bool(true).as_double(), None);
}
