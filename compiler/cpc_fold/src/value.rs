//! Runtime values.

use cpc_ir::{Expr, ExprFlags, ExprKind, Span, TypeId};

/// Kinds ordered by widening rank; `Bool` never widens.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Char,
    Integer,
    Long,
    Float,
    Double,
    Bool,
}

impl ValueKind {
    /// Common kind for a numeric operation, or `None` when either side is
    /// `Bool`.
    pub fn wider(self, other: ValueKind) -> Option<ValueKind> {
        if self == ValueKind::Bool || other == ValueKind::Bool {
            return None;
        }
        Some(self.max(other))
    }

    #[inline]
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            ValueKind::Char | ValueKind::Integer | ValueKind::Long
        )
    }
}

/// A constant-pool entry or stack slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Char(u8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(self) -> ValueKind {
        match self {
            Value::Char(_) => ValueKind::Char,
            Value::Int(_) => ValueKind::Integer,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    /// Value of a literal node; `None` for strings and non-literals.
    pub fn from_literal(kind: &ExprKind) -> Option<Value> {
        Some(match *kind {
            ExprKind::Char(c) => Value::Char(c),
            ExprKind::Int(v) => Value::Int(v),
            ExprKind::Long(v) => Value::Long(v),
            ExprKind::Float(v) => Value::Float(v),
            ExprKind::Double(v) => Value::Double(v),
            ExprKind::Bool(v) => Value::Bool(v),
            _ => return None,
        })
    }

    /// Literal node holding this value: typed, constant, not assignable.
    pub fn to_literal(self, span: Span) -> Expr {
        let (kind, ty) = match self {
            Value::Char(c) => (ExprKind::Char(c), TypeId::CHAR),
            Value::Int(v) => (ExprKind::Int(v), TypeId::INTEGER),
            Value::Long(v) => (ExprKind::Long(v), TypeId::LONG),
            Value::Float(v) => (ExprKind::Float(v), TypeId::FLOAT),
            Value::Double(v) => (ExprKind::Double(v), TypeId::DOUBLE),
            Value::Bool(v) => (ExprKind::Bool(v), TypeId::BOOL),
        };
        let mut expr = Expr::new(kind, span).with_flags(ExprFlags::IS_CONSTANT);
        expr.ty = ty;
        expr
    }

    pub(crate) fn as_char(self) -> Option<u8> {
        match self {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_int(self) -> Option<i32> {
        match self {
            Value::Char(c) => Some(i32::from(c)),
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_long(self) -> Option<i64> {
        match self {
            Value::Char(c) => Some(i64::from(c)),
            Value::Int(v) => Some(i64::from(v)),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integral to float conversion follows the usual arithmetic conversions"
    )]
    pub(crate) fn as_float(self) -> Option<f32> {
        match self {
            Value::Char(c) => Some(f32::from(c)),
            Value::Int(v) => Some(v as f32),
            Value::Long(v) => Some(v as f32),
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "long to double conversion follows the usual arithmetic conversions"
    )]
    pub(crate) fn as_double(self) -> Option<f64> {
        match self {
            Value::Char(c) => Some(f64::from(c)),
            Value::Int(v) => Some(f64::from(v)),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            Value::Bool(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;
