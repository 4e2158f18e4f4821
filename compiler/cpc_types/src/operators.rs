//! Operator tables.
//!
//! Every binary operator belongs to one [`OpTable`] listing the operand
//! pairs it accepts. A rejected pair still has a nominal result type so
//! inference can continue above the error.

use cpc_ir::{BinaryOp, TypeArena, TypeId, UnaryOp};

/// Outcome of checking one operator application.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OpResult {
    Ok(TypeId),
    /// Operands rejected.
    Mismatch { nominal: TypeId },
}

impl OpResult {
    /// Result type, whether or not the operands were accepted.
    #[inline]
    pub fn ty(self) -> TypeId {
        match self {
            OpResult::Ok(ty) | OpResult::Mismatch { nominal: ty } => ty,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OpTable {
    /// `+ -`. Any pair of numeric operands is accepted, mixed integer and
    /// floating-point included; the result is the wider operand, the same
    /// promotion the folding VM applies.
    Term,
    /// `* / %`. Same operand rule as [`OpTable::Term`].
    Factor,
    /// `& | ^ << >>`
    Bitwise,
    /// `== !=`
    Equality,
    /// `< <= > >=`
    Comparison,
    /// `&& ||`
    Logical,
}

impl OpTable {
    pub const fn of(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add | BinaryOp::Sub => OpTable::Term,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => OpTable::Factor,
            BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr => OpTable::Bitwise,
            BinaryOp::Eq | BinaryOp::NotEq => OpTable::Equality,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => OpTable::Comparison,
            BinaryOp::And | BinaryOp::Or => OpTable::Logical,
        }
    }

    /// Result type used when the operands are rejected.
    pub const fn nominal(self) -> TypeId {
        match self {
            OpTable::Term | OpTable::Factor | OpTable::Bitwise => TypeId::INTEGER,
            OpTable::Equality | OpTable::Comparison | OpTable::Logical => TypeId::BOOL,
        }
    }

    fn accepts(self, types: &TypeArena, left: TypeId, right: TypeId) -> Option<TypeId> {
        let both = |pred: fn(&TypeArena, TypeId) -> bool| pred(types, left) && pred(types, right);
        match self {
            OpTable::Term | OpTable::Factor => {
                both(TypeArena::is_numeric).then(|| types.wider(left, right))
            }
            OpTable::Bitwise => both(TypeArena::is_integral).then(|| types.wider(left, right)),
            OpTable::Equality => {
                let comparable = both(TypeArena::is_numeric)
                    || (types.equal(left, right) && left != TypeId::VOID);
                comparable.then_some(TypeId::BOOL)
            }
            OpTable::Comparison => both(TypeArena::is_numeric).then_some(TypeId::BOOL),
            OpTable::Logical => {
                (left == TypeId::BOOL && right == TypeId::BOOL).then_some(TypeId::BOOL)
            }
        }
    }
}

/// Check `left op right`. An `Invalid` operand was already reported, so it
/// yields the nominal type without a second error.
pub fn check_binary(types: &TypeArena, op: BinaryOp, left: TypeId, right: TypeId) -> OpResult {
    let table = OpTable::of(op);
    if left == TypeId::INVALID || right == TypeId::INVALID {
        return OpResult::Ok(table.nominal());
    }
    match table.accepts(types, left, right) {
        Some(ty) => OpResult::Ok(ty),
        None => OpResult::Mismatch {
            nominal: table.nominal(),
        },
    }
}

pub fn check_unary(types: &TypeArena, op: UnaryOp, operand: TypeId) -> OpResult {
    let nominal = match op {
        UnaryOp::Not => TypeId::BOOL,
        _ => TypeId::INTEGER,
    };
    if operand == TypeId::INVALID {
        return OpResult::Ok(nominal);
    }
    let accepted = match op {
        UnaryOp::Neg | UnaryOp::Plus | UnaryOp::PreInc | UnaryOp::PreDec => {
            types.is_numeric(operand)
        }
        UnaryOp::BitNot => types.is_integral(operand),
        UnaryOp::Not => operand == TypeId::BOOL,
    };
    if !accepted {
        return OpResult::Mismatch { nominal };
    }
    match op {
        UnaryOp::Not => OpResult::Ok(TypeId::BOOL),
        _ => OpResult::Ok(operand),
    }
}

#[cfg(test)]
mod tests;
