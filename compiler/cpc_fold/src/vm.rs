//! Stack machine.

use cpc_ir::Name;
use smallvec::SmallVec;

use crate::{Chunk, FoldError, Opcode, Value, ValueKind};

type Stack = SmallVec<[Value; 16]>;

/// Run `chunk` and return the single value it leaves on the stack.
///
/// `bindings` resolves the names referenced by `LOAD`.
pub fn run(chunk: &Chunk, bindings: impl Fn(Name) -> Option<Value>) -> Result<Value, FoldError> {
    let mut stack = Stack::new();
    let mut ip = 0;
    while let Some(&byte) = chunk.code.get(ip) {
        ip += 1;
        let op = Opcode::from_byte(byte).ok_or(FoldError::BadOpcode(byte))?;
        match op {
            Opcode::Push => {
                let index = operand(chunk, &mut ip)?;
                let value = chunk
                    .constants
                    .get(index)
                    .copied()
                    .ok_or(FoldError::BadOpcode(byte))?;
                stack.push(value);
            }
            Opcode::Load => {
                let index = operand(chunk, &mut ip)?;
                let name = chunk
                    .names
                    .get(index)
                    .copied()
                    .ok_or(FoldError::BadOpcode(byte))?;
                stack.push(bindings(name).ok_or(FoldError::Unbound)?);
            }
            Opcode::Pop => {
                pop(&mut stack)?;
            }
            Opcode::Neg | Opcode::Not | Opcode::BitNot => {
                let value = pop(&mut stack)?;
                stack.push(unary(op, value)?);
            }
            _ => {
                let right = pop(&mut stack)?;
                let left = pop(&mut stack)?;
                stack.push(binary(op, left, right)?);
            }
        }
    }
    match stack.as_slice() {
        [value] => Ok(*value),
        rest => Err(FoldError::Unbalanced { depth: rest.len() }),
    }
}

fn operand(chunk: &Chunk, ip: &mut usize) -> Result<usize, FoldError> {
    let index = chunk
        .code
        .get(*ip)
        .copied()
        .ok_or(FoldError::StackUnderflow)?;
    *ip += 1;
    Ok(usize::from(index))
}

#[inline]
fn pop(stack: &mut Stack) -> Result<Value, FoldError> {
    stack.pop().ok_or(FoldError::StackUnderflow)
}

fn unary(op: Opcode, value: Value) -> Result<Value, FoldError> {
    let mismatch = FoldError::Operands { op };
    Ok(match (op, value) {
        (Opcode::Neg, Value::Char(v)) => Value::Char(v.wrapping_neg()),
        (Opcode::Neg, Value::Int(v)) => Value::Int(v.wrapping_neg()),
        (Opcode::Neg, Value::Long(v)) => Value::Long(v.wrapping_neg()),
        (Opcode::Neg, Value::Float(v)) => Value::Float(-v),
        (Opcode::Neg, Value::Double(v)) => Value::Double(-v),
        (Opcode::Not, Value::Bool(v)) => Value::Bool(!v),
        (Opcode::BitNot, Value::Char(v)) => Value::Char(!v),
        (Opcode::BitNot, Value::Int(v)) => Value::Int(!v),
        (Opcode::BitNot, Value::Long(v)) => Value::Long(!v),
        _ => return Err(mismatch),
    })
}

fn binary(op: Opcode, left: Value, right: Value) -> Result<Value, FoldError> {
    let mismatch = FoldError::Operands { op };
    match op {
        Opcode::And | Opcode::Or => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == Opcode::And {
                a && b
            } else {
                a || b
            })),
            _ => Err(mismatch),
        },
        Opcode::Eq | Opcode::NotEq => {
            let equal = match (left, right) {
                (Value::Bool(a), Value::Bool(b)) => a == b,
                _ => compare(op, left, right)? == std::cmp::Ordering::Equal,
            };
            Ok(Value::Bool(equal == (op == Opcode::Eq)))
        }
        Opcode::Lt | Opcode::LtEq | Opcode::Gt | Opcode::GtEq => {
            let ordering = compare(op, left, right)?;
            Ok(Value::Bool(match op {
                Opcode::Lt => ordering.is_lt(),
                Opcode::LtEq => ordering.is_le(),
                Opcode::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            }))
        }
        _ => arithmetic(op, left, right),
    }
}

/// Compare in the wider kind. NaN operands are not folded.
fn compare(op: Opcode, left: Value, right: Value) -> Result<std::cmp::Ordering, FoldError> {
    let mismatch = FoldError::Operands { op };
    let kind = left.kind().wider(right.kind()).ok_or(mismatch)?;
    if kind.is_integral() {
        let (a, b) = (left.as_long(), right.as_long());
        return a.zip(b).map(|(a, b)| a.cmp(&b)).ok_or(mismatch);
    }
    let (a, b) = (left.as_double(), right.as_double());
    a.zip(b)
        .and_then(|(a, b)| a.partial_cmp(&b))
        .ok_or(mismatch)
}

/// Arithmetic and bitwise opcodes, computed in the wider operand kind.
fn arithmetic(op: Opcode, left: Value, right: Value) -> Result<Value, FoldError> {
    let mismatch = FoldError::Operands { op };
    let kind = left.kind().wider(right.kind()).ok_or(mismatch)?;
    match kind {
        ValueKind::Char => {
            let (a, b) = left.as_char().zip(right.as_char()).ok_or(mismatch)?;
            integral_u8(op, a, b).map(Value::Char)
        }
        ValueKind::Integer => {
            let (a, b) = left.as_int().zip(right.as_int()).ok_or(mismatch)?;
            integral_i32(op, a, b).map(Value::Int)
        }
        ValueKind::Long => {
            let (a, b) = left.as_long().zip(right.as_long()).ok_or(mismatch)?;
            integral_i64(op, a, b).map(Value::Long)
        }
        ValueKind::Float => {
            let (a, b) = left.as_float().zip(right.as_float()).ok_or(mismatch)?;
            floating_f32(op, a, b).map(Value::Float)
        }
        ValueKind::Double => {
            let (a, b) = left.as_double().zip(right.as_double()).ok_or(mismatch)?;
            floating_f64(op, a, b).map(Value::Double)
        }
        ValueKind::Bool => Err(mismatch),
    }
}

macro_rules! integral_op {
    ($name:ident, $ty:ty) => {
        /// Wrapping integer arithmetic; shift counts wrap to the bit width.
        fn $name(op: Opcode, a: $ty, b: $ty) -> Result<$ty, FoldError> {
            let shift = || u32::try_from(b).unwrap_or(u32::MAX);
            Ok(match op {
                Opcode::Add => a.wrapping_add(b),
                Opcode::Sub => a.wrapping_sub(b),
                Opcode::Mul => a.wrapping_mul(b),
                Opcode::Div if b == 0 => return Err(FoldError::DivisionByZero),
                Opcode::Div => a.wrapping_div(b),
                Opcode::Mod if b == 0 => return Err(FoldError::DivisionByZero),
                Opcode::Mod => a.wrapping_rem(b),
                Opcode::BitAnd => a & b,
                Opcode::BitOr => a | b,
                Opcode::BitXor => a ^ b,
                Opcode::Shl => a.wrapping_shl(shift()),
                Opcode::Shr => a.wrapping_shr(shift()),
                _ => return Err(FoldError::Operands { op }),
            })
        }
    };
}

integral_op!(integral_u8, u8);
integral_op!(integral_i32, i32);
integral_op!(integral_i64, i64);

macro_rules! floating_op {
    ($name:ident, $ty:ty) => {
        fn $name(op: Opcode, a: $ty, b: $ty) -> Result<$ty, FoldError> {
            Ok(match op {
                Opcode::Add => a + b,
                Opcode::Sub => a - b,
                Opcode::Mul => a * b,
                Opcode::Div => a / b,
                Opcode::Mod => a % b,
                _ => return Err(FoldError::Operands { op }),
            })
        }
    };
}

floating_op!(floating_f32, f32);
floating_op!(floating_f64, f64);
