//! Bytecode chunks.
//!
//! Layout: one opcode byte, followed by a one-byte operand for `PUSH`
//! (constant-pool index) and `LOAD` (name index). Chunks are built and
//! run in one go; they are never persisted.

use cpc_ir::{BinaryOp, Name, UnaryOp};

use crate::{FoldError, Value};

/// Constant-pool and name-table indices are single bytes.
pub const MAX_CONSTANTS: usize = 256;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Push,
    Pop,
    /// Push the value of a constant binding.
    Load,

    Add,
    Sub,
    Mul,
    Div,
    Mod,

    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    And,
    Or,

    Neg,
    Not,
    BitNot,
}

impl Opcode {
    const ALL: [Opcode; 24] = [
        Opcode::Push,
        Opcode::Pop,
        Opcode::Load,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::BitAnd,
        Opcode::BitOr,
        Opcode::BitXor,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Eq,
        Opcode::NotEq,
        Opcode::Lt,
        Opcode::LtEq,
        Opcode::Gt,
        Opcode::GtEq,
        Opcode::And,
        Opcode::Or,
        Opcode::Neg,
        Opcode::Not,
        Opcode::BitNot,
    ];

    #[inline]
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Self::ALL.get(usize::from(byte)).copied()
    }

    pub const fn from_binary(op: BinaryOp) -> Opcode {
        match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::Mod => Opcode::Mod,
            BinaryOp::BitAnd => Opcode::BitAnd,
            BinaryOp::BitOr => Opcode::BitOr,
            BinaryOp::BitXor => Opcode::BitXor,
            BinaryOp::Shl => Opcode::Shl,
            BinaryOp::Shr => Opcode::Shr,
            BinaryOp::Eq => Opcode::Eq,
            BinaryOp::NotEq => Opcode::NotEq,
            BinaryOp::Lt => Opcode::Lt,
            BinaryOp::LtEq => Opcode::LtEq,
            BinaryOp::Gt => Opcode::Gt,
            BinaryOp::GtEq => Opcode::GtEq,
            BinaryOp::And => Opcode::And,
            BinaryOp::Or => Opcode::Or,
        }
    }

    /// `None` for unary plus (no code) and for the mutating `++`/`--`,
    /// which are never constant.
    pub const fn from_unary(op: UnaryOp) -> Option<Opcode> {
        match op {
            UnaryOp::Neg => Some(Opcode::Neg),
            UnaryOp::Not => Some(Opcode::Not),
            UnaryOp::BitNot => Some(Opcode::BitNot),
            UnaryOp::Plus | UnaryOp::PreInc | UnaryOp::PreDec => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Load => "LOAD",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::BitAnd => "AND",
            Opcode::BitOr => "OR",
            Opcode::BitXor => "XOR",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
            Opcode::Eq => "EQ",
            Opcode::NotEq => "NE",
            Opcode::Lt => "LT",
            Opcode::LtEq => "LE",
            Opcode::Gt => "GT",
            Opcode::GtEq => "GE",
            Opcode::And => "LAND",
            Opcode::Or => "LOR",
            Opcode::Neg => "NEG",
            Opcode::Not => "NOT",
            Opcode::BitNot => "BNOT",
        }
    }
}

/// Opcode bytes plus the constant pool and name table they index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chunk {
    pub code: Vec<u8>,
    pub constants: Vec<Value>,
    pub names: Vec<Name>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn write_op(&mut self, op: Opcode) {
        self.code.push(op as u8);
    }

    /// Emit `PUSH <index>` for `value`.
    pub fn push_constant(&mut self, value: Value) -> Result<(), FoldError> {
        let index = table_index(self.constants.len())?;
        self.constants.push(value);
        self.write_op(Opcode::Push);
        self.code.push(index);
        Ok(())
    }

    /// Emit `LOAD <index>` for the binding `name`.
    pub fn load(&mut self, name: Name) -> Result<(), FoldError> {
        let index = match self.names.iter().position(|&n| n == name) {
            Some(existing) => table_index(existing)?,
            None => {
                let index = table_index(self.names.len())?;
                self.names.push(name);
                index
            }
        };
        self.write_op(Opcode::Load);
        self.code.push(index);
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

fn table_index(len: usize) -> Result<u8, FoldError> {
    u8::try_from(len).map_err(|_| FoldError::TooManyConstants)
}
