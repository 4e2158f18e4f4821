//! Symbol tables.
//!
//! All tables are keyed by [`ScopedKey`] (interned name plus scope depth) and
//! share one open-addressed [`OpenTable`]. Searching outer depths is left to
//! the caller; [`Scope`] tracks the current depth and the active
//! `namespace`/`using` contexts.

mod func;
mod mangle;
mod scope;
mod table;
mod var;

use cpc_ir::{Name, TypeId};

pub use func::{FuncTable, Overload};
pub use mangle::{lookup_qualified, mangle, qualify};
pub use scope::Scope;
pub use table::{OpenTable, MAX_LOAD_DENOM, MAX_LOAD_NUMER, MIN_CAPACITY};
pub use var::VarTable;

/// Key shared by every table: a name declared at a scope depth.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopedKey {
    pub name: Name,
    pub depth: u32,
}

impl ScopedKey {
    #[inline]
    pub const fn new(name: Name, depth: u32) -> Self {
        ScopedKey { name, depth }
    }
}

/// Struct and enum names.
pub type TypeNameTable = OpenTable<ScopedKey, TypeId>;

/// Every table the parser and checker consult, cleaned up together at
/// scope exit.
#[derive(Default)]
pub struct SymbolTables {
    pub vars: VarTable,
    pub funcs: FuncTable,
    pub types: TypeNameTable,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry declared at `depth`.
    pub fn leave_depth(&mut self, depth: u32) {
        self.vars.remove_depth(depth);
        self.funcs.remove_depth(depth);
        self.types.retain(|key, _| key.depth != depth);
    }
}
