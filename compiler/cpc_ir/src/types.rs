//! Type descriptors.
//!
//! Every type, basic or composite, is a pool-allocated [`TypeDesc`] carrying
//! its canonical text as an interned [`Name`]. Two descriptors are
//! type-equal iff their canonical text is the same name.
//!
//! Basic types are allocated first, so their ids are the `TypeId` constants
//! below.

use std::fmt::Write;

use cpc_alloc::{AllocError, ArenaWriter, Pool, ScratchPool};

use crate::{FieldRange, Name, NameRange, StringInterner, TypeId, TypeRange};

impl TypeId {
    pub const INVALID: TypeId = TypeId::from_raw(0);
    pub const VOID: TypeId = TypeId::from_raw(1);
    pub const INTEGER: TypeId = TypeId::from_raw(2);
    pub const LONG: TypeId = TypeId::from_raw(3);
    pub const FLOAT: TypeId = TypeId::from_raw(4);
    pub const DOUBLE: TypeId = TypeId::from_raw(5);
    pub const BOOL: TypeId = TypeId::from_raw(6);
    pub const CHAR: TypeId = TypeId::from_raw(7);
    pub const CSTRING: TypeId = TypeId::from_raw(8);
}

const PRIMITIVES: [(TypeId, TypeKind); 9] = [
    (TypeId::INVALID, TypeKind::Invalid),
    (TypeId::VOID, TypeKind::Void),
    (TypeId::INTEGER, TypeKind::Integer),
    (TypeId::LONG, TypeKind::Long),
    (TypeId::FLOAT, TypeKind::Float),
    (TypeId::DOUBLE, TypeKind::Double),
    (TypeId::BOOL, TypeKind::Bool),
    (TypeId::CHAR, TypeKind::Char),
    (TypeId::CSTRING, TypeKind::CString),
];

/// Signature of a function type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FuncSig {
    pub params: TypeRange,
    pub param_names: NameRange,
    pub ret: TypeId,
    /// Trailing `...`: any number of extra arguments.
    pub variadic: bool,
}

impl FuncSig {
    #[inline]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
    pub name: Name,
    pub ty: TypeId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    /// Placeholder after an error; compatible with everything.
    Invalid,
    Void,
    Integer,
    Long,
    Float,
    Double,
    Bool,
    Char,
    CString,
    Function(FuncSig),
    Struct { name: Name, fields: FieldRange },
    Enum { name: Name, variants: NameRange },
}

impl TypeKind {
    /// Canonical spelling of a basic kind.
    pub const fn basic_text(&self) -> Option<&'static str> {
        Some(match self {
            TypeKind::Invalid => "INVALID",
            TypeKind::Void => "void",
            TypeKind::Integer => "int",
            TypeKind::Long => "long",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Bool => "bool",
            TypeKind::Char => "char",
            TypeKind::CString => "cstring",
            TypeKind::Function(_) | TypeKind::Struct { .. } | TypeKind::Enum { .. } => {
                return None
            }
        })
    }

    /// Name used in diagnostics (`Integer`, `Bool`, ...).
    pub const fn basic_display(&self) -> Option<&'static str> {
        Some(match self {
            TypeKind::Invalid => "Invalid",
            TypeKind::Void => "Void",
            TypeKind::Integer => "Integer",
            TypeKind::Long => "Long",
            TypeKind::Float => "Float",
            TypeKind::Double => "Double",
            TypeKind::Bool => "Bool",
            TypeKind::Char => "Char",
            TypeKind::CString => "CString",
            TypeKind::Function(_) | TypeKind::Struct { .. } | TypeKind::Enum { .. } => {
                return None
            }
        })
    }

    /// Widening order `char < integer < long < float < double`.
    pub const fn numeric_rank(&self) -> Option<u8> {
        match self {
            TypeKind::Char => Some(0),
            TypeKind::Integer => Some(1),
            TypeKind::Long => Some(2),
            TypeKind::Float => Some(3),
            TypeKind::Double => Some(4),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeDesc {
    pub kind: TypeKind,
    /// Interned canonical text.
    pub text: Name,
}

/// Pool of type descriptors plus the flat lists they reference.
pub struct TypeArena {
    types: Pool<TypeDesc, TypeId>,
    type_lists: Vec<TypeId>,
    name_lists: Vec<Name>,
    fields: Vec<Field>,
}

impl TypeArena {
    pub fn new(interner: &mut StringInterner) -> Result<Self, AllocError> {
        Self::with_max_slots(interner, cpc_alloc::DEFAULT_POOL_SLOTS)
    }

    pub fn with_max_slots(
        interner: &mut StringInterner,
        max_slots: usize,
    ) -> Result<Self, AllocError> {
        let mut arena = TypeArena {
            types: Pool::with_max_slots(max_slots),
            type_lists: Vec::new(),
            name_lists: Vec::new(),
            fields: Vec::new(),
        };
        for (expected, kind) in PRIMITIVES {
            let text = interner.try_intern(kind.basic_text().unwrap_or_default())?;
            let id = arena.types.alloc(TypeDesc { kind, text })?;
            debug_assert_eq!(id, expected);
        }
        Ok(arena)
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeDesc {
        &self.types[id]
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.types[id].kind
    }

    /// Type-equality: identical canonical text.
    #[inline]
    pub fn equal(&self, a: TypeId, b: TypeId) -> bool {
        a == b || self.types[a].text == self.types[b].text
    }

    /// Relaxed check used for arguments, initializers and returns: equal
    /// types, numeric widening, or an `Invalid` operand.
    pub fn compatible(&self, actual: TypeId, expected: TypeId) -> bool {
        if self.equal(actual, expected) || actual == TypeId::INVALID || expected == TypeId::INVALID
        {
            return true;
        }
        match (self.numeric_rank(actual), self.numeric_rank(expected)) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }

    #[inline]
    pub fn numeric_rank(&self, id: TypeId) -> Option<u8> {
        self.kind(id).numeric_rank()
    }

    #[inline]
    pub fn is_numeric(&self, id: TypeId) -> bool {
        self.numeric_rank(id).is_some()
    }

    /// Char, integer or long.
    #[inline]
    pub fn is_integral(&self, id: TypeId) -> bool {
        self.numeric_rank(id).is_some_and(|rank| rank <= 2)
    }

    /// The wider of two numeric types.
    pub fn wider(&self, a: TypeId, b: TypeId) -> TypeId {
        match (self.numeric_rank(a), self.numeric_rank(b)) {
            (Some(ra), Some(rb)) if rb > ra => b,
            _ => a,
        }
    }

    pub fn function(&self, id: TypeId) -> Option<&FuncSig> {
        match self.kind(id) {
            TypeKind::Function(sig) => Some(sig),
            _ => None,
        }
    }

    #[inline]
    pub fn params(&self, sig: &FuncSig) -> &[TypeId] {
        &self.type_lists[sig.params.to_range()]
    }

    #[inline]
    pub fn param_names(&self, sig: &FuncSig) -> &[Name] {
        &self.name_lists[sig.param_names.to_range()]
    }

    #[inline]
    pub fn fields(&self, range: FieldRange) -> &[Field] {
        &self.fields[range.to_range()]
    }

    #[inline]
    pub fn variants(&self, range: NameRange) -> &[Name] {
        &self.name_lists[range.to_range()]
    }

    /// Diagnostic spelling of a type.
    pub fn describe<'a>(&'a self, id: TypeId, interner: &'a StringInterner) -> &'a str {
        let desc = self.get(id);
        match desc.kind.basic_display() {
            Some(display) => display,
            None => interner.lookup(desc.text),
        }
    }

    /// Allocate a function type. The canonical text is formatted in a
    /// scratch arena, e.g. `func(int,cstring,...)->void`.
    pub fn make_function(
        &mut self,
        params: &[TypeId],
        names: &[Name],
        ret: TypeId,
        variadic: bool,
        interner: &mut StringInterner,
        scratch: &ScratchPool,
    ) -> Result<TypeId, AllocError> {
        let text = {
            let mut arena = scratch.get();
            let mut writer = ArenaWriter::new(&mut arena);
            let mut spelled = write!(writer, "func(").is_ok();
            for (idx, &param) in params.iter().enumerate() {
                let sep = if idx == 0 { "" } else { "," };
                spelled &= write!(writer, "{sep}{}", interner.lookup(self.types[param].text)).is_ok();
            }
            if variadic {
                let sep = if params.is_empty() { "" } else { "," };
                spelled &= write!(writer, "{sep}...").is_ok();
            }
            spelled &= write!(writer, ")->{}", interner.lookup(self.types[ret].text)).is_ok();
            let written = writer.finish();
            if !spelled {
                return Err(AllocError::OutOfReserve {
                    requested: written.len(),
                    used: arena.pos(),
                    reserve: arena.reserve(),
                });
            }
            interner.try_intern(arena.get_str(written))?
        };

        let sig = FuncSig {
            params: TypeRange::new(list_start(&self.type_lists), list_len(params)),
            param_names: NameRange::new(list_start(&self.name_lists), list_len(names)),
            ret,
            variadic,
        };
        self.type_lists.extend_from_slice(params);
        self.name_lists.extend_from_slice(names);
        self.types.alloc(TypeDesc {
            kind: TypeKind::Function(sig),
            text,
        })
    }

    /// Allocate a struct type; its canonical text is its name.
    pub fn make_struct(&mut self, name: Name, fields: &[Field]) -> Result<TypeId, AllocError> {
        let range = FieldRange::new(list_start(&self.fields), list_len(fields));
        self.fields.extend_from_slice(fields);
        self.types.alloc(TypeDesc {
            kind: TypeKind::Struct {
                name,
                fields: range,
            },
            text: name,
        })
    }

    pub fn make_enum(&mut self, name: Name, variants: &[Name]) -> Result<TypeId, AllocError> {
        let range = NameRange::new(list_start(&self.name_lists), list_len(variants));
        self.name_lists.extend_from_slice(variants);
        self.types.alloc(TypeDesc {
            kind: TypeKind::Enum {
                name,
                variants: range,
            },
            text: name,
        })
    }

    /// Number of live descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "side tables are bounded by the pool slot ceiling"
)]
fn list_start<T>(list: &[T]) -> u32 {
    list.len() as u32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "side tables are bounded by the pool slot ceiling"
)]
fn list_len<T>(items: &[T]) -> u32 {
    items.len() as u32
}
