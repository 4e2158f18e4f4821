//! Link names for overloads and namespace members.

use std::fmt::{self, Write};

use cpc_alloc::{AllocError, ArenaWriter, ScratchPool};
use cpc_ir::{Name, StringInterner, TypeArena, TypeId};

/// `name_<arity><param types>`, e.g. `f_2intint`. A trailing `...` adds
/// `_va`.
pub fn mangle(
    name: Name,
    params: &[TypeId],
    variadic: bool,
    types: &TypeArena,
    interner: &mut StringInterner,
    scratch: &ScratchPool,
) -> Result<Name, AllocError> {
    intern_with(interner, scratch, |interner, out| {
        write!(out, "{}_{}", interner.lookup(name), params.len())?;
        for &param in params {
            out.write_str(interner.lookup(types.get(param).text))?;
        }
        if variadic {
            out.write_str("_va")?;
        }
        Ok(())
    })
}

/// `prefix::name`.
pub fn qualify(
    prefix: Name,
    name: Name,
    interner: &mut StringInterner,
    scratch: &ScratchPool,
) -> Result<Name, AllocError> {
    intern_with(interner, scratch, |interner, out| {
        write!(out, "{}::{}", interner.lookup(prefix), interner.lookup(name))
    })
}

/// Existing interned `prefix::name`. A qualified name that was never
/// interned cannot have been declared.
pub fn lookup_qualified(
    prefix: Name,
    name: Name,
    interner: &StringInterner,
    scratch: &ScratchPool,
) -> Option<Name> {
    let mut arena = scratch.get();
    let mut writer = ArenaWriter::new(&mut arena);
    write!(writer, "{}::{}", interner.lookup(prefix), interner.lookup(name)).ok()?;
    let text = writer.finish();
    interner.get(arena.get_str(text))
}

/// Format into a scratch arena, then intern the result.
fn intern_with(
    interner: &mut StringInterner,
    scratch: &ScratchPool,
    format: impl FnOnce(&StringInterner, &mut ArenaWriter<'_>) -> fmt::Result,
) -> Result<Name, AllocError> {
    let mut arena = scratch.get();
    let mut writer = ArenaWriter::new(&mut arena);
    let formatted = format(interner, &mut writer);
    let text = writer.finish();
    if formatted.is_err() {
        return Err(AllocError::OutOfReserve {
            requested: text.len(),
            used: arena.pos(),
            reserve: arena.reserve(),
        });
    }
    interner.try_intern(arena.get_str(text))
}
