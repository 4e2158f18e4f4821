use pretty_assertions::assert_eq;

use super::*;
use cpc_ir::StringInterner;

#[test]
fn innermost_declaration_wins() {
    let mut interner = StringInterner::new();
    let x = interner.intern("x");
    let mut vars = VarTable::new();
    assert!(vars.set(ScopedKey::new(x, 0), TypeId::INTEGER));
    assert!(vars.set(ScopedKey::new(x, 2), TypeId::BOOL));
    assert_eq!(vars.resolve(x, 3), Some((TypeId::BOOL, 2)));
    assert_eq!(vars.resolve(x, 1), Some((TypeId::INTEGER, 0)));

    vars.remove_depth(2);
    assert_eq!(vars.resolve(x, 3), Some((TypeId::INTEGER, 0)));
    assert_eq!(vars.len(), 1);
}

#[test]
fn redeclaring_overwrites() {
    let mut interner = StringInterner::new();
    let x = interner.intern("x");
    let mut vars = VarTable::new();
    vars.set(ScopedKey::new(x, 1), TypeId::INTEGER);
    assert!(!vars.set(ScopedKey::new(x, 1), TypeId::DOUBLE));
    assert_eq!(vars.get(ScopedKey::new(x, 1)), Some(TypeId::DOUBLE));
    assert_eq!(vars.del(ScopedKey::new(x, 1)), Some(TypeId::DOUBLE));
    assert!(vars.is_empty());
}
