use pretty_assertions::assert_eq;

use super::*;
use cpc_alloc::ScratchPool;
use cpc_ir::StringInterner;

struct Fixture {
    types: TypeArena,
    interner: StringInterner,
    scratch: ScratchPool,
}

impl Fixture {
    fn new() -> Self {
        let mut interner = StringInterner::new();
        let Ok(types) = TypeArena::new(&mut interner) else {
            panic!("type arena setup failed");
        };
        Fixture {
            types,
            interner,
            scratch: ScratchPool::new(),
        }
    }

    fn overload(&mut self, name: &str, params: &[TypeId], variadic: bool) -> Overload {
        let name = self.interner.intern(name);
        let Ok(mangled) = crate::mangle(
            name,
            params,
            variadic,
            &self.types,
            &mut self.interner,
            &self.scratch,
        ) else {
            panic!("mangle failed");
        };
        Overload {
            mangled,
            params: params.iter().copied().collect(),
            variadic,
            is_native: false,
            ret: TypeId::VOID,
            ty: TypeId::INVALID,
        }
    }
}

#[test]
fn overloads_resolve_by_arity_with_subset_count() {
    let mut fx = Fixture::new();
    let key = ScopedKey::new(fx.interner.intern("f"), 0);
    let one = fx.overload("f", &[TypeId::INTEGER], false);
    let two = fx.overload("f", &[TypeId::INTEGER, TypeId::INTEGER], false);

    let mut funcs = FuncTable::new();
    assert!(!funcs.set(key, one.clone(), &fx.types));
    assert!(!funcs.set(key, two.clone(), &fx.types));
    assert_eq!(funcs.overloads(key).len(), 2);

    let Some((found, count)) = funcs.get(key, &[TypeId::INTEGER], true, &fx.types) else {
        panic!("no overload for f(int)");
    };
    assert_eq!((found.mangled, count), (one.mangled, 1));

    let args = [TypeId::INTEGER, TypeId::INTEGER];
    let Some((found, count)) = funcs.get(key, &args, true, &fx.types) else {
        panic!("no overload for f(int, int)");
    };
    assert_eq!((found.mangled, count), (two.mangled, 2));

    assert!(funcs.get(key, &[], true, &fx.types).is_none());
}

#[test]
fn equal_params_replace_regardless_of_return_type() {
    let mut fx = Fixture::new();
    let key = ScopedKey::new(fx.interner.intern("g"), 0);
    let first = fx.overload("g", &[TypeId::DOUBLE], false);
    let mut second = fx.overload("g", &[TypeId::DOUBLE], false);
    second.ret = TypeId::INTEGER;

    let mut funcs = FuncTable::new();
    funcs.set(key, first, &fx.types);
    assert!(funcs.set(key, second, &fx.types));
    assert_eq!(funcs.overloads(key).len(), 1);
    assert_eq!(funcs.overloads(key)[0].ret, TypeId::INTEGER);
}

#[test]
fn absolute_check_rejects_widening() {
    let mut fx = Fixture::new();
    let key = ScopedKey::new(fx.interner.intern("h"), 0);
    let overload = fx.overload("h", &[TypeId::DOUBLE], false);
    let mut funcs = FuncTable::new();
    funcs.set(key, overload, &fx.types);

    assert!(funcs.get(key, &[TypeId::INTEGER], true, &fx.types).is_none());
    assert!(funcs.get(key, &[TypeId::INTEGER], false, &fx.types).is_some());
    assert!(funcs.get(key, &[TypeId::BOOL], false, &fx.types).is_none());
}

#[test]
fn variadic_absorbs_extra_arguments() {
    let mut fx = Fixture::new();
    let key = ScopedKey::new(fx.interner.intern("printf"), 0);
    let overload = fx.overload("printf", &[TypeId::CSTRING], true);
    let mut funcs = FuncTable::new();
    funcs.set(key, overload, &fx.types);

    let args = [TypeId::CSTRING, TypeId::INTEGER, TypeId::DOUBLE];
    let Some((_, count)) = funcs.get(key, &args, false, &fx.types) else {
        panic!("variadic call rejected");
    };
    assert_eq!(count, 1);
    assert!(funcs.get(key, &[], false, &fx.types).is_none());
}

#[test]
fn deleting_last_overload_tombstones_key() {
    let mut fx = Fixture::new();
    let key = ScopedKey::new(fx.interner.intern("k"), 1);
    let a = fx.overload("k", &[], false);
    let b = fx.overload("k", &[TypeId::CHAR], false);

    let mut funcs = FuncTable::new();
    funcs.set(key, a.clone(), &fx.types);
    funcs.set(key, b.clone(), &fx.types);
    assert_eq!(funcs.del(key, a.mangled).map(|o| o.mangled), Some(a.mangled));
    assert!(funcs.has_name(key));
    assert!(funcs.del(key, a.mangled).is_none());
    assert!(funcs.del(key, b.mangled).is_some());
    assert!(!funcs.has_name(key));
    assert!(funcs.is_empty());
}

#[test]
fn merge_and_depth_cleanup() {
    let mut fx = Fixture::new();
    let top = ScopedKey::new(fx.interner.intern("top"), 0);
    let inner = ScopedKey::new(fx.interner.intern("inner"), 2);
    let top_fn = fx.overload("top", &[], false);
    let inner_fn = fx.overload("inner", &[], false);

    let mut a = FuncTable::new();
    let mut b = FuncTable::new();
    a.set(top, top_fn, &fx.types);
    b.set(inner, inner_fn, &fx.types);
    a.add_all(&b);
    assert_eq!(a.len(), 2);

    a.remove_depth(2);
    assert!(a.has_name(top));
    assert!(!a.has_name(inner));
    assert_eq!(b.del_full(inner).map(|chain| chain.len()), Some(1));
    assert!(b.overloads(inner).is_empty());
}
