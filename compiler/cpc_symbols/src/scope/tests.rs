use pretty_assertions::assert_eq;

use super::*;
use cpc_ir::StringInterner;

#[test]
fn using_ends_with_its_block() {
    let mut interner = StringInterner::new();
    let math = interner.intern("math");
    let io = interner.intern("io");

    let mut scope = Scope::new();
    scope.push_using(math);
    assert_eq!(scope.enter(), 1);
    scope.push_using(io);
    assert_eq!(scope.lookup_prefixes().collect::<Vec<_>>(), vec![io, math]);

    assert_eq!(scope.leave(), 1);
    assert_eq!(scope.depth(), 0);
    assert_eq!(scope.lookup_prefixes().collect::<Vec<_>>(), vec![math]);
}

#[test]
fn namespaces_nest_and_pop() {
    let mut interner = StringInterner::new();
    let outer = interner.intern("a");
    let inner = interner.intern("a::b");
    let helper = interner.intern("helper");

    let mut scope = Scope::new();
    scope.push_namespace(outer);
    scope.push_namespace(inner);
    scope.push_using(helper);
    assert_eq!(scope.namespace(), Some(inner));

    assert_eq!(scope.pop_namespace(), Some(inner));
    assert_eq!(scope.namespace(), Some(outer));
    assert_eq!(scope.lookup_prefixes().collect::<Vec<_>>(), vec![outer]);
    assert_eq!(scope.pop_namespace(), Some(outer));
    assert_eq!(scope.pop_namespace(), None);
}
