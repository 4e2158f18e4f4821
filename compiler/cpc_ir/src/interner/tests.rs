use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_string_is_pre_interned() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.get(""), Some(Name::EMPTY));
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn interning_is_idempotent() {
    let mut interner = StringInterner::new();
    let a = interner.intern("main");
    let b = interner.intern("printf");
    assert_ne!(a, b);
    assert_eq!(interner.intern("main"), a);
    assert_eq!(interner.lookup(a), "main");
    assert_eq!(interner.lookup(b), "printf");
}

#[test]
fn get_does_not_insert() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn unknown_name_reads_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(77)), "");
}

#[test]
fn many_names_stay_distinct() {
    let mut interner = StringInterner::new();
    let names: Vec<_> = (0..500).map(|i| interner.intern(&format!("v{i}"))).collect();
    for (i, name) in names.iter().enumerate() {
        assert_eq!(interner.lookup(*name), format!("v{i}"));
    }
}

#[test]
fn small_reserve_fails_without_panicking() {
    let mut interner = StringInterner::with_reserve(4);
    assert!(interner.try_intern("abcd").is_ok());
    assert!(interner.try_intern("overflow").is_err());
    assert_eq!(interner.get("overflow"), None);
}
