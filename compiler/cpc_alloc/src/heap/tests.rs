use pretty_assertions::assert_eq;

use super::*;

fn alloc(heap: &mut Heap, size: usize) -> HeapBlock {
    match heap.alloc(size) {
        Ok(blk) => blk,
        Err(err) => panic!("heap alloc of {size} failed: {err}"),
    }
}

#[test]
fn sizes_are_rounded_to_alignment() {
    let mut heap = Heap::new();
    let blk = alloc(&mut heap, 3);
    assert_eq!(blk, HeapBlock { offset: 0, size: 8 });
    assert_eq!(heap.committed(), COMMIT_CHUNK);
}

#[test]
fn first_fit_reuses_freed_block() {
    let mut heap = Heap::new();
    let a = alloc(&mut heap, 64);
    let b = alloc(&mut heap, 64);
    assert_eq!(heap.dealloc(a), Ok(()));

    let c = alloc(&mut heap, 32);
    assert_eq!(c.offset, a.offset);
    assert!(c.offset < b.offset);
}

#[test]
fn neighbours_coalesce_on_free() {
    let mut heap = Heap::new();
    let a = alloc(&mut heap, 16);
    let b = alloc(&mut heap, 16);
    let c = alloc(&mut heap, 16);
    let _guard = alloc(&mut heap, 16);

    assert_eq!(heap.dealloc(a), Ok(()));
    assert_eq!(heap.dealloc(c), Ok(()));
    assert_eq!(heap.dealloc(b), Ok(()));

    // a, b and c merged back into one 48-byte range at offset 0.
    let merged = alloc(&mut heap, 48);
    assert_eq!(merged.offset, 0);
}

#[test]
fn double_free_is_rejected() {
    let mut heap = Heap::new();
    let a = alloc(&mut heap, 24);
    assert_eq!(heap.dealloc(a), Ok(()));
    assert_eq!(heap.dealloc(a), Err(AllocError::InvalidFree { offset: a.offset }));
}

#[test]
fn large_request_extends_the_committed_tail() {
    let mut heap = Heap::new();
    alloc(&mut heap, 8);
    let big = alloc(&mut heap, 3 * COMMIT_CHUNK);
    assert_eq!(big.offset, 8);
    assert!(heap.committed() >= 3 * COMMIT_CHUNK + 8);
    assert_eq!(heap.committed() % COMMIT_CHUNK, 0);
}

#[test]
fn reservation_is_enforced() {
    let mut heap = Heap::with_reserve(COMMIT_CHUNK);
    alloc(&mut heap, COMMIT_CHUNK - 8);
    assert!(matches!(
        heap.alloc(16),
        Err(AllocError::OutOfReserve { .. })
    ));
    assert!(heap.alloc(8).is_ok());
}

#[test]
fn block_bytes_are_writable() {
    let mut heap = Heap::new();
    let blk = alloc(&mut heap, 4);
    heap.bytes_mut(blk)[..4].copy_from_slice(b"cpcm");
    assert_eq!(&heap.bytes(blk)[..4], b"cpcm");
}

#[test]
fn clear_frees_all_committed_memory() {
    let mut heap = Heap::new();
    alloc(&mut heap, 100);
    alloc(&mut heap, 100);
    heap.clear();
    assert_eq!(heap.free_bytes(), heap.committed());
    assert_eq!(alloc(&mut heap, 8).offset, 0);
}
