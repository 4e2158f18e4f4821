use std::fmt::Write;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn alloc(arena: &mut Arena, size: usize) -> ArenaPtr {
    match arena.alloc(size) {
        Ok(ptr) => ptr,
        Err(err) => panic!("allocation of {size} bytes failed: {err}"),
    }
}

#[test]
fn sequential_allocations_are_adjacent() {
    let mut arena = Arena::new();
    let first = alloc(&mut arena, 24);
    let second = alloc(&mut arena, 24);
    assert_eq!(second.offset() - first.offset(), 24);
    assert_eq!(arena.pos(), 48);
}

#[test]
fn rollback_hands_out_the_same_offset_again() {
    let mut arena = Arena::new();
    alloc(&mut arena, 10);
    let mark = arena.checkpoint();
    let before = alloc(&mut arena, 32);
    alloc(&mut arena, 7);

    arena.rollback(mark);
    let after = alloc(&mut arena, 32);
    assert_eq!(before, after);
}

#[test]
fn commit_grows_in_whole_chunks() {
    let mut arena = Arena::new();
    assert_eq!(arena.committed(), 0);

    alloc(&mut arena, 1);
    assert_eq!(arena.committed(), COMMIT_CHUNK);

    alloc(&mut arena, COMMIT_CHUNK);
    assert_eq!(arena.committed(), 2 * COMMIT_CHUNK);

    alloc(&mut arena, 3 * COMMIT_CHUNK);
    assert_eq!(arena.committed() % COMMIT_CHUNK, 0);
    assert!(arena.committed() >= arena.pos());
}

#[test]
fn exceeding_the_reservation_is_an_error() {
    let mut arena = Arena::with_reserve(100);
    alloc(&mut arena, 60);
    let err = arena.alloc(41);
    assert_eq!(
        err,
        Err(AllocError::OutOfReserve {
            requested: 41,
            used: 60,
            reserve: 100,
        })
    );
    // The failed request leaves the cursor where it was.
    assert_eq!(arena.pos(), 60);
    assert!(arena.alloc(40).is_ok());
}

#[test]
fn committed_memory_never_exceeds_reservation() {
    let mut arena = Arena::with_reserve(COMMIT_CHUNK + 5);
    alloc(&mut arena, COMMIT_CHUNK + 5);
    assert_eq!(arena.committed(), COMMIT_CHUNK + 5);
}

#[test]
fn dealloc_is_clamped() {
    let mut arena = Arena::new();
    alloc(&mut arena, 16);
    arena.dealloc(4);
    assert_eq!(arena.pos(), 12);
    arena.dealloc(1000);
    assert_eq!(arena.pos(), 0);
}

#[test]
fn rollback_never_moves_forward() {
    let mut arena = Arena::new();
    let early = arena.checkpoint();
    alloc(&mut arena, 8);
    let late = arena.checkpoint();
    arena.rollback(early);
    arena.rollback(late);
    assert_eq!(arena.pos(), 0);
}

#[test]
fn reset_decommits() {
    let mut arena = Arena::new();
    alloc(&mut arena, 5 * COMMIT_CHUNK);
    arena.clear();
    assert_eq!(arena.pos(), 0);
    assert_eq!(arena.committed(), 5 * COMMIT_CHUNK);

    arena.reset();
    assert_eq!(arena.committed(), 0);
}

#[test]
fn strings_round_trip_and_zeroing_clears_old_bytes() {
    let mut arena = Arena::new();
    let mark = arena.checkpoint();
    let Ok(hello) = arena.alloc_str("hello") else {
        panic!("alloc_str failed");
    };
    assert_eq!(arena.get_str(hello), "hello");

    arena.rollback(mark);
    let Ok(ptr) = arena.alloc_zeroed(5) else {
        panic!("alloc_zeroed failed");
    };
    let slice = ArenaSlice { ptr, len: 5 };
    assert_eq!(arena.bytes(slice), &[0; 5]);
}

#[test]
fn writer_collects_formatted_text() {
    let mut arena = Arena::new();
    alloc(&mut arena, 3);
    let mut writer = ArenaWriter::new(&mut arena);
    let result = write!(writer, "{}_{}{}", "f", 2, "intint");
    assert!(result.is_ok());
    let text = writer.finish();
    assert_eq!(arena.get_str(text), "f_2intint");
}

proptest! {
    #[test]
    fn cursor_tracks_sum_of_sizes(sizes in proptest::collection::vec(0usize..4096, 0..64)) {
        let mut arena = Arena::new();
        let mut expected = 0;
        for size in sizes {
            let ptr = arena.alloc(size);
            prop_assert_eq!(ptr.map(ArenaPtr::offset), Ok(expected));
            expected += size;
            prop_assert!(arena.committed() >= arena.pos());
            prop_assert_eq!(arena.committed() % COMMIT_CHUNK, 0);
        }
        prop_assert_eq!(arena.pos(), expected);
    }
}
