use pretty_assertions::assert_eq;

use super::*;

#[test]
fn positions_are_one_based() {
    let index = LineIndex::new("ab\ncd\n\nef");
    assert_eq!(index.line_col(0), (1, 1));
    assert_eq!(index.line_col(1), (1, 2));
    assert_eq!(index.line_col(3), (2, 1));
    assert_eq!(index.line_col(6), (3, 1));
    assert_eq!(index.line_col(8), (4, 2));
    assert_eq!(index.line_count(), 4);
}

#[test]
fn span_start_uses_first_byte() {
    let index = LineIndex::new("x\ny + z");
    assert_eq!(index.span_start(Span::new(4, 7)), (2, 3));
}
