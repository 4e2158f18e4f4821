//! Parser snapshots for one-token backtracking.
//!
//! A snapshot is the cursor by value: the lexer state and the token
//! window. Restoring it rewinds token consumption only. AST nodes,
//! symbols and diagnostics produced in between are kept, so speculation
//! must stick to productions that only inspect tokens.

use crate::{Cursor, Parser};

/// Saved token position.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    #[inline]
    pub fn snapshot(&self) -> Snapshot<'src> {
        Snapshot {
            cursor: self.cursor,
        }
    }

    #[inline]
    pub fn restore(&mut self, snapshot: Snapshot<'src>) {
        self.cursor = snapshot.cursor;
    }

    /// Run `probe` and rewind, returning what it returned.
    pub fn look_ahead<T>(&mut self, probe: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = probe(self);
        self.restore(snapshot);
        result
    }
}
