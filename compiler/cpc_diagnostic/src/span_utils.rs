//! Line and column lookup.

use cpc_ir::Span;

/// Byte offset of every line start, for O(log L) position lookup.
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(idx, _)| u32::try_from(idx + 1).unwrap_or(u32::MAX)),
        );
        LineIndex { starts }
    }

    /// 1-based (line, column) of a byte offset. Columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.starts.get(line_idx).copied().unwrap_or(0);
        let line = u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1;
        (line, offset - line_start + 1)
    }

    #[inline]
    pub fn span_start(&self, span: Span) -> (u32, u32) {
        self.line_col(span.start)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests;
