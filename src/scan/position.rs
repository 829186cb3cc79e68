//! Per-file offset to line/column mapping.

/// A resolved source position. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Line-start table for one file's bytes. Rebuilt for every file.
#[derive(Debug, Clone)]
pub struct PositionTable {
    line_starts: Vec<usize>,
    len: usize,
}

impl PositionTable {
    #[must_use]
    pub fn new(source: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Resolves `offset`. The end-of-file offset is valid; anything past it is not.
    #[must_use]
    pub fn position(&self, offset: usize) -> Option<Position> {
        if offset > self.len {
            return None;
        }
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Some(Position {
            line: idx + 1,
            column: offset - self.line_starts[idx] + 1,
            offset,
        })
    }

    /// Returns `true` if `[start, end)` can be sliced out of the buffer.
    ///
    /// `end` is exclusive, so `end == len` is a node that runs to end of file
    /// (a last line with no trailing newline) and slices directly.
    #[must_use]
    pub fn is_sliceable(&self, start: usize, end: usize) -> bool {
        start < self.len && start <= end && end <= self.len
    }
}
