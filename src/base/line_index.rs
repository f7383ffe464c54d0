//! Line/column resolution for document offsets.
//!
//! Cached positions denormalize their line/column pairs so the store never
//! re-resolves offsets during queries. The [`LineIndex`] is the resolver:
//! built once per document text by the document layer and handed to the
//! merger (stamping) and the remapper (recomputation after edits).

use serde::{Deserialize, Serialize};

/// A position in source text (0-indexed line and column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Maps byte offsets in a document to line/column positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of each line. Always non-empty;
    /// line 0 starts at offset 0.
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    /// Resolve a byte offset to its line/column position.
    ///
    /// Total: offsets past the end of the text resolve as if they were on
    /// the last line, so stamping never fails mid-merge.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text_len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Position::new(line, offset - self.line_starts[line])
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
