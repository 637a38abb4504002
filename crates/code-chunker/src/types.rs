use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A line-aligned slice of a source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// First line (0-indexed)
    pub start: usize,

    /// Line after the last one (0-indexed, exclusive)
    pub end: usize,

    /// Lines `[start, end)` joined by `\n`
    pub text: String,
}

impl Chunk {
    /// Materialize a line span against its source buffer
    #[must_use]
    pub fn from_line_span(span: Span, source: &[u8]) -> Self {
        Self {
            start: span.start,
            end: span.end,
            text: span.extract_lines(source),
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if chunk contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start && line < self.end
    }

    /// Line range of this chunk as a [`Span`]
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}
