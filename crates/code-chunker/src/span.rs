use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` region.
///
/// The same type carries byte offsets and line numbers; which one depends on
/// the pipeline stage that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span positioned at `offset`
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// `end - start`, saturating at zero for inverted spans
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes covered by this span, or nothing if it falls outside `source`.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        source.get(self.start..self.end).unwrap_or_default()
    }

    /// Lines `[start, end)` of `source` joined by `\n`.
    ///
    /// A start past the last line yields an empty string; an end past the
    /// last line is clamped.
    #[must_use]
    pub fn extract_lines(&self, source: &[u8]) -> String {
        let lines: Vec<&[u8]> = source.split(|b| *b == b'\n').collect();
        if self.start >= lines.len() {
            return String::new();
        }
        let end = self.end.min(lines.len());
        if end <= self.start {
            return String::new();
        }

        String::from_utf8_lossy(&lines[self.start..end].join(&b'\n')).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_empty() {
        assert_eq!(Span::new(3, 10).len(), 7);
        assert!(Span::at(5).is_empty());
        assert!(!Span::new(0, 1).is_empty());
        assert_eq!(Span::new(10, 3).len(), 0);
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let source = b"abcdef";
        assert_eq!(Span::new(1, 3).slice(source), b"bc");
        assert_eq!(Span::new(4, 99).slice(source), b"");
        assert_eq!(Span::new(5, 2).slice(source), b"");
    }

    #[test]
    fn test_extract_lines() {
        let source = b"one\ntwo\nthree\n";
        assert_eq!(Span::new(0, 2).extract_lines(source), "one\ntwo");
        assert_eq!(Span::new(1, 3).extract_lines(source), "two\nthree");
        // The empty string after the final newline counts as a line.
        assert_eq!(Span::new(2, 4).extract_lines(source), "three\n");
    }

    #[test]
    fn test_extract_lines_clamps() {
        let source = b"one\ntwo";
        assert_eq!(Span::new(1, 10).extract_lines(source), "two");
        assert_eq!(Span::new(2, 3).extract_lines(source), "");
        assert_eq!(Span::new(7, 9).extract_lines(source), "");
    }

    #[test]
    fn test_extract_lines_keeps_carriage_returns() {
        let source = b"a\r\nb\r\n";
        assert_eq!(Span::new(0, 2).extract_lines(source), "a\r\nb\r");
    }
}
