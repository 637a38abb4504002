//! Chunk-span computation.
//!
//! ```text
//! SyntaxNode + source
//!     │
//!     ├──> build_byte_spans   greedy packing of siblings under max_chunk_size
//!     ├──> close_gaps         spans[i].end = spans[i + 1].start
//!     ├──> coalesce           merge until > threshold non-whitespace and a newline
//!     ├──> absorb_trailing_gap
//!     └──> project_lines      byte spans → line spans, degenerate ones dropped
//! ```

use crate::config::ChunkerConfig;
use crate::span::Span;
use crate::tree::SyntaxNode;

/// Pack the children of `node` into byte spans no larger than `max_chunk_size`.
///
/// A child that alone exceeds the limit is split by recursing into its own
/// children; the recursion depth equals the nesting depth of the tree. When
/// that happens the running span is flushed even if it is empty, so the
/// result may contain zero-length spans.
pub fn build_byte_spans<N: SyntaxNode>(node: &N, max_chunk_size: usize, start: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    pack_children(node, max_chunk_size, start, &mut spans);
    spans
}

fn pack_children<N: SyntaxNode>(
    node: &N,
    max_chunk_size: usize,
    start: usize,
    spans: &mut Vec<Span>,
) {
    let mut current = Span::at(start);

    for index in 0..node.child_count() {
        let Some(child) = node.child(index) else {
            continue;
        };
        let child_span = Span::new(child.start_byte(), child.end_byte());

        if child_span.len() > max_chunk_size {
            spans.push(current);
            pack_children(&child, max_chunk_size, child_span.start, spans);
            current = Span::at(child_span.end);
        } else if current.len() + child_span.len() > max_chunk_size {
            spans.push(current);
            current = child_span;
        } else {
            current.end = child_span.end;
        }
    }

    if !current.is_empty() {
        spans.push(current);
    }
}

/// Stretch every span but the last so it ends where the next one starts.
///
/// The final span keeps the end produced by the builder.
pub fn close_gaps(spans: &mut [Span]) {
    for i in 1..spans.len() {
        spans[i - 1].end = spans[i].start;
    }
}

/// Number of bytes in `bytes` that are not ASCII whitespace.
#[must_use]
pub fn non_whitespace_len(bytes: &[u8]) -> usize {
    bytes.iter().filter(|b| !b.is_ascii_whitespace()).count()
}

/// Merge adjacent gap-closed spans until the running region holds more than
/// `threshold` non-whitespace bytes and at least one newline.
///
/// Whatever is left over at the end is emitted as is, so the last span may
/// fall short of the threshold.
#[must_use]
pub fn coalesce(spans: &[Span], source: &[u8], threshold: usize) -> Vec<Span> {
    let mut merged = Vec::new();
    let mut current = Span::default();

    for span in spans {
        if current.is_empty() {
            current = *span;
        } else {
            current.end = span.end;
        }

        let snippet = current.slice(source);
        if non_whitespace_len(snippet) > threshold && snippet.contains(&b'\n') {
            merged.push(current);
            current = Span::at(span.end);
        }
    }

    if !current.is_empty() {
        merged.push(current);
    }

    merged
}

/// Hand the bytes after the final span to that span, the same way
/// `close_gaps` hands interior gaps to the span before them.
pub fn absorb_trailing_gap(spans: &mut [Span], source_len: usize) {
    if let Some(last) = spans.last_mut() {
        if last.end < source_len {
            last.end = source_len;
        }
    }
}

/// Byte offset → 0-based line number lookup over a source buffer.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
    len: usize,
}

impl LineIndex {
    #[must_use]
    pub fn new(source: &[u8]) -> Self {
        let newlines = source
            .iter()
            .enumerate()
            .filter_map(|(offset, byte)| (*byte == b'\n').then_some(offset))
            .collect();

        Self {
            newlines,
            len: source.len(),
        }
    }

    /// Number of lines, counting the (possibly empty) text after the final
    /// newline as a line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Line containing `offset`. Offsets at or past the end of the buffer map
    /// to `line_count()`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        if offset >= self.len {
            return self.line_count();
        }
        self.newlines.partition_point(|&newline| newline < offset)
    }
}

/// Convert byte spans to line spans, dropping any whose start and end land on
/// the same line.
#[must_use]
pub fn project_lines(spans: &[Span], index: &LineIndex) -> Vec<Span> {
    spans
        .iter()
        .filter_map(|span| {
            let start = index.line_of(span.start);
            let end = index.line_of(span.end);
            (end > start).then_some(Span::new(start, end))
        })
        .collect()
}

/// Run the full pipeline over `root` and return ordered, non-overlapping line
/// spans.
#[must_use]
pub fn line_spans<N: SyntaxNode>(root: &N, source: &[u8], config: &ChunkerConfig) -> Vec<Span> {
    let mut spans = build_byte_spans(root, config.max_chunk_size, 0);
    close_gaps(&mut spans);

    let mut merged = coalesce(&spans, source, config.coalesce_threshold);
    // Every raw span was empty, e.g. a lone oversized leaf: keep the content.
    if merged.is_empty() && non_whitespace_len(source) > 0 {
        merged.push(Span::new(0, source.len()));
    }
    absorb_trailing_gap(&mut merged, source.len());

    let lines = project_lines(&merged, &LineIndex::new(source));
    log::trace!(
        "{} raw spans, {} after coalescing, {} line spans",
        spans.len(),
        merged.len(),
        lines.len()
    );
    lines
}

#[cfg(test)]
pub(crate) mod test_tree {
    use crate::tree::SyntaxNode;

    /// Hand-built syntax tree for exercising span building without a parser.
    #[derive(Debug, Clone)]
    pub struct TestNode {
        pub start: usize,
        pub end: usize,
        pub children: Vec<TestNode>,
    }

    pub fn leaf(start: usize, end: usize) -> TestNode {
        TestNode {
            start,
            end,
            children: Vec::new(),
        }
    }

    pub fn node(start: usize, end: usize, children: Vec<TestNode>) -> TestNode {
        TestNode {
            start,
            end,
            children,
        }
    }

    impl SyntaxNode for TestNode {
        fn child_count(&self) -> usize {
            self.children.len()
        }

        fn child(&self, index: usize) -> Option<Self> {
            self.children.get(index).cloned()
        }

        fn start_byte(&self) -> usize {
            self.start
        }

        fn end_byte(&self) -> usize {
            self.end
        }
    }
}
