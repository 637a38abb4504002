/// Read-only view of a concrete syntax tree node.
///
/// Span building only needs byte extents and ordered children; node kinds are
/// never inspected.
pub trait SyntaxNode: Sized {
    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;

    fn start_byte(&self) -> usize;

    fn end_byte(&self) -> usize;
}

impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn child(&self, index: usize) -> Option<Self> {
        tree_sitter::Node::child(self, index)
    }

    fn start_byte(&self) -> usize {
        tree_sitter::Node::start_byte(self)
    }

    fn end_byte(&self) -> usize {
        tree_sitter::Node::end_byte(self)
    }
}
