use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::{Grammar, LanguageRegistry};
use crate::span::Span;
use crate::spans;
use crate::tree::SyntaxNode;
use crate::types::Chunk;
use std::path::Path;

/// Main chunker interface for processing code
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
    registry: LanguageRegistry,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
            registry: LanguageRegistry::standard(),
        }
    }
}

impl Chunker {
    /// Create a chunker with the standard language registry
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        Self::with_registry(config, LanguageRegistry::standard())
    }

    /// Create a chunker with an explicit language registry
    pub fn with_registry(config: ChunkerConfig, registry: LanguageRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Read, parse and chunk a file.
    ///
    /// The language is resolved before the file is touched, so unknown or
    /// unwired file types fail without any I/O.
    pub fn harvest(&self, path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let path = path.as_ref();
        let grammar = self.grammar_for(path)?;

        let source = std::fs::read(path).map_err(|e| ChunkerError::file_read(path, e))?;
        self.chunk_with_grammar(&grammar, path, &source)
    }

    /// Chunk an in-memory buffer; `path` only selects the language.
    pub fn chunk_source(&self, path: impl AsRef<Path>, source: &[u8]) -> Result<Vec<Chunk>> {
        let path = path.as_ref();
        let grammar = self.grammar_for(path)?;
        self.chunk_with_grammar(&grammar, path, source)
    }

    /// Chunk an already parsed tree
    pub fn chunk_tree<N: SyntaxNode>(&self, root: &N, source: &[u8]) -> Vec<Chunk> {
        self.line_spans(root, source)
            .into_iter()
            .map(|span| Chunk::from_line_span(span, source))
            .collect()
    }

    /// Line spans for an already parsed tree
    pub fn line_spans<N: SyntaxNode>(&self, root: &N, source: &[u8]) -> Vec<Span> {
        spans::line_spans(root, source, &self.config)
    }

    fn grammar_for(&self, path: &Path) -> Result<Grammar> {
        let resolved = self.registry.resolve(path)?;
        resolved
            .grammar
            .ok_or_else(|| ChunkerError::unsupported_language(resolved.name))
    }

    fn chunk_with_grammar(
        &self,
        grammar: &Grammar,
        path: &Path,
        source: &[u8],
    ) -> Result<Vec<Chunk>> {
        let mut parser = grammar.parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ChunkerError::parse(path.display().to_string()))?;

        let chunks = self.chunk_tree(&tree.root_node(), source);
        log::debug!("Chunked {} into {} chunks", path.display(), chunks.len());
        Ok(chunks)
    }
}
