//! # AST Chunker
//!
//! Splits source files into contiguous, line-aligned chunks that follow the
//! shape of the syntax tree, for search indexers, embedding pipelines and LLM
//! context windows.
//!
//! ## Architecture
//!
//! ```text
//! File path
//!     │
//!     ├──> Language resolution (file name / extension table)
//!     │
//!     ├──> Tree-sitter parsing → syntax tree
//!     │
//!     ├──> Span computation
//!     │    ├─> Pack sibling subtrees into byte spans ≤ max_chunk_size
//!     │    ├─> Close gaps between consecutive spans
//!     │    ├─> Coalesce spans below the non-whitespace threshold
//!     │    └─> Project byte spans onto line ranges
//!     │
//!     └──> Chunk[] (line range + text)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ast_chunker::{Chunker, ChunkerConfig};
//!
//! let config = ChunkerConfig::default().with_max_chunk_size(1024);
//! let chunker = Chunker::new(config).unwrap();
//!
//! let code = br#"
//! fn process_data(input: &str) -> String {
//!     input.trim().to_uppercase()
//! }
//! "#;
//!
//! let chunks = chunker.chunk_source("example.rs", code).unwrap();
//! for chunk in chunks {
//!     println!("lines {}-{}:\n{}", chunk.start, chunk.end, chunk.text);
//! }
//! ```
//!
//! Chunking is synchronous and keeps no shared mutable state: a [`Chunker`]
//! can be shared across threads, and every call builds its own parser.

mod chunker;
mod config;
mod error;
mod language;
mod span;
pub mod spans;
mod tree;
mod types;

pub use chunker::Chunker;
pub use config::{ChunkerConfig, DEFAULT_COALESCE_THRESHOLD, DEFAULT_MAX_CHUNK_SIZE};
pub use error::{ChunkerError, Result};
pub use language::{Grammar, LanguageRegistry, ResolvedLanguage};
pub use span::Span;
pub use tree::SyntaxNode;
pub use types::Chunk;
