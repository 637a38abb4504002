use std::path::PathBuf;
use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while harvesting chunks from a file
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The source file could not be read
    #[error("error reading {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No language is registered for the file name or extension
    #[error("unrecognized file type: {0}")]
    UnrecognizedFiletype(String),

    /// The language is known but no grammar is wired for it
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The parser produced no tree
    #[error("tree-sitter failed to parse {0}")]
    ParseFailure(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tree-sitter rejected the grammar
    #[error("tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl ChunkerError {
    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an unrecognized file type error
    pub fn unrecognized_filetype(path: impl Into<String>) -> Self {
        Self::UnrecognizedFiletype(path.into())
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a parse failure
    pub fn parse(path: impl Into<String>) -> Self {
        Self::ParseFailure(path.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// True for the classification errors (unknown or unwired file type).
    ///
    /// Walkers use this to skip files quietly instead of reporting them.
    #[must_use]
    pub const fn is_classification(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFiletype(_) | Self::UnsupportedLanguage(_)
        )
    }
}
