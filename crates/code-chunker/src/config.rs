use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default ceiling for a raw byte span (3KB)
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1024 * 3;

/// Default number of non-whitespace bytes a chunk must exceed
pub const DEFAULT_COALESCE_THRESHOLD: usize = 50;

/// Configuration for chunking behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Maximum size of a packed byte span (soft limit, see `build_byte_spans`)
    pub max_chunk_size: usize,

    /// Minimum non-whitespace byte count before a chunk is finalized
    pub coalesce_threshold: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            coalesce_threshold: DEFAULT_COALESCE_THRESHOLD,
        }
    }
}

impl ChunkerConfig {
    /// Builder: set the maximum chunk size in bytes
    #[must_use]
    pub const fn with_max_chunk_size(mut self, value: usize) -> Self {
        self.max_chunk_size = value;
        self
    }

    /// Builder: set the coalesce threshold in non-whitespace bytes
    #[must_use]
    pub const fn with_coalesce_threshold(mut self, value: usize) -> Self {
        self.coalesce_threshold = value;
        self
    }

    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| ChunkerError::invalid_config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw =
            std::fs::read_to_string(path).map_err(|e| ChunkerError::file_read(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(ChunkerError::invalid_config("max_chunk_size must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkerConfig::default();
        assert_eq!(config.max_chunk_size, 3072);
        assert_eq!(config.coalesce_threshold, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ChunkerConfig::default()
            .with_max_chunk_size(1024)
            .with_coalesce_threshold(25);
        assert_eq!(config.max_chunk_size, 1024);
        assert_eq!(config.coalesce_threshold, 25);
    }

    #[test]
    fn test_zero_max_chunk_size_rejected() {
        let config = ChunkerConfig::default().with_max_chunk_size(0);
        assert!(matches!(
            config.validate(),
            Err(ChunkerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_coalesce_threshold_allowed() {
        let config = ChunkerConfig::default().with_coalesce_threshold(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ChunkerConfig::from_toml_str("max_chunk_size = 512\n").unwrap();
        assert_eq!(config.max_chunk_size, 512);
        assert_eq!(config.coalesce_threshold, DEFAULT_COALESCE_THRESHOLD);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(ChunkerConfig::from_toml_str("max_chunk_size = 0").is_err());
        assert!(ChunkerConfig::from_toml_str("max_chunk_size = \"big\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_chunk_size = 2048\ncoalesce_threshold = 10").unwrap();

        let config = ChunkerConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            ChunkerConfig {
                max_chunk_size: 2048,
                coalesce_threshold: 10,
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = ChunkerConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ChunkerError::FileRead { .. }));
    }
}
