use anyhow::{bail, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Per-directory ignore file honoured during the walk
pub const IGNORE_FILE_NAME: &str = ".astignore";

/// Scanner for finding files to chunk under a root
pub struct FileScanner {
    root: PathBuf,
    ignore_file: Option<PathBuf>,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_file: None,
        }
    }

    /// Add an explicit gitignore-style file on top of the per-directory ones
    #[must_use]
    pub fn with_ignore_file(mut self, ignore_file: Option<PathBuf>) -> Self {
        self.ignore_file = ignore_file;
        self
    }

    /// List files in walk order (.gitignore and .astignore aware).
    ///
    /// A root that is itself a file is returned as the only entry.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.is_dir() {
            bail!("{} is not a file or directory", self.root.display());
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.add_custom_ignore_filename(IGNORE_FILE_NAME);

        if let Some(ignore_file) = &self.ignore_file {
            if !ignore_file.is_file() {
                bail!("ignore file {} cannot be read", ignore_file.display());
            }
            if let Some(err) = builder.add_ignore(ignore_file) {
                log::warn!("Problems in ignore file {}: {err}", ignore_file.display());
            }
        }

        let mut files = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if file_type.is_file() {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::info!("Found {} files under {}", files.len(), self.root.display());
        Ok(files)
    }
}
