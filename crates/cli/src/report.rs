use ast_chunker::Chunk;
use console::style;
use serde::Serialize;
use std::path::Path;

/// Chunks harvested from one file, as emitted by `--json`
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub chunks: Vec<Chunk>,
}

impl FileReport {
    pub fn new(path: &Path, chunks: Vec<Chunk>) -> Self {
        Self {
            path: path.display().to_string(),
            chunks,
        }
    }
}

/// Human-readable listing of a file's chunks with 1-based ordinals
pub fn render_text(path: &Path, chunks: &[Chunk]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n\nParsed {} into {} chunks:\n",
        style(path.display()).green(),
        chunks.len()
    ));
    for (i, chunk) in chunks.iter().enumerate() {
        let header = format!("--- ({}) lines {}-{} ---", i + 1, chunk.start, chunk.end);
        out.push_str(&format!("\n{}\n{}\n", style(header).cyan(), chunk.text));
    }
    out
}
