use anyhow::{Context as AnyhowContext, Result};
use ast_chunker::{Chunker, ChunkerConfig};
use clap::Parser;
use report::FileReport;
use scanner::FileScanner;
use std::io::{self, Write};
use std::path::PathBuf;

mod report;
mod scanner;

#[derive(Parser, Debug)]
#[command(name = "ast-chunker")]
#[command(about = "Split source files into syntax-aware, line-aligned chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// File or directory to chunk
    #[arg(default_value = ".")]
    path: PathBuf,

    /// TOML config file (max_chunk_size, coalesce_threshold)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum size of a packed span in bytes (overrides --config)
    #[arg(long)]
    max_chunk_size: Option<usize>,

    /// Non-whitespace bytes a chunk must exceed (overrides --config)
    #[arg(long)]
    coalesce_threshold: Option<usize>,

    /// Extra gitignore-style file; .astignore files are always honoured
    #[arg(long)]
    ignore_file: Option<PathBuf>,

    /// Print a JSON array of { path, chunks } instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let chunker = Chunker::new(resolve_config(cli)?).context("Invalid chunker configuration")?;
    let files = FileScanner::new(&cli.path)
        .with_ignore_file(cli.ignore_file.clone())
        .scan()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ignore_broken_pipe(emit(cli, &chunker, &files, &mut out))
}

/// Harvest every file and write the results to `out`
fn emit(cli: &Cli, chunker: &Chunker, files: &[PathBuf], out: &mut impl Write) -> io::Result<()> {
    let mut reports = Vec::new();

    for path in files {
        match chunker.harvest(path) {
            Ok(chunks) if cli.json => reports.push(FileReport::new(path, chunks)),
            Ok(chunks) => out.write_all(report::render_text(path, &chunks).as_bytes())?,
            Err(err) if err.is_classification() => {
                log::debug!("Skipping {}: {err}", path.display());
            }
            Err(err) => log::warn!("Error chunking {}: {err}", path.display()),
        }
    }

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    }
    out.flush()
}

/// A closed stdout (e.g. `ast-chunker | head`) ends output without an error
fn ignore_broken_pipe(result: io::Result<()>) -> Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

/// Defaults, then the TOML file, then explicit flags
fn resolve_config(cli: &Cli) -> Result<ChunkerConfig> {
    let mut config = match &cli.config {
        Some(path) => ChunkerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChunkerConfig::default(),
    };

    if let Some(max_chunk_size) = cli.max_chunk_size {
        config.max_chunk_size = max_chunk_size;
    }
    if let Some(coalesce_threshold) = cli.coalesce_threshold {
        config.coalesce_threshold = coalesce_threshold;
    }

    Ok(config)
}
