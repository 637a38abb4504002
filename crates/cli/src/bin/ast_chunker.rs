use anyhow::Result;

fn main() -> Result<()> {
    ast_chunker_cli::main_entry()
}
