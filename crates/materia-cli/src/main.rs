use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use materia_ingest::{SourceFile, extract_text_from_file};

/// Course material text extractor - convert PDF, DOCX, and TXT files to plain text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF, DOCX, or TXT file to extract
    file_path: PathBuf,

    /// Write the extracted text to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.file_path.exists() {
        anyhow::bail!("File not found: {}", cli.file_path.display());
    }

    let bytes = std::fs::read(&cli.file_path)?;
    let file_name = cli
        .file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file_path.display().to_string());

    let source = SourceFile::new(&file_name, &bytes);
    let text = match extract_text_from_file(&source) {
        Ok(text) => text,
        Err(e) => {
            if cli.no_color {
                eprintln!("error: {}", e);
            } else {
                eprintln!("{} {}", "error:".bold().red(), e);
            }
            std::process::exit(1);
        }
    };

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = cli.output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    writer.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(writer)?;
    }

    Ok(())
}
