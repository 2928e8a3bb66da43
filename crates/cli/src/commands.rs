use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use gemgrade_core::{ExistingValues, Field};
use gemgrade_import::{read_scans, refine_batch, write_csv, write_json, BatchSummary, RefineProfile};
use gemgrade_ocr::AnnotationExtractor;

#[derive(Parser)]
#[command(name = "gemgrade")]
#[command(about = "Extract grading annotations from certificate OCR text")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the seven fields from one OCR text (stdin by default)
    Extract {
        /// OCR text given inline
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Read OCR text from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Stored values to fall back on, e.g. brown_original="Not Measured"
        #[arg(long = "existing", value_parser = parse_key_value)]
        existing: Vec<(String, String)>,
        /// Print every pipeline stage instead of just the record
        #[arg(long)]
        explain: bool,
    },

    /// Refine a CSV table of stored OCR scans
    Refine {
        /// Input CSV with an OCR text column
        #[arg(short, long)]
        input: PathBuf,
        /// TOML refine profile (column names, workers)
        #[arg(short, long, env = "GEMGRADE_PROFILE")]
        profile: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,
        /// Number of refinement workers (overrides profile)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Ignore stored brown/color/type values
        #[arg(long)]
        no_existing: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract { text, file, existing, explain } => {
            cmd_extract(text, file, existing, explain)
        }
        Commands::Refine { input, profile, output, format, workers, no_existing } => {
            cmd_refine(input, profile, output, format, workers, no_existing).await
        }
    }
}

fn cmd_extract(
    text: Option<String>,
    file: Option<PathBuf>,
    existing: Vec<(String, String)>,
    explain: bool,
) -> anyhow::Result<()> {
    let raw = match (text, file) {
        (Some(t), _) => t,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read OCR text from stdin")?;
            buf
        }
    };

    let existing: ExistingValues = existing.into_iter().collect();
    let fallback = (!existing.is_empty()).then_some(&existing);
    let trace = AnnotationExtractor::trace(&raw, fallback);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if explain {
        serde_json::to_writer_pretty(&mut out, &trace)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &trace.record)?;
    }
    writeln!(out)?;
    Ok(())
}

async fn cmd_refine(
    input: PathBuf,
    profile_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    workers: Option<usize>,
    no_existing: bool,
) -> anyhow::Result<()> {
    let mut profile = match &profile_path {
        Some(path) => RefineProfile::load(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => RefineProfile::default(),
    };
    if let Some(w) = workers {
        profile.workers = w;
    }
    if no_existing {
        profile.use_existing = false;
    }
    if profile.workers == 0 {
        bail!("workers must be at least 1");
    }

    let file = File::open(&input).with_context(|| format!("Failed to open {}", input.display()))?;
    let rows = read_scans(file, &profile)
        .with_context(|| format!("Failed to read scans from {}", input.display()))?;
    tracing::info!("Refining {} scans with {} workers", rows.len(), profile.workers);

    let refined = refine_batch(rows, profile.use_existing, profile.workers).await?;

    let mut sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    match format {
        OutputFormat::Csv => write_csv(&mut sink, &refined)?,
        OutputFormat::Json => write_json(&mut sink, &refined)?,
    }
    sink.flush()?;

    log_summary(&BatchSummary::from_rows(&refined));
    Ok(())
}

fn log_summary(summary: &BatchSummary) {
    tracing::info!(
        "Refined {} rows, {} with no field determined",
        summary.rows,
        summary.blank_records
    );
    for field in Field::ALL {
        tracing::info!("  {:<13} {}", field.label(), summary.determined(field));
    }
}
