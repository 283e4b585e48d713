//! CLI binary for mcq2tsv.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mcq2tsv::pipeline::table;
use mcq2tsv::{
    convert, convert_to_file, inspect, ConversionConfig, ConversionProgressCallback,
    ProgressCallback,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a single bar advanced per item. Items are
/// fast (local file reads), so there is no per-item log line — only the bar
/// and a final summary.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_conversion_start`.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Loading dataset…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_items: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>4}/{len} items  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_items as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Converting");
    }

    fn on_item_start(&self, item_num: usize, _total: usize) {
        self.bar.set_message(format!("item {item_num}"));
    }

    fn on_item_complete(&self, _item_num: usize, _total: usize, _rows_emitted: usize) {
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _total_items: usize, _total_rows: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout)
  mcq2tsv dataset.json --images data/images

  # Convert to file
  mcq2tsv dataset.json --images data/images -o eval.tsv

  # Structured JSON output (rows + warnings + stats)
  mcq2tsv dataset.json --images data/images --json > eval.json

  # Inspect the dataset shape (no image directory needed)
  mcq2tsv --inspect-only dataset.json

  # Headerless table for appending to an existing file
  mcq2tsv dataset.json --images data/images --no-header >> eval.tsv

INPUT FORMAT:
  One JSON array of items. Each item may carry:
    "answer"          raw answer: a letter ("B", "b)"), an option text,
                      or a prefix of one
    "A".."D"          option texts (only present letters participate)
    "messages"        array of {"content": [blocks]}
  Content blocks: {"type": "image", "image": "<ref>"} or
                  {"type": "text", "text": "<question>"}.
  Unknown block types are ignored. Image references resolve by BASENAME
  inside --images; directory segments in a reference are discarded.

OUTPUT:
  Tab-separated, UTF-8, four columns: index, image, question, answer.
  The image column holds ";"-joined base64 payloads of the message's
  resolved images (empty if none). Unresolved answers come out empty and
  are reported on stderr.

ENVIRONMENT VARIABLES:
  MCQ2TSV_IMAGES      Image directory (same as --images)
  MCQ2TSV_OUTPUT      Output path (same as -o)
  RUST_LOG            Tracing filter, e.g. RUST_LOG=mcq2tsv=debug
"#;

/// Convert conversation-style multiple-choice JSON datasets to TSV.
#[derive(Parser, Debug)]
#[command(
    name = "mcq2tsv",
    version,
    about = "Convert conversation-style multiple-choice JSON datasets to evaluation TSV",
    long_about = "Flatten a nested multiple-choice dataset (JSON array of items with chat-style \
messages mixing image references and text) into one TSV row per question, with images \
base64-inlined and answers resolved to a single option letter.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Dataset JSON file (one top-level array of items).
    input: PathBuf,

    /// Directory holding the referenced image files.
    #[arg(long, env = "MCQ2TSV_IMAGES", required_unless_present = "inspect_only")]
    images: Option<PathBuf>,

    /// Write the TSV to this file instead of stdout (atomic write).
    #[arg(short, long, env = "MCQ2TSV_OUTPUT")]
    output: Option<PathBuf>,

    /// Output structured JSON (rows + warnings + stats) instead of TSV.
    #[arg(long, env = "MCQ2TSV_JSON")]
    json: bool,

    /// Omit the header row.
    #[arg(long, env = "MCQ2TSV_NO_HEADER")]
    no_header: bool,

    /// Disable the progress bar.
    #[arg(long, env = "MCQ2TSV_NO_PROGRESS")]
    no_progress: bool,

    /// Print dataset shape only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MCQ2TSV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MCQ2TSV_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Warnings (missing images, unresolved answers) go to stderr via
    // tracing; stdout stays clean for the table itself.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = inspect(&cli.input).context("Failed to inspect dataset")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
            );
        } else {
            println!("File:               {}", cli.input.display());
            println!("Items:              {}", summary.items);
            println!("Messages:           {}", summary.messages);
            println!("Image references:   {}", summary.image_refs);
            println!("Items with options: {}", summary.items_with_options);
            println!("Items with answer:  {}", summary.items_with_answer);
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.output.is_some();

    let images = cli
        .images
        .clone()
        .context("--images is required unless --inspect-only is set")?;

    let mut builder = ConversionConfig::builder()
        .image_dir(images)
        .include_header(!cli.no_header);

    if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = convert_to_file(&cli.input, output_path, &config)
            .context("Conversion failed")?;

        if !cli.quiet {
            let dropped = stats.images_missing + stats.answers_unresolved;
            eprintln!(
                "{}  {} rows ({} items)  {}ms  →  {}",
                if dropped == 0 { green("✔") } else { cyan("⚠") },
                bold(&stats.total_rows.to_string()),
                stats.total_items,
                stats.duration_ms,
                bold(&output_path.display().to_string()),
            );
            if dropped > 0 {
                eprintln!(
                    "   {} missing images  /  {} unresolved answers",
                    red(&stats.images_missing.to_string()),
                    red(&stats.answers_unresolved.to_string()),
                );
            }
        }
    } else {
        let output = convert(&cli.input, &config).context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            table::write_table(&mut handle, &output.rows, config.include_header)
                .context("Failed to write to stdout")?;
            handle.flush().ok();
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {} rows  {}  {}ms",
                dim(&output.stats.total_rows.to_string()),
                dim(&format!("{} warnings", output.warnings.len())),
                output.stats.duration_ms,
            );
        }
    }

    Ok(())
}
