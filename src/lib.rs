//! # mcq2tsv
//!
//! Convert conversation-style multiple-choice JSON datasets into flat,
//! evaluation-ready TSV tables.
//!
//! ## Why this crate?
//!
//! Visual multiple-choice benchmarks are commonly distributed as nested
//! chat transcripts: an array of items, each holding messages whose content
//! interleaves image references and text, with the answer given as a bare
//! letter, a full option string, or a truncated quote of one. Evaluation
//! harnesses want the opposite shape — one flat row per question with the
//! images inlined. This crate does that conversion deterministically: it
//! resolves answers against the item's labeled options through a fixed
//! tier order (never a fuzzy "closest" guess), confines image lookups to a
//! trusted directory (references resolve by basename only), and degrades
//! per-row instead of aborting when data is imperfect.
//!
//! ## Pipeline Overview
//!
//! ```text
//! dataset.json
//!  │
//!  ├─ 1. Input    validate and parse the JSON array of items
//!  ├─ 2. Flatten  per message: question text + ordered image refs
//!  ├─ 3. Answer   per item: raw answer → option letter (3-tier match)
//!  ├─ 4. Images   basename-confined lookup → base64, ";"-joined
//!  └─ 5. Table    index / image / question / answer rows as TSV
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcq2tsv::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .image_dir("data/images")
//!         .build()?;
//!     let stats = convert_to_file("data/dataset.json", "out/eval.tsv", &config)?;
//!     eprintln!("{} rows, {} unresolved answers",
//!         stats.total_rows, stats.answers_unresolved);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mcq2tsv` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mcq2tsv = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_items, convert_to_file, inspect};
pub use dataset::{ContentBlock, Item, Message};
pub use error::{Mcq2TsvError, RowWarning};
pub use output::{ConversionOutput, ConversionStats, DatasetSummary, ResolvedRow};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
