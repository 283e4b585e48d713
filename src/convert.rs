//! Conversion entry points.
//!
//! [`convert_items`] is the orchestrator proper: it never fails, because
//! nothing inside the per-item loop is fatal — unresolved answers and
//! missing images degrade their own row and are recorded as warnings. The
//! only fatal paths are loading the input ([`convert`]) and writing the
//! output ([`convert_to_file`]), where there is no partial result worth
//! preserving.

use crate::config::ConversionConfig;
use crate::dataset::Item;
use crate::error::{Mcq2TsvError, RowWarning};
use crate::output::{ConversionOutput, ConversionStats, DatasetSummary, ResolvedRow};
use crate::pipeline::{answer, flatten, images, input, table};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert a dataset file to rows.
///
/// # Errors
/// Fatal only for input problems: file missing/unreadable, not a JSON
/// array, parse failure, or a nonexistent image directory.
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Mcq2TsvError> {
    let input_path = input_path.as_ref();
    info!("starting conversion: {}", input_path.display());

    if !config.image_dir.is_dir() {
        return Err(Mcq2TsvError::ImageDirNotFound {
            path: config.image_dir.clone(),
        });
    }

    let items = input::load_items(input_path)?;
    Ok(convert_items(&items, config))
}

/// Run the pipeline over already-loaded items.
///
/// Per item: resolve the answer letter once, then emit one row per message
/// with the next sequential index. No message aborts the run; only
/// individual image lookups are skippable.
pub fn convert_items(items: &[Item], config: &ConversionConfig) -> ConversionOutput {
    let start = Instant::now();
    let total_items = items.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_items);
    }

    let mut rows: Vec<ResolvedRow> = Vec::new();
    let mut warnings: Vec<RowWarning> = Vec::new();
    let mut stats = ConversionStats {
        total_items,
        ..ConversionStats::default()
    };

    for (item_idx, item) in items.iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_item_start(item_idx + 1, total_items);
        }

        // One resolution per item; every row of the item shares the letter.
        let options = item.options();
        let raw_answer = item.answer.as_deref().unwrap_or_default();
        let letter = answer::resolve_answer(raw_answer, &options);
        match letter {
            Some(_) => stats.answers_resolved += 1,
            None => {
                warn!(
                    "item {}: answer {:?} matched no option of {:?}",
                    item_idx, raw_answer, options
                );
                warnings.push(RowWarning::UnresolvedAnswer {
                    answer: raw_answer.to_string(),
                    options: options
                        .iter()
                        .map(|(l, t)| (*l, t.to_string()))
                        .collect(),
                });
                stats.answers_unresolved += 1;
            }
        }
        let answer_letter = letter.map(String::from).unwrap_or_default();

        let mut item_rows = 0usize;
        for message in &item.messages {
            let flat = flatten::flatten(&message.content);

            let (encoded, image_warnings) = images::encode_images(&flat.image_refs, &config.image_dir);
            stats.images_missing += image_warnings.len();
            stats.images_encoded += flat.image_refs.len() - image_warnings.len();
            warnings.extend(image_warnings);

            rows.push(ResolvedRow {
                index: rows.len() as u64,
                image: encoded,
                question: flat.question,
                answer: answer_letter.clone(),
            });
            item_rows += 1;
        }

        if let Some(ref cb) = config.progress_callback {
            cb.on_item_complete(item_idx + 1, total_items, item_rows);
        }
    }

    stats.total_rows = rows.len();
    stats.duration_ms = start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_items, stats.total_rows);
    }

    info!(
        "conversion complete: {} items → {} rows in {}ms ({} warnings)",
        total_items,
        stats.total_rows,
        stats.duration_ms,
        warnings.len()
    );

    ConversionOutput {
        rows,
        warnings,
        stats,
    }
}

/// Convert a dataset file and write the TSV directly to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Mcq2TsvError> {
    let output = convert(input_path, config)?;
    table::write_table_file(output_path.as_ref(), &output.rows, config.include_header)?;
    Ok(output.stats)
}

/// Summarize a dataset file without resolving or encoding anything.
///
/// Does not require the image directory to exist.
pub fn inspect(input_path: impl AsRef<Path>) -> Result<DatasetSummary, Mcq2TsvError> {
    let items = input::load_items(input_path.as_ref())?;

    let mut summary = DatasetSummary {
        items: items.len(),
        ..DatasetSummary::default()
    };

    for item in &items {
        if !item.options().is_empty() {
            summary.items_with_options += 1;
        }
        if item.answer.as_deref().is_some_and(|a| !a.is_empty()) {
            summary.items_with_answer += 1;
        }
        for message in &item.messages {
            summary.messages += 1;
            summary.image_refs += flatten::flatten(&message.content).image_refs.len();
        }
    }

    Ok(summary)
}
