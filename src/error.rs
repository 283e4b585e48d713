//! Error types for the mcq2tsv library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Mcq2TsvError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing input file, input is not a JSON array, unwritable output).
//!   Returned as `Err(Mcq2TsvError)` from the top-level `convert*` functions.
//!
//! * [`RowWarning`] — **Non-fatal**: one image reference did not resolve, or
//!   one item's answer matched no option. The affected row is still emitted
//!   (with the image dropped or the answer left empty) and the run continues.
//!   Warnings are logged as they occur and collected in
//!   [`crate::output::ConversionOutput`] for post-run inspection.
//!
//! The separation lets callers decide their own tolerance: treat any warning
//! as a data-quality failure, log and continue, or ignore them entirely.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mcq2tsv library.
///
/// Per-row degradations use [`RowWarning`] and are stored in
/// [`crate::output::ConversionOutput`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Mcq2TsvError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("dataset file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but does not start with a JSON array.
    #[error("'{path}' is not a JSON array of items (first byte: {first:?})\nThe converter expects a top-level `[ ... ]` array.")]
    NotAJsonArray { path: PathBuf, first: char },

    /// The file is a JSON array but failed to deserialize into items.
    #[error("failed to parse '{path}': {detail}")]
    InvalidJson { path: PathBuf, detail: String },

    /// The configured image directory does not exist.
    #[error("image directory not found: '{path}'\nPass the directory holding the referenced image files via --images.")]
    ImageDirNotFound { path: PathBuf },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output table.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Auxiliary image errors ────────────────────────────────────────────
    /// Thumbnail re-encoding failed (decode or JPEG encode).
    #[error("failed to thumbnail '{path}': {detail}")]
    ThumbnailFailed { path: PathBuf, detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal degradation affecting a single row or item.
///
/// The overall conversion always continues; warnings only record what was
/// dropped or left empty along the way.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum RowWarning {
    /// An image reference did not resolve to an existing file in the store.
    /// The image is dropped from its row's encoded-image list.
    #[error("image not found: '{reference}' (looked up {path})")]
    MissingImage { reference: String, path: PathBuf },

    /// An item's answer matched no option under any tier.
    /// Every row of that item carries an empty answer letter.
    #[error("answer {answer:?} matched no option of {options:?}")]
    UnresolvedAnswer {
        answer: String,
        options: Vec<(char, String)>,
    },
}
