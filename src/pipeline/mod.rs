//! Pipeline stages for dataset-to-TSV conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different table format) without touching the
//! others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ flatten ──▶ answer ──▶ images ──▶ table
//! (JSON)    (blocks)    (letter)   (base64)   (TSV)
//! ```
//!
//! 1. [`input`]     — validate and parse the dataset file into items
//! 2. [`flatten`]   — per message, recover the question text and the
//!    ordered image references
//! 3. [`normalize`] + [`answer`] — per item, resolve the raw answer field
//!    to a single option letter
//! 4. [`images`]    — resolve references inside the image store (basename
//!    only) and base64-encode the bytes
//! 5. [`table`]     — serialize rows as a tab-separated table

pub mod answer;
pub mod flatten;
pub mod images;
pub mod input;
pub mod normalize;
pub mod table;
