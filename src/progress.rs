//! Progress-callback trait for per-item conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each item. The callback approach keeps
//! the library ignorant of how the host application communicates — the CLI
//! wires a terminal progress bar through it, a service could forward events
//! to a channel or a database record.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each item.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline is single-threaded, but the trait is
/// `Send + Sync` so callbacks can be shared freely by the host.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any item is processed.
    fn on_conversion_start(&self, total_items: usize) {
        let _ = total_items;
    }

    /// Called just before an item's messages are flattened and encoded.
    /// `item_num` is 1-indexed.
    fn on_item_start(&self, item_num: usize, total_items: usize) {
        let _ = (item_num, total_items);
    }

    /// Called after all of an item's rows have been emitted.
    fn on_item_complete(&self, item_num: usize, total_items: usize, rows_emitted: usize) {
        let _ = (item_num, total_items, rows_emitted);
    }

    /// Called once after every item has been processed.
    fn on_conversion_complete(&self, total_items: usize, total_rows: usize) {
        let _ = (total_items, total_rows);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
