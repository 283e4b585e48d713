//! Output types: rows, run statistics, and the dataset summary.

use crate::error::RowWarning;
use serde::{Deserialize, Serialize};

/// One output table record, corresponding to one processed message.
///
/// Field declaration order is the TSV column order; the csv writer derives
/// the header row from these names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
    /// Contiguous from 0 in message-visitation order (item order, then
    /// message order). Row identity only; carries no other meaning.
    pub index: u64,
    /// `;`-joined base64 payloads, empty when no image resolved.
    pub image: String,
    /// The message's first text block, or empty.
    pub question: String,
    /// `"A"`..`"D"`, or empty when unresolved. Shared by every row of the
    /// same item.
    pub answer: String,
}

/// Statistics for a completed conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Items in the input array.
    pub total_items: usize,
    /// Rows emitted (= messages visited).
    pub total_rows: usize,
    /// Image references that resolved and were encoded.
    pub images_encoded: usize,
    /// Image references dropped because no file matched.
    pub images_missing: usize,
    /// Items whose answer resolved to a letter.
    pub answers_resolved: usize,
    /// Items whose answer matched no option.
    pub answers_unresolved: usize,
    /// Wall-clock duration of the conversion.
    pub duration_ms: u64,
}

/// The result of a conversion: every row, in order, plus what degraded
/// along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub rows: Vec<ResolvedRow>,
    /// Non-fatal degradations, in occurrence order.
    pub warnings: Vec<RowWarning>,
    pub stats: ConversionStats,
}

/// Shape of a dataset, computed without touching the image store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub items: usize,
    pub messages: usize,
    /// Image references across all messages (occurrences, not unique files).
    pub image_refs: usize,
    /// Items carrying at least one option field.
    pub items_with_options: usize,
    /// Items carrying a non-empty answer field.
    pub items_with_answer: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips_through_json() {
        let output = ConversionOutput {
            rows: vec![ResolvedRow {
                index: 0,
                image: String::new(),
                question: "Which animal barks?".into(),
                answer: "B".into(),
            }],
            warnings: vec![],
            stats: ConversionStats {
                total_items: 1,
                total_rows: 1,
                answers_resolved: 1,
                ..ConversionStats::default()
            },
        };

        let json = serde_json::to_string(&output).expect("serialize");
        let back: ConversionOutput = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.rows, output.rows);
        assert_eq!(back.stats.total_rows, 1);
    }
}
