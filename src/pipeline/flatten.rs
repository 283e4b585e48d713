//! Content flattening: one message's blocks → question text + image refs.

use crate::dataset::ContentBlock;

/// The flattened view of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedMessage {
    /// Text of the FIRST text block, or empty if the message has none.
    pub question: String,
    /// Raw image references in block order, duplicates preserved.
    pub image_refs: Vec<String>,
}

/// Scan blocks in order, collecting image references and the question.
///
/// Only the first text block becomes the question; all later text blocks in
/// the same message are ignored. Unknown block kinds are skipped.
pub fn flatten(blocks: &[ContentBlock]) -> FlattenedMessage {
    let mut out = FlattenedMessage::default();
    let mut question_seen = false;

    for block in blocks {
        match block {
            ContentBlock::Image { image } => out.image_refs.push(image.clone()),
            ContentBlock::Text { text } => {
                if !question_seen {
                    out.question = text.clone();
                    question_seen = true;
                }
            }
            ContentBlock::Unknown => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(s: &str) -> ContentBlock {
        ContentBlock::Image { image: s.into() }
    }

    fn txt(s: &str) -> ContentBlock {
        ContentBlock::Text { text: s.into() }
    }

    #[test]
    fn first_text_block_wins() {
        let flat = flatten(&[txt("the question"), txt("not the question")]);
        assert_eq!(flat.question, "the question");
    }

    #[test]
    fn an_empty_first_text_block_still_claims_the_question() {
        // Deliberate: "first" means first, not "first non-empty".
        let flat = flatten(&[txt(""), txt("later")]);
        assert_eq!(flat.question, "");
    }

    #[test]
    fn image_order_and_duplicates_preserved() {
        let flat = flatten(&[img("a.png"), txt("q"), img("b.png"), img("a.png")]);
        assert_eq!(flat.image_refs, vec!["a.png", "b.png", "a.png"]);
    }

    #[test]
    fn unknown_blocks_are_skipped() {
        let flat = flatten(&[ContentBlock::Unknown, txt("q"), ContentBlock::Unknown]);
        assert_eq!(flat.question, "q");
        assert!(flat.image_refs.is_empty());
    }

    #[test]
    fn empty_message_flattens_to_defaults() {
        let flat = flatten(&[]);
        assert_eq!(flat, FlattenedMessage::default());
    }
}
