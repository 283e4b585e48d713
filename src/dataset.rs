//! Source dataset model: items, messages, and content blocks.
//!
//! The input is one JSON array of [`Item`]s. Every field is optional on the
//! wire — absent answers, absent options, and empty message lists are all
//! valid items, never parse errors. Deserialization defaults keep the
//! pipeline total over malformed records.

use serde::{Deserialize, Serialize};

/// One source record: an optional answer, up to four labeled options, and a
/// sequence of chat-style messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Raw answer field: may be a bare letter ("B"), a full option text, or
    /// a paraphrase/prefix of one. Resolved by [`crate::pipeline::answer`].
    #[serde(default)]
    pub answer: Option<String>,

    #[serde(default, rename = "A", skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(default, rename = "B", skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(default, rename = "C", skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(default, rename = "D", skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,

    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Item {
    /// The item's options as an explicit ordered list of `(letter, text)`
    /// pairs, containing only the letters present, always in literal
    /// A, B, C, D order.
    ///
    /// Tie-breaking in the answer resolver depends on this order; it must
    /// never come from an unordered map.
    pub fn options(&self) -> Vec<(char, &str)> {
        [
            ('A', &self.option_a),
            ('B', &self.option_b),
            ('C', &self.option_c),
            ('D', &self.option_d),
        ]
        .into_iter()
        .filter_map(|(letter, text)| text.as_deref().map(|t| (letter, t)))
        .collect()
    }
}

/// An ordered list of content blocks within an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A tagged unit of message content.
///
/// Unrecognized `type` tags — and blocks missing the tag entirely — land on
/// [`ContentBlock::Unknown`] and are skipped by the flattener rather than
/// rejected. Upstream datasets add new block kinds without notice, and one
/// stray block must never fail the whole parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "RawBlock")]
pub enum ContentBlock {
    /// A reference into the image store. Only the basename is ever used for
    /// lookup.
    Image { image: String },
    /// Free text; the first text block of a message becomes its question.
    Text { text: String },
    /// Any block kind this converter does not understand.
    Unknown,
}

/// Wire shape of a content block, before the `type` tag is interpreted.
#[derive(Deserialize)]
struct RawBlock {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        match raw.kind.as_deref() {
            Some("image") => ContentBlock::Image {
                image: raw.image.unwrap_or_default(),
            },
            Some("text") => ContentBlock::Text {
                text: raw.text.unwrap_or_default(),
            },
            _ => ContentBlock::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_preserve_letter_order_and_skip_absent() {
        let item = Item {
            option_b: Some("dog".into()),
            option_d: Some("fish".into()),
            option_a: Some("cat".into()),
            ..Item::default()
        };
        assert_eq!(
            item.options(),
            vec![('A', "cat"), ('B', "dog"), ('D', "fish")]
        );
    }

    #[test]
    fn item_with_nothing_set_parses() {
        let item: Item = serde_json::from_str("{}").expect("empty item is valid");
        assert!(item.answer.is_none());
        assert!(item.options().is_empty());
        assert!(item.messages.is_empty());
    }

    #[test]
    fn content_blocks_deserialize_by_tag() {
        let json = r#"[
            {"type": "image", "image": "q1.png"},
            {"type": "text", "text": "Which animal barks?"},
            {"type": "audio", "audio": "clip.wav"}
        ]"#;
        let blocks: Vec<ContentBlock> = serde_json::from_str(json).expect("parse");
        assert!(matches!(&blocks[0], ContentBlock::Image { image } if image == "q1.png"));
        assert!(matches!(&blocks[1], ContentBlock::Text { text } if text == "Which animal barks?"));
        assert!(matches!(&blocks[2], ContentBlock::Unknown));
    }

    #[test]
    fn image_block_without_ref_defaults_to_empty() {
        let block: ContentBlock = serde_json::from_str(r#"{"type": "image"}"#).expect("parse");
        assert!(matches!(block, ContentBlock::Image { image } if image.is_empty()));
    }

    #[test]
    fn block_without_type_tag_is_unknown_not_an_error() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"text": "stray"}"#).expect("untagged block must parse");
        assert!(matches!(block, ContentBlock::Unknown));
    }
}
