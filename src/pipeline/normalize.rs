//! Text canonicalisation for option matching.
//!
//! Answers and option texts come from hand-edited JSON: stray whitespace,
//! trailing punctuation, and inconsistent casing are the norm. Comparing
//! normalised forms makes tier-2/tier-3 matching insensitive to exactly that
//! noise and nothing else — no stemming, no Unicode folding, no fuzziness.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalise a string for comparison.
///
/// In order: trim, strip one trailing run of `. ! ? ; :` and whitespace,
/// collapse every internal whitespace run to a single space, lowercase.
/// Total function; the empty string maps to itself.
pub fn normalize(s: &str) -> String {
    let s = s
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?' | ';' | ':'));
    RE_WHITESPACE_RUN.replace_all(s, " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  A Horse  "), "a horse");
    }

    #[test]
    fn strips_trailing_punctuation_run() {
        assert_eq!(normalize("a dog barks!?  . "), "a dog barks");
    }

    #[test]
    fn keeps_leading_and_internal_punctuation() {
        assert_eq!(normalize("...wait, what"), "...wait, what");
        assert_eq!(normalize("e.g. a cat"), "e.g. a cat");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize("a\t horse \n runs"), "a horse runs");
    }

    #[test]
    fn empty_and_punctuation_only_become_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  !!  "), "");
    }
}
