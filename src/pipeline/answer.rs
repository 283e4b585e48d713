//! Answer-letter resolution: map a raw answer string onto a labeled option.
//!
//! ## Why tiers?
//!
//! The answer field of real datasets holds three shapes of value: a bare
//! label ("B", "b)", "C:"), the full text of an option, or a truncated /
//! partially quoted option. Tiered matching trades recall for determinism —
//! exact structural match first (cheapest, least ambiguous), then exact
//! semantic match, then the weakest prefix heuristic. There is deliberately
//! no edit-distance fallback: silently picking a "closest" option would mask
//! upstream data-quality problems that a warning surfaces.
//!
//! Ties in tiers 2–3 are broken by scanning the option list in its literal
//! A, B, C, D order ([`crate::dataset::Item::options`]) and taking the first
//! match. First match wins; there is no backtracking between tiers.

use super::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

/// A bare option label: one letter A–D, optionally followed by `)`, `.`,
/// `:`, or a full-width colon, with surrounding whitespace tolerated.
static RE_BARE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Da-d])[).:：]?\s*$").unwrap());

/// Resolve a raw answer against an ordered `(letter, text)` option list.
///
/// Strict priority order, first match wins:
///
/// 1. The raw answer is a bare label → that letter, uppercased, regardless
///    of option texts.
/// 2. The normalised answer equals a normalised option text → that letter.
/// 3. The normalised answer is non-empty and is a prefix of a normalised
///    option text → that letter.
///
/// `None` means unresolved; the caller decides the diagnostic and degrades
/// the row to an empty answer letter.
pub fn resolve_answer(raw: &str, options: &[(char, &str)]) -> Option<char> {
    // Tier 1: bare label.
    if let Some(caps) = RE_BARE_LABEL.captures(raw) {
        let letter = caps[1].chars().next()?;
        return Some(letter.to_ascii_uppercase());
    }

    let needle = normalize(raw);

    // Tier 2: exact text match.
    for (letter, text) in options {
        if normalize(text) == needle {
            return Some(*letter);
        }
    }

    // Tier 3: the answer is a truncated or partially quoted option.
    if !needle.is_empty() {
        for (letter, text) in options {
            if normalize(text).starts_with(&needle) {
                return Some(*letter);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[(char, &str)] = &[
        ('A', "a horse that runs fast and far"),
        ('B', "a dog that barks"),
        ('C', "a bird"),
        ('D', "a fish"),
    ];

    // ── Tier 1 ───────────────────────────────────────────────────────────

    #[test]
    fn bare_letter_resolves_regardless_of_option_text() {
        assert_eq!(resolve_answer("B", OPTIONS), Some('B'));
        assert_eq!(resolve_answer("d", OPTIONS), Some('D'));
        // Tier 1 never consults option texts at all.
        assert_eq!(resolve_answer("C", &[]), Some('C'));
    }

    #[test]
    fn label_suffixes_and_whitespace_are_tolerated() {
        assert_eq!(resolve_answer(" a) ", OPTIONS), Some('A'));
        assert_eq!(resolve_answer("B.", OPTIONS), Some('B'));
        assert_eq!(resolve_answer("c:", OPTIONS), Some('C'));
        assert_eq!(resolve_answer("D：", OPTIONS), Some('D'));
    }

    #[test]
    fn letters_outside_a_to_d_are_not_labels() {
        assert_eq!(resolve_answer("E", &[('A', "x")]), None);
        assert_eq!(resolve_answer("AB", OPTIONS), None);
    }

    // ── Tier 2 ───────────────────────────────────────────────────────────

    #[test]
    fn exact_option_text_resolves() {
        assert_eq!(resolve_answer("a dog that barks", OPTIONS), Some('B'));
    }

    #[test]
    fn tier_2_is_insensitive_to_case_whitespace_and_trailing_punctuation() {
        assert_eq!(resolve_answer("  A Dog  that BARKS! ", OPTIONS), Some('B'));
    }

    #[test]
    fn tier_2_scans_in_letter_order() {
        // Duplicate option texts: the earliest letter wins.
        let dup = &[('A', "same"), ('B', "same")];
        assert_eq!(resolve_answer("same", dup), Some('A'));
    }

    // ── Tier 3 ───────────────────────────────────────────────────────────

    #[test]
    fn prefix_of_option_resolves() {
        assert_eq!(
            resolve_answer("A horse that runs fast", OPTIONS),
            Some('A')
        );
    }

    #[test]
    fn empty_answer_never_prefix_matches() {
        assert_eq!(resolve_answer("", OPTIONS), None);
        assert_eq!(resolve_answer("   ", OPTIONS), None);
    }

    #[test]
    fn tier_3_takes_the_first_matching_letter() {
        let opts = &[('A', "blue whale"), ('B', "blue jay")];
        assert_eq!(resolve_answer("blue", opts), Some('A'));
    }

    // ── Unresolved ───────────────────────────────────────────────────────

    #[test]
    fn no_tier_matches_returns_none() {
        assert_eq!(resolve_answer("zzz", &[('A', "x"), ('B', "y")]), None);
    }

    #[test]
    fn option_text_suffix_does_not_match() {
        // Suffixes are not prefixes; tier 3 must not fire.
        assert_eq!(resolve_answer("runs fast and far", OPTIONS), None);
    }
}
