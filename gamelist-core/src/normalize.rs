//! Display-name normalization for fuzzy comparison.
//!
//! Gamelist names carry region, revision and dump annotations that differ
//! between sources for the same game:
//! ```text
//! Sonic the Hedgehog (USA, Europe) [!]
//! Sonic The Hedgehog (Rev 1) [h2]
//! ```
//! The normalized form is only ever compared, never stored.

use std::sync::LazyLock;

use regex::Regex;

static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("static pattern"));
static VERIFIED_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!+]").expect("static pattern"));
static BRACKET_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\s*(?:h\d+)?\s*\]").expect("static pattern"));
static CLONE_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:rev\s*\d+|jue|u|w)\b").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Normalize a display name for comparison.
///
/// Steps, in order: drop `(...)` groups, drop `!`/`+` markers, drop `[hN]`
/// hack tags and any brackets left empty, drop `REV n`/`JUE`/`U`/`W` clone
/// tokens, collapse whitespace, trim, lowercase. A missing name normalizes
/// to `""`, which callers must treat as unmatchable.
///
/// ```
/// use gamelist_core::normalize_name;
///
/// assert_eq!(
///     normalize_name(Some("Sonic the Hedgehog (USA) [!]")),
///     normalize_name(Some("sonic the hedgehog")),
/// );
/// assert_eq!(normalize_name(None), "");
/// ```
pub fn normalize_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    let s = PAREN_GROUP.replace_all(name, " ");
    let s = VERIFIED_MARKS.replace_all(&s, "");
    let s = BRACKET_TAGS.replace_all(&s, " ");
    let s = CLONE_TOKENS.replace_all(&s, " ");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> String {
        normalize_name(Some(s))
    }

    #[test]
    fn strips_region_and_verified_tags() {
        assert_eq!(n("Sonic the Hedgehog (USA) [!]"), "sonic the hedgehog");
        assert_eq!(n("Sonic the Hedgehog (USA) [!]"), n("sonic the hedgehog"));
    }

    #[test]
    fn strips_every_paren_group() {
        assert_eq!(n("Frogger (1983) (Parker Bros) (PAL)"), "frogger");
        assert_eq!(n("Game (USA) Deluxe"), "game deluxe");
    }

    #[test]
    fn strips_clone_tokens_as_words() {
        assert_eq!(n("Street Fighter II REV 2"), "street fighter ii");
        assert_eq!(n("Street Fighter II rev2"), "street fighter ii");
        assert_eq!(n("Pac-Man JUE"), "pac-man");
        assert_eq!(n("Tetris U"), "tetris");
        assert_eq!(n("Tetris W"), "tetris");
    }

    #[test]
    fn keeps_letters_inside_words() {
        assert_eq!(n("Super Mario World"), "super mario world");
        assert_eq!(n("Double Dragon Revenge"), "double dragon revenge");
    }

    #[test]
    fn strips_hack_tags() {
        assert_eq!(n("Contra [h1]"), "contra");
        assert_eq!(n("Contra [H12] (Japan)"), "contra");
    }

    #[test]
    fn plus_markers_are_removed() {
        assert_eq!(n("Game+ [+]"), "game");
    }

    #[test]
    fn noise_only_names_become_empty() {
        assert_eq!(n("(USA) [!]"), "");
        assert_eq!(n("   "), "");
        assert_eq!(normalize_name(None), "");
    }
}
