//! Fuzzy name similarity.
//!
//! Scores are Sørensen–Dice coefficients over character bigrams, with
//! whitespace ignored, so `score(a, b) == score(b, a)` and identical
//! non-empty strings score `1.0`.

/// Minimum score for a catalog entry to count as the same game.
pub const MATCH_THRESHOLD: f64 = 0.85;

/// Similarity of two normalized names in `[0, 1]`.
///
/// An empty side always scores `0.0`: an empty normalized name is
/// unmatchable rather than a wildcard.
pub fn score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::sorensen_dice(a, b)
}

/// Candidates from a pool that meet [`MATCH_THRESHOLD`] for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantMatch<K> {
    /// Every candidate at or above the threshold, in pool order, with its score.
    pub candidates: Vec<(K, f64)>,
    /// Highest score seen across the whole pool, matched or not.
    pub best_score: f64,
}

impl<K> VariantMatch<K> {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Keep only the candidates sharing the top score.
    pub fn retain_best(&mut self) {
        let top = self
            .candidates
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        self.candidates.retain(|(_, s)| *s >= top);
    }
}

/// Score `target` against every `(key, normalized_name)` in `pool`.
///
/// All candidates scoring at least [`MATCH_THRESHOLD`] are returned; regional
/// variants of one game are expected to match together.
pub fn find_variants<'a, K, I>(target: &str, pool: I) -> VariantMatch<K>
where
    I: IntoIterator<Item = (K, &'a str)>,
{
    let mut result = VariantMatch {
        candidates: Vec::new(),
        best_score: 0.0,
    };
    if target.is_empty() {
        return result;
    }

    for (key, name) in pool {
        let s = score(target, name);
        if s > result.best_score {
            result.best_score = s;
        }
        if s >= MATCH_THRESHOLD {
            result.candidates.push((key, s));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(score("streets of rage", "streets of rage"), 1.0);
        assert_eq!(score("q", "q"), 1.0);
    }

    #[test]
    fn score_is_symmetric() {
        let pairs = [
            ("sonic the hedgehog", "sonic the hedgehog 2"),
            ("night", "nacht"),
            ("mega man x", "megaman x2"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a));
        }
    }

    #[test]
    fn empty_names_never_match() {
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("", "tetris"), 0.0);
        let m = find_variants("", vec![(0usize, "")]);
        assert!(m.is_empty());
    }

    #[test]
    fn whitespace_does_not_affect_score() {
        assert_eq!(score("megaman", "mega man"), 1.0);
    }

    #[test]
    fn all_variants_above_threshold_are_returned() {
        let pool = vec![(0usize, "game"), (1, "game"), (2, "other title")];
        let m = find_variants("game", pool);
        assert_eq!(m.candidates.len(), 2);
        assert_eq!(m.best_score, 1.0);
    }

    #[test]
    fn best_score_reported_even_without_match() {
        let m = find_variants("sonic the hedgehog", vec![(0usize, "sonic the hedgehog 3 and knuckles")]);
        assert!(m.is_empty());
        assert!(m.best_score > 0.0 && m.best_score < MATCH_THRESHOLD);
    }

    #[test]
    fn retain_best_drops_weaker_variants() {
        let pool = vec![
            (0usize, "street fighter ii turbo"),
            (1, "street fighter ii turbo"),
            (2, "street fighter ii turbo!"),
        ];
        let mut m = find_variants("street fighter ii turbo", pool);
        assert_eq!(m.candidates.len(), 3);
        m.retain_best();
        assert_eq!(m.candidates.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![0, 1]);
    }
}
