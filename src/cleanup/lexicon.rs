//! Static disfluency lexicons.
//!
//! Fixed tables, ordered longest-first so multi-word phrases match before any
//! of their single-word components ("you know" before "you").

/// Interjection fillers removed in light mode.
pub(crate) const FILLERS_LIGHT: &[&str] = &["hmm", "mhm", "um", "uh", "ah", "er", "mm"];

/// Extended filler set for standard mode: the light set plus discourse
/// markers. "like" and "so" get context-sensitive handling in the engine.
pub(crate) const FILLERS_STANDARD: &[&str] = &[
    "basically",
    "literally",
    "actually",
    "you know",
    "kind of",
    "sort of",
    "you see",
    "anyway",
    "i mean",
    "right",
    "like",
    "okay",
    "well",
    "hmm",
    "mhm",
    "um",
    "uh",
    "ah",
    "er",
    "mm",
    "so",
];

/// Phrases that introduce a self-correction or false start.
pub(crate) const CORRECTION_MARKERS: &[&str] = &[
    "sorry",
    "i mean",
    "no wait",
    "actually",
    "let me rephrase",
    "correction",
    "rather",
];

/// Intensifiers whose doubling is treated as intentional emphasis rather than
/// a stutter ("very very important").
pub(crate) const EMPHASIS_WORDS: &[&str] = &["very", "really", "so", "much", "too", "super"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_is_superset_of_light_set() {
        for filler in FILLERS_LIGHT {
            assert!(
                FILLERS_STANDARD.contains(filler),
                "'{filler}' missing from standard set"
            );
        }
    }

    #[test]
    fn test_filler_sets_ordered_longest_first() {
        for set in [FILLERS_LIGHT, FILLERS_STANDARD] {
            for pair in set.windows(2) {
                assert!(
                    pair[0].len() >= pair[1].len(),
                    "'{}' ordered before longer '{}'",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_lexicon_entries_are_lowercase() {
        for entry in FILLERS_STANDARD
            .iter()
            .chain(CORRECTION_MARKERS)
            .chain(EMPHASIS_WORDS)
        {
            assert_eq!(*entry, entry.to_lowercase());
        }
    }
}
