//! Pattern pre-compilation for the cleanup pipeline.
//!
//! Every matcher the pipeline needs is built once at engine construction, so
//! per-call cleanup cost excludes regex compilation.

use anyhow::Result;
use regex::Regex;

use crate::cleanup::lexicon;

/// A filler token together with its compiled removal pattern.
///
/// The removal pattern consumes the token plus one trailing comma and any
/// following whitespace, so stripping a filler never leaves dangling
/// punctuation behind.
pub(crate) struct FillerPattern {
    pub token: &'static str,
    pub removal: Regex,
}

/// Compiled matchers for one correction marker.
pub(crate) struct MarkerPatterns {
    /// "<discarded>... <marker>, " — the abandoned clause, its ellipsis, and
    /// the marker itself.
    pub ellipsis_form: Regex,
    /// ", <marker>," — locates the marker between a repeated clause pair.
    pub comma_form: Regex,
}

pub(crate) struct CompiledPatterns {
    pub fillers_light: Vec<FillerPattern>,
    pub fillers_standard: Vec<FillerPattern>,
    pub markers: Vec<MarkerPatterns>,
    /// Standalone "like", inspected against its surroundings before removal.
    pub like_word: Regex,
    /// Continuations after "like" that read as verb or comparative usage.
    /// Only "it" is anchored to a word boundary; the rest match as leading
    /// fragments of the following word.
    pub like_continuation: Regex,
    /// Sentence- or clause-initial "so" followed by another word.
    pub sentence_so: Regex,
    /// A single word, for the repetition scan.
    pub word: Regex,
    pub leading_ellipsis: Regex,
    pub dangling_ellipsis: Regex,
    pub repeated_spaces: Regex,
    pub space_before_punct: Regex,
}

impl CompiledPatterns {
    pub fn build() -> Result<Self> {
        Ok(Self {
            fillers_light: compile_fillers(lexicon::FILLERS_LIGHT)?,
            fillers_standard: compile_fillers(lexicon::FILLERS_STANDARD)?,
            markers: compile_markers(lexicon::CORRECTION_MARKERS)?,
            like_word: Regex::new(r"(?i)\blike\b")?,
            like_continuation: Regex::new(r"(?i)^\s+(?:to|the|a|my|your|this|that|it\b)")?,
            sentence_so: Regex::new(r"(?i)(?P<head>^|\.\s+|,\s*)so\b,?\s+(?P<next>[A-Za-z])")?,
            word: Regex::new(r"\w+")?,
            leading_ellipsis: Regex::new(r"^\s*\.{2,}\s*")?,
            dangling_ellipsis: Regex::new(r"\.\s+\.{2,}\s*")?,
            repeated_spaces: Regex::new(r" {2,}")?,
            space_before_punct: Regex::new(r"\s+(?P<punct>[.,!?])")?,
        })
    }
}

fn compile_fillers(tokens: &[&'static str]) -> Result<Vec<FillerPattern>> {
    tokens
        .iter()
        .map(|&token| -> Result<FillerPattern> {
            let removal = Regex::new(&format!(r"(?i)\b{}\b,?\s*", regex::escape(token)))?;
            Ok(FillerPattern { token, removal })
        })
        .collect()
}

fn compile_markers(markers: &[&'static str]) -> Result<Vec<MarkerPatterns>> {
    markers
        .iter()
        .map(|&marker| -> Result<MarkerPatterns> {
            let escaped = regex::escape(marker);
            Ok(MarkerPatterns {
                ellipsis_form: Regex::new(&format!(r"(?i)[^.!?]*?\.{{3}}\s*{escaped},?\s*"))?,
                comma_form: Regex::new(&format!(r"(?i),\s*{escaped},?"))?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(CompiledPatterns::build().is_ok());
    }

    #[test]
    fn test_filler_removal_consumes_trailing_comma() {
        let patterns = CompiledPatterns::build().unwrap();
        let um = patterns
            .fillers_light
            .iter()
            .find(|f| f.token == "um")
            .unwrap();
        assert_eq!(um.removal.replace_all("um, world", ""), "world");
        assert_eq!(um.removal.replace_all("Um world", ""), "world");
    }

    #[test]
    fn test_filler_removal_respects_word_boundaries() {
        let patterns = CompiledPatterns::build().unwrap();
        let um = patterns
            .fillers_light
            .iter()
            .find(|f| f.token == "um")
            .unwrap();
        assert_eq!(um.removal.replace_all("umbrella", ""), "umbrella");
        assert_eq!(um.removal.replace_all("drum", ""), "drum");
    }

    #[test]
    fn test_phrase_filler_matches_whole_phrase() {
        let patterns = CompiledPatterns::build().unwrap();
        let you_know = patterns
            .fillers_standard
            .iter()
            .find(|f| f.token == "you know")
            .unwrap();
        assert_eq!(you_know.removal.replace_all("You know, it works", ""), "it works");
    }

    #[test]
    fn test_marker_ellipsis_form() {
        let patterns = CompiledPatterns::build().unwrap();
        // CORRECTION_MARKERS starts with "sorry".
        let sorry = &patterns.markers[0];
        assert_eq!(
            sorry
                .ellipsis_form
                .replace_all("Can you... sorry, can you send this?", ""),
            "can you send this?"
        );
    }
}
