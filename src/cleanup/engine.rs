//! The disfluency cleanup engine.
//!
//! Pipeline: Transcriber -> TextCleaner -> OutputHandler

use anyhow::Result;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cleanup::lexicon::EMPHASIS_WORDS;
use crate::cleanup::patterns::CompiledPatterns;
use crate::cleanup::CleanupLevel;
use crate::config::CleanupConfig;
use crate::rewrite::{GroqRewriteProvider, RewriteProvider};

/// Cleans speech disfluencies from transcribed text.
///
/// All matching patterns are compiled once at construction; `clean` itself
/// never fails, for any input and any level. The cleaner holds no mutable
/// state, so one instance can serve concurrent calls.
pub struct TextCleaner {
    level: CleanupLevel,
    preserve_intentional: bool,
    patterns: CompiledPatterns,
    rewriter: Option<Box<dyn RewriteProvider>>,
}

impl std::fmt::Debug for TextCleaner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCleaner")
            .field("level", &self.level.as_str())
            .field("preserve_intentional", &self.preserve_intentional)
            .field("rewriter", &self.rewriter.as_ref().map(|r| r.name()))
            .finish()
    }
}

impl TextCleaner {
    /// Create a cleaner for the given level.
    ///
    /// A missing credential is not an error: the aggressive level then
    /// degrades to the standard pipeline at call time.
    pub fn new(
        level: CleanupLevel,
        api_key: Option<String>,
        preserve_intentional: bool,
    ) -> Result<Self> {
        let rewriter = api_key
            .map(|key| GroqRewriteProvider::new(key, None, None))
            .transpose()?
            .map(|provider| Box::new(provider) as Box<dyn RewriteProvider>);

        Self::with_parts(level, rewriter, preserve_intentional)
    }

    /// Build a cleaner from the externally-owned configuration section.
    ///
    /// An unknown level string fails here, not at the first `clean` call.
    pub fn from_config(config: &CleanupConfig) -> Result<Self> {
        let level = CleanupLevel::from_name(&config.level)?;
        let rewriter = config
            .api_key
            .clone()
            .map(|key| {
                GroqRewriteProvider::new(key, config.api_endpoint.clone(), config.model.clone())
            })
            .transpose()?
            .map(|provider| Box::new(provider) as Box<dyn RewriteProvider>);

        Self::with_parts(level, rewriter, config.preserve_intentional)
    }

    /// Swap in a different rewrite backend for the aggressive stage.
    pub fn with_rewriter(mut self, rewriter: Box<dyn RewriteProvider>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    fn with_parts(
        level: CleanupLevel,
        rewriter: Option<Box<dyn RewriteProvider>>,
        preserve_intentional: bool,
    ) -> Result<Self> {
        let patterns = CompiledPatterns::build()?;

        info!(
            "Initialized text cleaner: level {}, rewrite provider {}",
            level.as_str(),
            rewriter.as_ref().map(|r| r.name()).unwrap_or("none")
        );

        Ok(Self {
            level,
            preserve_intentional,
            patterns,
            rewriter,
        })
    }

    pub fn level(&self) -> CleanupLevel {
        self.level
    }

    /// Clean speech disfluencies from `text` according to the configured
    /// level. Total for any input: the worst case on the aggressive path is
    /// standard-pipeline output, never an error.
    pub async fn clean(&self, text: &str) -> String {
        match self.level {
            CleanupLevel::Disabled => text.to_string(),
            CleanupLevel::Light => self.clean_light(text),
            CleanupLevel::Standard => self.clean_standard(text),
            CleanupLevel::Aggressive => self.clean_aggressive(text).await,
        }
    }

    /// Remove only the obvious interjection fillers (um, uh, ah).
    pub fn clean_light(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut result = text.to_string();
        for filler in &self.patterns.fillers_light {
            result = filler.removal.replace_all(&result, "").into_owned();
        }

        self.normalize_whitespace(&result)
    }

    /// Run the full rule pipeline: false starts, fillers, repetitions,
    /// ellipsis cleanup, then whitespace normalization.
    pub fn clean_standard(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let result = self.remove_false_starts(text);
        let result = self.remove_fillers(&result);
        let result = self.collapse_repetitions(&result);
        let result = self.clean_ellipses(&result);
        let result = self.normalize_whitespace(&result);

        debug!("Cleaned {} chars to {} chars", text.len(), result.len());

        result
    }

    /// Delegate cleanup to the configured rewrite provider.
    ///
    /// Every failure lands on the standard pipeline; the caller always gets
    /// cleaned text back.
    async fn clean_aggressive(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let Some(rewriter) = &self.rewriter else {
            debug!("No rewrite credential configured, using rule-based cleanup");
            return self.clean_standard(text);
        };

        match rewriter.rewrite(text).await {
            Ok(rewritten) => {
                let rewritten = rewritten.trim().to_string();
                // A drastic shrink means the model dropped content, not just
                // disfluencies.
                if (rewritten.len() as f64) < text.len() as f64 * 0.3 {
                    warn!(
                        "{} returned {} chars for {} chars of input, using rule-based cleanup",
                        rewriter.name(),
                        rewritten.len(),
                        text.len()
                    );
                    return self.clean_standard(text);
                }
                rewritten
            }
            Err(e) => {
                warn!("LLM cleanup failed, using rule-based: {e:#}");
                self.clean_standard(text)
            }
        }
    }

    /// Remove abandoned clauses before correction markers.
    fn remove_false_starts(&self, text: &str) -> String {
        let mut result = text.to_string();

        for marker in &self.patterns.markers {
            // "X... sorry, Y" -> "Y"
            result = marker.ellipsis_form.replace_all(&result, "").into_owned();

            // "X, sorry, X" (where X repeats) -> "X"
            result = collapse_marker_echo(&marker.comma_form, &result);
        }

        result
    }

    /// Remove filler words and phrases, longest first.
    fn remove_fillers(&self, text: &str) -> String {
        let mut result = text.to_string();

        for filler in &self.patterns.fillers_standard {
            result = match filler.token {
                "like" if self.preserve_intentional => self.remove_filler_like(&result),
                // "so" carries meaning at clause ends ("I think so"); strip
                // it only where it opens a sentence or clause.
                "so" => self
                    .patterns
                    .sentence_so
                    .replace_all(&result, "${head}${next}")
                    .into_owned(),
                _ => filler.removal.replace_all(&result, "").into_owned(),
            };
        }

        result
    }

    /// Strip "like" used as a discourse filler while keeping verb and
    /// comparative usage: "I like pizza", "it's like a boss fight".
    fn remove_filler_like(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for m in self.patterns.like_word.find_iter(text) {
            if preceded_by_first_person(text, m.start()) {
                continue;
            }
            if self.patterns.like_continuation.is_match(&text[m.end()..]) {
                continue;
            }
            out.push_str(&text[last..m.start()]);
            last = m.end() + separator_len(&text[m.end()..]);
        }

        out.push_str(&text[last..]);
        out
    }

    /// Collapse a contiguous run of the same word to a single occurrence.
    /// Emphasis doubling ("very very") survives when preservation is on.
    fn collapse_repetitions(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut prev: Option<(String, usize)> = None;

        for m in self.patterns.word.find_iter(text) {
            let lower = m.as_str().to_lowercase();

            if let Some((prev_lower, prev_end)) = &prev {
                let gap = &text[*prev_end..m.start()];
                let is_stutter = *prev_lower == lower
                    && !gap.is_empty()
                    && gap.chars().all(char::is_whitespace);

                if is_stutter
                    && !(self.preserve_intentional && EMPHASIS_WORDS.contains(&lower.as_str()))
                {
                    if *prev_end > last {
                        out.push_str(&text[last..*prev_end]);
                    }
                    last = m.end();
                }
            }

            prev = Some((lower, m.end()));
        }

        out.push_str(&text[last..]);
        out
    }

    /// Clean up ellipses orphaned by false-start removal.
    fn clean_ellipses(&self, text: &str) -> String {
        let result = self.patterns.leading_ellipsis.replace(text, "");
        self.patterns
            .dangling_ellipsis
            .replace_all(&result, ". ")
            .into_owned()
    }

    /// Collapse space runs, drop spaces before terminal punctuation, trim.
    /// Idempotent: running it on its own output changes nothing.
    fn normalize_whitespace(&self, text: &str) -> String {
        let result = self.patterns.repeated_spaces.replace_all(text, " ");
        let result = self
            .patterns
            .space_before_punct
            .replace_all(&result, "${punct}");
        result.trim().to_string()
    }
}

/// Collapse "<clause>, <marker>, <clause>" to a single clause occurrence.
///
/// The echoed clause is any comma-free run ending at the marker, compared
/// case-insensitively against the text after it; the longest echo wins.
fn collapse_marker_echo(marker: &Regex, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in marker.find_iter(text) {
        if m.start() < last {
            continue;
        }

        let clause_start = text[last..m.start()]
            .rfind(',')
            .map(|i| last + i + 1)
            .unwrap_or(last);
        let region = &text[clause_start..m.start()];

        let tail_start = m.end() + leading_whitespace_len(&text[m.end()..]);
        let tail = &text[tail_start..];

        let echoed = region.char_indices().find_map(|(i, _)| {
            let candidate = &region[i..];
            match tail.get(..candidate.len()) {
                Some(prefix) if prefix.eq_ignore_ascii_case(candidate) => Some(candidate.len()),
                _ => None,
            }
        });

        if let Some(len) = echoed {
            out.push_str(&text[last..m.start()]);
            last = tail_start + len;
        }
    }

    out.push_str(&text[last..]);
    out
}

/// True when the position is immediately preceded by the standalone pronoun
/// "I" and a single whitespace character, as in "I like pizza".
fn preceded_by_first_person(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();

    if !before.next().is_some_and(char::is_whitespace) {
        return false;
    }
    if !matches!(before.next(), Some('i') | Some('I')) {
        return false;
    }
    !before.next().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Length of an optional comma plus following whitespace: the punctuation a
/// removed filler consumes along with itself.
fn separator_len(rest: &str) -> usize {
    let mut len = 0;
    let mut chars = rest.chars();
    let mut next = chars.next();

    if next == Some(',') {
        len += 1;
        next = chars.next();
    }
    while let Some(c) = next {
        if !c.is_whitespace() {
            break;
        }
        len += c.len_utf8();
        next = chars.next();
    }

    len
}

fn leading_whitespace_len(s: &str) -> usize {
    s.len() - s.trim_start().len()
}
