use super::normalizer::{is_apostrophe, tokenize, Token, APOSTROPHES};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;

/// Rule combining the token count with the contextual count of a risky keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// Contextual count, capped by the token count, whenever it is positive;
    /// otherwise the token count.
    #[default]
    TrustValidation,
    /// Smaller of the two counts, even when the contextual pass finds nothing.
    Minimum,
    /// Larger of the two counts when the contextual pass finds anything.
    Maximum,
}

impl Reconciliation {
    pub fn apply(self, candidate: usize, validated: usize) -> usize {
        match self {
            Reconciliation::TrustValidation if validated > 0 => candidate.min(validated),
            Reconciliation::TrustValidation => candidate,
            Reconciliation::Minimum => candidate.min(validated),
            Reconciliation::Maximum if validated > 0 => candidate.max(validated),
            Reconciliation::Maximum => candidate,
        }
    }
}

/// A keyword prepared once and counted against any number of texts.
///
/// Counting runs in two passes. The candidate pass compares whole normalized
/// tokens, so it ignores case, accents and punctuation but never matches part
/// of a word. Keywords that contain an apostrophe or a hyphen, or that span
/// several words, are then checked against the lowercased source text with a
/// pattern that only allows quotes, hyphens and whitespace between the words,
/// which rejects phrases broken up by other punctuation.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    tokens: Vec<String>,
    validation: Option<Regex>,
    reconciliation: Reconciliation,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Self {
        let tokens: Vec<String> = tokenize(keyword)
            .into_iter()
            .map(|token| token.text)
            .collect();
        let validation = if !tokens.is_empty() && is_risky(keyword) {
            build_validation_pattern(keyword)
        } else {
            None
        };

        Self {
            keyword: keyword.to_string(),
            tokens,
            validation,
            reconciliation: Reconciliation::default(),
        }
    }

    pub fn with_reconciliation(mut self, reconciliation: Reconciliation) -> Self {
        self.reconciliation = reconciliation;
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// True when the keyword normalizes to nothing and can never match.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn count(&self, text: &str) -> usize {
        self.count_in(text, &tokenize(text))
    }

    /// Same as [`KeywordMatcher::count`] for a text that was already tokenized.
    pub fn count_in(&self, text: &str, haystack: &[Token]) -> usize {
        if self.is_empty() {
            return 0;
        }

        let candidate = self.candidate_starts(haystack).count();
        if candidate == 0 {
            return 0;
        }

        match &self.validation {
            Some(pattern) => {
                let validated = count_isolated(pattern, &text.to_lowercase());
                self.reconciliation.apply(candidate, validated)
            }
            None => candidate,
        }
    }

    /// Byte ranges in `text` covering every candidate occurrence.
    ///
    /// For risky keywords, occurrences that fail the contextual pattern are
    /// dropped as long as at least one occurrence passes it.
    pub fn locate(&self, text: &str) -> Vec<Range<usize>> {
        if self.is_empty() {
            return Vec::new();
        }

        let haystack = tokenize(text);
        let width = self.tokens.len();
        let spans: Vec<Range<usize>> = self
            .candidate_starts(&haystack)
            .map(|start| haystack[start].span.start..haystack[start + width - 1].span.end)
            .collect();

        let Some(pattern) = &self.validation else {
            return spans;
        };

        let validated: Vec<Range<usize>> = spans
            .iter()
            .filter(|span| {
                is_isolated(text, span)
                    && pattern
                        .find(&text[(*span).clone()])
                        .is_some_and(|found| found.start() == 0 && found.end() == span.len())
            })
            .cloned()
            .collect();

        if validated.is_empty() {
            spans
        } else {
            validated
        }
    }

    fn candidate_starts<'a>(&'a self, haystack: &'a [Token]) -> impl Iterator<Item = usize> + 'a {
        haystack
            .windows(self.tokens.len())
            .enumerate()
            .filter(move |(_, window)| {
                window
                    .iter()
                    .zip(&self.tokens)
                    .all(|(token, expected)| token.text == *expected)
            })
            .map(|(start, _)| start)
    }
}

/// Counts occurrences of `keyword` in `text`.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    KeywordMatcher::new(keyword).count(text)
}

/// Byte ranges of every occurrence of `keyword` in `text`, for highlighting.
pub fn locate_occurrences(text: &str, keyword: &str) -> Vec<Range<usize>> {
    KeywordMatcher::new(keyword).locate(text)
}

fn is_risky(keyword: &str) -> bool {
    keyword.chars().any(|ch| is_apostrophe(ch) || ch == '-')
        || keyword.split_whitespace().nth(1).is_some()
}

fn is_keyword_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '-' || is_apostrophe(ch)
}

fn build_validation_pattern(keyword: &str) -> Option<Regex> {
    let separator: String = APOSTROPHES
        .iter()
        .map(|ch| regex::escape(&ch.to_string()))
        .collect();
    let separator = format!(r"[\s{separator}\-]+");

    let lowered = keyword.to_lowercase();
    let parts: Vec<String> = lowered
        .split(is_keyword_separator)
        .filter(|part| !part.is_empty())
        .map(regex::escape)
        .collect();
    if parts.is_empty() {
        return None;
    }

    match RegexBuilder::new(&parts.join(&separator))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            debug!(keyword, error = %err, "contextual pattern unavailable, using token count");
            None
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || is_combining_mark(ch)
}

fn is_isolated(haystack: &str, range: &Range<usize>) -> bool {
    let before = haystack[..range.start].chars().next_back();
    let after = haystack[range.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Counts matches of `pattern` that are not glued to a word character on
/// either side, retrying one character further on after a rejected match.
fn count_isolated(pattern: &Regex, haystack: &str) -> usize {
    let mut count = 0;
    let mut at = 0;

    while let Some(found) = pattern.find_at(haystack, at) {
        if !found.is_empty() && is_isolated(haystack, &found.range()) {
            count += 1;
            at = found.end();
        } else {
            at = match haystack[found.start()..].chars().next() {
                Some(ch) => found.start() + ch.len_utf8(),
                None => break,
            };
        }
    }

    count
}
