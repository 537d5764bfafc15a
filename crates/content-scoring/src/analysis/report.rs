use super::scoring::{KeywordMatch, ScoreBreakdown};
use crate::guide::GuideSpec;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// Length of the opening passage report consumers track.
pub const FIRST_WORDS_TARGET: usize = 200;

static WORD_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Everything returned for one text analysed against one guide.
///
/// Serializes to the report shape existing consumers read, with keyword
/// details keyed by keyword in guide order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub score: ScoreBreakdown,
    #[serde(rename = "kw_obligatoires", serialize_with = "keyed_by_keyword")]
    pub mandatory: Vec<KeywordMatch>,
    #[serde(rename = "kw_complementaires", serialize_with = "keyed_by_keyword")]
    pub complementary: Vec<KeywordMatch>,
    pub ngrams_found: Vec<String>,
    #[serde(rename = "suroptimisation")]
    pub suroptimization: u32,
    #[serde(rename = "max_suroptimisation")]
    pub max_suroptimization: u32,
    pub word_count: usize,
    #[serde(rename = "mots_requis")]
    pub required_word_count: u32,
    #[serde(rename = "premiers_mots")]
    pub first_words: FirstWords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirstWords {
    pub count: usize,
    pub target: usize,
}

impl FirstWords {
    fn for_word_count(word_count: usize) -> Self {
        Self {
            count: word_count.min(FIRST_WORDS_TARGET),
            target: FIRST_WORDS_TARGET,
        }
    }
}

pub(crate) fn assemble(
    text: &str,
    guide: &GuideSpec,
    score: ScoreBreakdown,
    mandatory: Vec<KeywordMatch>,
    complementary: Vec<KeywordMatch>,
) -> AnalysisResult {
    let lowered = text.to_lowercase();
    let word_count = word_count(&lowered);

    AnalysisResult {
        suroptimization: suroptimization(
            score.details.over_optimized_count,
            score.details.total_keywords(),
        ),
        score,
        mandatory,
        complementary,
        ngrams_found: ngrams_found(&lowered, &guide.ngrams),
        max_suroptimization: guide.max_suroptimization,
        word_count,
        required_word_count: guide.required_word_count,
        first_words: FirstWords::for_word_count(word_count),
    }
}

/// Runs of letters and digits; combining marks stay attached to their word.
pub fn word_count(text: &str) -> usize {
    let pattern = WORD_PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}\p{M}]*").ok());
    match pattern {
        Some(pattern) => pattern.find_iter(text).count(),
        None => text.split_whitespace().count(),
    }
}

/// N-grams whose lowercased form appears verbatim in `lowered`.
pub fn ngrams_found(lowered: &str, ngrams: &[String]) -> Vec<String> {
    ngrams
        .iter()
        .filter(|ngram| {
            let needle = ngram.trim().to_lowercase();
            !needle.is_empty() && lowered.contains(&needle)
        })
        .cloned()
        .collect()
}

/// Percentage of keywords over-optimized, rounded and capped at 100.
pub fn suroptimization(over_optimized: usize, total_keywords: usize) -> u32 {
    if total_keywords == 0 {
        return 0;
    }
    let percent = (over_optimized as f64 / total_keywords as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u32
}

fn keyed_by_keyword<S>(matches: &[KeywordMatch], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(matches.len()))?;
    for keyword in matches {
        map.serialize_entry(&keyword.keyword, keyword)?;
    }
    map.end()
}
