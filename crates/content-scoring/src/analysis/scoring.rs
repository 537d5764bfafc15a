use crate::guide::KeywordRequirement;
use serde::{Deserialize, Serialize};

/// Share of the score earned by completing every mandatory keyword.
pub const MANDATORY_WEIGHT: f64 = 70.0;
/// Share of the score earned by completing every complementary keyword.
pub const COMPLEMENTARY_WEIGHT: f64 = 30.0;
/// Points lost when every keyword is over-optimized.
pub const MALUS_WEIGHT: f64 = 20.0;

/// Occurrence count of one keyword measured against its requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Carried by the map key in reports.
    #[serde(skip_serializing, default)]
    pub keyword: String,
    pub count: u32,
    pub required: u32,
    #[serde(skip)]
    pub max_freq: u32,
    pub importance: i64,
    pub completed: bool,
}

impl KeywordMatch {
    pub fn evaluate(requirement: &KeywordRequirement, count: usize) -> Self {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            keyword: requirement.keyword.clone(),
            count,
            required: requirement.min_freq,
            max_freq: requirement.max_freq,
            importance: requirement.importance,
            completed: count >= requirement.min_freq,
        }
    }

    /// Reached its minimum, then went past its maximum.
    pub fn is_over_optimized(&self) -> bool {
        self.completed && self.count > self.max_freq
    }
}

/// Success tallies behind a [`ScoreBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreDetails {
    #[serde(rename = "obligatoires_success")]
    pub mandatory_success: usize,
    #[serde(rename = "total_obligatoires")]
    pub total_mandatory: usize,
    #[serde(rename = "complementaires_success")]
    pub complementary_success: usize,
    #[serde(rename = "total_complementaires")]
    pub total_complementary: usize,
    #[serde(rename = "malus_count")]
    pub over_optimized_count: usize,
}

impl ScoreDetails {
    pub fn total_keywords(&self) -> usize {
        self.total_mandatory + self.total_complementary
    }
}

/// Weighted score with its components, each rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score_seo: f64,
    pub base_score: f64,
    pub malus: f64,
    #[serde(rename = "score_obligatoires")]
    pub score_mandatory: f64,
    #[serde(rename = "score_complementaires")]
    pub score_complementary: f64,
    #[serde(rename = "score_details")]
    pub details: ScoreDetails,
}

pub fn compute(mandatory: &[KeywordMatch], complementary: &[KeywordMatch]) -> ScoreBreakdown {
    let details = ScoreDetails {
        mandatory_success: completed(mandatory),
        total_mandatory: mandatory.len(),
        complementary_success: completed(complementary),
        total_complementary: complementary.len(),
        over_optimized_count: mandatory
            .iter()
            .chain(complementary)
            .filter(|keyword| keyword.is_over_optimized())
            .count(),
    };

    let score_mandatory = weighted(details.mandatory_success, details.total_mandatory, MANDATORY_WEIGHT);
    let score_complementary = weighted(
        details.complementary_success,
        details.total_complementary,
        COMPLEMENTARY_WEIGHT,
    );
    let base_score = score_mandatory + score_complementary;
    let malus = weighted(details.over_optimized_count, details.total_keywords(), MALUS_WEIGHT);
    let score_seo = (base_score - malus).clamp(0.0, 100.0);

    ScoreBreakdown {
        score_seo: round_tenth(score_seo),
        base_score: round_tenth(base_score),
        malus: round_tenth(malus),
        score_mandatory: round_tenth(score_mandatory),
        score_complementary: round_tenth(score_complementary),
        details,
    }
}

fn completed(matches: &[KeywordMatch]) -> usize {
    matches.iter().filter(|keyword| keyword.completed).count()
}

fn weighted(part: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * weight
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
