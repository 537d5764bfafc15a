mod cache;
mod payload;
mod requirement;

pub use cache::{Clock, GuideCache, InMemoryGuideCache, SystemClock};
pub use payload::DEFAULT_MAX_SUROPTIMIZATION;
pub use requirement::{adapt_requirement, KeywordGroup, KeywordRequirement, RawRequirement};

use serde::{Deserialize, Serialize};

/// Everything a text is graded against for one query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuideSpec {
    pub query: Option<String>,
    pub requirements: Vec<KeywordRequirement>,
    pub ngrams: Vec<String>,
    pub required_word_count: u32,
    pub max_suroptimization: u32,
    pub score_target: Option<u32>,
}

impl GuideSpec {
    pub fn mandatory(&self) -> impl Iterator<Item = &KeywordRequirement> {
        self.in_group(KeywordGroup::Mandatory)
    }

    pub fn complementary(&self) -> impl Iterator<Item = &KeywordRequirement> {
        self.in_group(KeywordGroup::Complementary)
    }

    fn in_group(&self, group: KeywordGroup) -> impl Iterator<Item = &KeywordRequirement> {
        self.requirements
            .iter()
            .filter(move |requirement| requirement.group == group)
    }
}

/// Failures while reading an upstream guide payload.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("failed to read guide: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid guide JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("guide payload must be a JSON object")]
    NotAnObject,
}
