use super::requirement::{adapt_requirement, frequency, KeywordGroup};
use super::{GuideError, GuideSpec};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Over-optimization ceiling assumed by report consumers when a provider omits it.
pub const DEFAULT_MAX_SUROPTIMIZATION: u32 = 5;

const MANDATORY_FIELD: &str = "KW_obligatoires";
const COMPLEMENTARY_FIELD: &str = "KW_complementaires";
const NGRAMS_FIELD: &str = "ngrams";
const WORD_COUNT_FIELD: &str = "mots_requis";
const MAX_SUROPTIMIZATION_FIELD: &str = "max_suroptimisation";
const QUERY_FIELD: &str = "query";
const SCORE_TARGET_FIELD: &str = "score_target";

impl GuideSpec {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GuideError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GuideError> {
        let payload: Value = serde_json::from_reader(reader)?;
        Self::from_payload(&payload)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GuideError> {
        let payload: Value = serde_json::from_str(raw)?;
        Self::from_payload(&payload)
    }

    /// Builds a guide from a provider payload, filling in defaults for every
    /// missing field. `ngrams` may be a `;`-separated string or an array.
    pub fn from_payload(payload: &Value) -> Result<Self, GuideError> {
        let object = payload.as_object().ok_or(GuideError::NotAnObject)?;

        let mut requirements = Vec::new();
        for (field, group) in [
            (MANDATORY_FIELD, KeywordGroup::Mandatory),
            (COMPLEMENTARY_FIELD, KeywordGroup::Complementary),
        ] {
            requirements.extend(
                keyword_entries(object, field)
                    .iter()
                    .map(|entry| adapt_requirement(entry, group)),
            );
        }

        let guide = GuideSpec {
            query: object
                .get(QUERY_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string)
                .filter(|query| !query.trim().is_empty()),
            requirements,
            ngrams: ngrams(object.get(NGRAMS_FIELD)),
            required_word_count: object.get(WORD_COUNT_FIELD).and_then(frequency).unwrap_or(0),
            max_suroptimization: object
                .get(MAX_SUROPTIMIZATION_FIELD)
                .and_then(frequency)
                .unwrap_or(DEFAULT_MAX_SUROPTIMIZATION),
            score_target: object.get(SCORE_TARGET_FIELD).and_then(frequency),
        };

        debug!(
            query = guide.query.as_deref().unwrap_or_default(),
            requirements = guide.requirements.len(),
            ngrams = guide.ngrams.len(),
            "guide payload loaded"
        );

        Ok(guide)
    }
}

fn keyword_entries<'a>(object: &'a Map<String, Value>, field: &str) -> &'a [Value] {
    match object.get(field) {
        Some(Value::Array(entries)) => entries.as_slice(),
        None | Some(Value::Null) => &[],
        Some(other) => {
            warn!(field, value = %other, "keyword list is not an array, ignoring it");
            &[]
        }
    }
}

fn ngrams(value: Option<&Value>) -> Vec<String> {
    let candidates: Vec<&str> = match value {
        Some(Value::String(joined)) => joined.split(';').collect(),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    candidates
        .into_iter()
        .map(str::trim)
        .filter(|ngram| !ngram.is_empty())
        .map(str::to_string)
        .collect()
}
