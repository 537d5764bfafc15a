use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Which half of the brief a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordGroup {
    Mandatory,
    Complementary,
}

impl KeywordGroup {
    pub fn label(&self) -> &'static str {
        match self {
            KeywordGroup::Mandatory => "mandatory",
            KeywordGroup::Complementary => "complementary",
        }
    }
}

/// Canonical keyword target shared by both upstream guide formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRequirement {
    pub keyword: String,
    pub min_freq: u32,
    pub max_freq: u32,
    pub importance: i64,
    pub group: KeywordGroup,
}

impl KeywordRequirement {
    /// Builds a requirement, defaulting `max_freq` to twice `min_freq` and
    /// never letting it fall below `min_freq`.
    pub fn new(
        keyword: impl Into<String>,
        min_freq: u32,
        max_freq: Option<u32>,
        importance: i64,
        group: KeywordGroup,
    ) -> Self {
        let max_freq = max_freq
            .unwrap_or_else(|| min_freq.saturating_mul(2))
            .max(min_freq);

        Self {
            keyword: keyword.into(),
            min_freq,
            max_freq,
            importance,
            group,
        }
    }

    /// Placeholder standing in for an entry that could not be read.
    pub fn empty(group: KeywordGroup) -> Self {
        Self {
            keyword: String::new(),
            min_freq: 0,
            max_freq: 0,
            importance: 0,
            group,
        }
    }
}

/// Keyword tuple as delivered by a guide provider, told apart by arity.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRequirement {
    /// `[keyword, min_freq, importance]` or `[keyword, min_freq, importance, max_freq]`.
    Legacy {
        keyword: String,
        min_freq: u32,
        importance: i64,
        max_freq: Option<u32>,
    },
    /// `[keyword, frequency, importance, min_freq, max_freq]`.
    Extended {
        keyword: String,
        frequency: u32,
        importance: i64,
        min_freq: u32,
        max_freq: u32,
    },
}

impl RawRequirement {
    pub fn parse(raw: &Value) -> Option<Self> {
        let fields = raw.as_array()?;
        let keyword = fields.first()?.as_str()?.to_string();

        match fields.len() {
            3 | 4 => Some(RawRequirement::Legacy {
                keyword,
                min_freq: frequency(&fields[1])?,
                importance: signed(&fields[2])?,
                max_freq: match fields.get(3) {
                    Some(value) => Some(frequency(value)?),
                    None => None,
                },
            }),
            5 => Some(RawRequirement::Extended {
                keyword,
                frequency: frequency(&fields[1])?,
                importance: signed(&fields[2])?,
                min_freq: frequency(&fields[3])?,
                max_freq: frequency(&fields[4])?,
            }),
            _ => None,
        }
    }

    pub fn into_requirement(self, group: KeywordGroup) -> KeywordRequirement {
        match self {
            RawRequirement::Legacy {
                keyword,
                min_freq,
                importance,
                max_freq,
            } => KeywordRequirement::new(keyword, min_freq, max_freq, importance, group),
            RawRequirement::Extended {
                keyword,
                importance,
                min_freq,
                max_freq,
                ..
            } => KeywordRequirement::new(keyword, min_freq, Some(max_freq), importance, group),
        }
    }
}

/// Converts one upstream keyword tuple into a requirement.
///
/// Entries matching neither shape become [`KeywordRequirement::empty`] so the
/// rest of the guide can still be scored.
pub fn adapt_requirement(raw: &Value, group: KeywordGroup) -> KeywordRequirement {
    match RawRequirement::parse(raw) {
        Some(parsed) => parsed.into_requirement(group),
        None => {
            warn!(entry = %raw, group = group.label(), "unreadable keyword requirement replaced by an empty one");
            KeywordRequirement::empty(group)
        }
    }
}

/// Reads a non-negative count from a JSON integer, float or numeric string.
pub(crate) fn frequency(value: &Value) -> Option<u32> {
    signed(value).map(|number| number.clamp(0, i64::from(u32::MAX)) as u32)
}

pub(crate) fn signed(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n.trunc() as i64)),
        Value::String(raw) => {
            let trimmed = raw.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n.trunc() as i64)
            })
        }
        _ => None,
    }
}
