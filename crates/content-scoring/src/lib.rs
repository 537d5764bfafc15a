//! Keyword detection and completion scoring for content briefs.
//!
//! A [`GuideSpec`](guide::GuideSpec) lists the mandatory and complementary
//! keywords a text should contain, each with a frequency window. [`analyze`]
//! counts every keyword in a text, tolerating accents, casing, punctuation and
//! elision, and turns the counts into a 0-100 score with an over-optimization
//! penalty. Every engine function is pure: the same text and guide always
//! produce the same [`AnalysisResult`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod guide;
pub mod telemetry;
pub mod text;

pub use analysis::{analyze, AnalysisResult, GuideAnalyzer};
pub use guide::{GuideError, GuideSpec, KeywordGroup, KeywordRequirement};
pub use text::{count_occurrences, normalize, KeywordMatcher};
