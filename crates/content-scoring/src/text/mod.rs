mod matcher;
mod normalizer;

pub use matcher::{count_occurrences, locate_occurrences, KeywordMatcher, Reconciliation};
pub use normalizer::{normalize, tokenize, Token};
