//! Lexeme normalization policy
//!
//! A dictionary is built under exactly one policy and persists it, so a
//! lexeme learned in one document is found again in the next regardless of
//! how the caller is configured.

use lexitok_config::CaseConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Trim, then fold to lowercase
    #[default]
    Lowercase,
    /// Trim only
    Preserve,
}

impl Normalization {
    /// Normalize a raw piece of text. Returns an empty string for blank input.
    pub fn apply(self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            Normalization::Lowercase => trimmed.to_lowercase(),
            Normalization::Preserve => trimmed.to_string(),
        }
    }
}

impl From<CaseConfig> for Normalization {
    fn from(case: CaseConfig) -> Self {
        match case {
            CaseConfig::Lowercase => Normalization::Lowercase,
            CaseConfig::Preserve => Normalization::Preserve,
        }
    }
}
