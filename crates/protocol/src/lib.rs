use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod display;
mod error;
pub mod github;
pub mod records;

pub use display::{display_for, DifficultyDisplay};
pub use error::{ProtocolError, Result};
pub use github::GitHubIssue;
pub use records::parse_records;

/// Discrete difficulty tier. Serialized lowercase so renderers can key on it.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Highest score still classified as easy.
    pub const EASY_MAX_SCORE: u8 = 33;
    /// Highest score still classified as medium.
    pub const MEDIUM_MAX_SCORE: u8 = 66;

    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score <= Self::EASY_MAX_SCORE {
            Self::Easy
        } else if score <= Self::MEDIUM_MAX_SCORE {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Level name with the first character upper-cased ("Easy", "Medium", "Hard").
    #[must_use]
    pub fn capitalized(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about one tracked work item.
///
/// Every field is optional on the wire; absent values decode to their zero
/// equivalent so the classifier never sees a missing field. Unknown keys are
/// ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct IssueRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Label names. Order is irrelevant.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub comment_count: u64,
    /// Length of the free-text description in UTF-16 code units.
    #[serde(default)]
    pub body_length: u64,
}

impl IssueRecord {
    #[must_use]
    pub fn new<I, S>(labels: I, comment_count: u64, body_length: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            title: None,
            labels: labels.into_iter().map(Into::into).collect(),
            comment_count,
            body_length,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets `body_length` from description text, counted in UTF-16 code units
    /// so astral characters such as emoji weigh two.
    #[must_use]
    pub fn with_body(mut self, body: &str) -> Self {
        self.body_length = body_length_of(body);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct DifficultyResult {
    pub level: DifficultyLevel,
    /// 0..=100, lower means easier.
    pub score: u8,
    pub explanation: String,
}

pub(crate) fn body_length_of(body: &str) -> u64 {
    body.encode_utf16().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_cut_points_are_inclusive_on_the_low_band() {
        assert_eq!(DifficultyLevel::from_score(0), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_score(33), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_score(34), DifficultyLevel::Medium);
        assert_eq!(DifficultyLevel::from_score(66), DifficultyLevel::Medium);
        assert_eq!(DifficultyLevel::from_score(67), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::from_score(100), DifficultyLevel::Hard);
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&DifficultyLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(DifficultyLevel::Hard.capitalized(), "Hard");
    }

    #[test]
    fn record_fields_default_to_zero() {
        let record: IssueRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, IssueRecord::default());
        assert!(record.labels.is_empty());
        assert_eq!(record.comment_count, 0);
        assert_eq!(record.body_length, 0);
    }

    #[test]
    fn body_length_counts_characters() {
        let record = IssueRecord::default().with_body("héllo ✓");
        assert_eq!(record.body_length, 7);
    }

    #[test]
    fn body_length_counts_astral_characters_twice() {
        let body = "\u{1F600}".repeat(300);
        let record = IssueRecord::default().with_body(&body);
        assert_eq!(record.body_length, 600);
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let record: IssueRecord =
            serde_json::from_str(r#"{"labels": ["bug"], "state": "open"}"#).unwrap();
        assert_eq!(record, IssueRecord::new(["bug"], 0, 0));
    }
}
