use clap::ValueEnum;
use difficulty_protocol::DifficultyLevel;
use serde::Deserialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
    Csv,
}

impl OutputFormat {
    /// Formats meant for other programs; logging must stay off stdout and quiet.
    pub(crate) const fn is_machine_readable(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Csv)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortOrder {
    /// Keep input order
    #[default]
    Input,
    /// Easiest first
    Score,
    /// Fewest comments first
    Comments,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LevelFlag {
    Easy,
    Medium,
    Hard,
}

impl LevelFlag {
    pub(crate) const fn as_domain(self) -> DifficultyLevel {
        match self {
            LevelFlag::Easy => DifficultyLevel::Easy,
            LevelFlag::Medium => DifficultyLevel::Medium,
            LevelFlag::Hard => DifficultyLevel::Hard,
        }
    }
}
