use serde::Serialize;

use crate::DifficultyLevel;

/// Presentation mapping for a tier: a human-facing label plus two opaque style tokens.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyDisplay {
    pub label: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

#[must_use]
pub const fn display_for(level: DifficultyLevel) -> DifficultyDisplay {
    match level {
        DifficultyLevel::Easy => DifficultyDisplay {
            label: "Easy",
            background: "bg-green-500/15",
            text: "text-green-400",
        },
        DifficultyLevel::Medium => DifficultyDisplay {
            label: "Medium",
            background: "bg-amber-500/15",
            text: "text-amber-400",
        },
        DifficultyLevel::Hard => DifficultyDisplay {
            label: "Hard",
            background: "bg-red-500/15",
            text: "text-red-400",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_matching_label() {
        for level in DifficultyLevel::ALL {
            assert_eq!(display_for(level).label, level.capitalized());
        }
    }

    #[test]
    fn style_tokens_are_distinct_per_level() {
        let easy = display_for(DifficultyLevel::Easy);
        let hard = display_for(DifficultyLevel::Hard);
        assert_eq!(easy.background, "bg-green-500/15");
        assert_eq!(hard.text, "text-red-400");
        assert_ne!(easy.background, hard.background);
    }
}
