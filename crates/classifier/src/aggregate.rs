use difficulty_protocol::DifficultyLevel;

use crate::factors::FactorScores;

pub const LABEL_WEIGHT: f64 = 0.4;
pub const DISCUSSION_WEIGHT: f64 = 0.3;
pub const LENGTH_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Weighted sum before rounding.
    pub raw: f64,
    pub score: u8,
    pub level: DifficultyLevel,
}

/// Weighted average of the sub-scores, rounded half away from zero, then tiered.
#[must_use]
pub fn aggregate(scores: FactorScores) -> Aggregate {
    let raw = scores.label * LABEL_WEIGHT
        + scores.discussion * DISCUSSION_WEIGHT
        + scores.length * LENGTH_WEIGHT;
    // Sub-scores are clamped and the weights sum to 1, so this stays within u8.
    let score = raw.round().clamp(0.0, 100.0) as u8;

    Aggregate {
        raw,
        score,
        level: DifficultyLevel::from_score(score),
    }
}
