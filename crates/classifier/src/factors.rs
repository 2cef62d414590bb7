use serde::Serialize;

use crate::labels::LabelSignal;

/// Upper bound of the "easy" comment band (inclusive).
const COMMENTS_EASY: u64 = 2;
/// Upper bound of the "medium" comment band (inclusive).
const COMMENTS_MEDIUM: u64 = 10;
/// Points added per comment beyond the medium band.
const COMMENTS_TAIL_SLOPE: f64 = 3.0;

const BODY_EASY: u64 = 500;
const BODY_MEDIUM: u64 = 2000;
/// Points added per 1000 characters beyond the medium band.
const BODY_TAIL_SLOPE: f64 = 10.0;

// Band layout shared by both numeric factors: [0, 33], [34, 66], [67, 100].
const EASY_BAND_TOP: f64 = 33.0;
const MEDIUM_BAND_BASE: f64 = 34.0;
const MEDIUM_BAND_SPAN: f64 = 32.0;
const HARD_BAND_BASE: f64 = 67.0;
const MAX_SCORE: f64 = 100.0;

/// The three clamped sub-scores for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub label: f64,
    pub discussion: f64,
    pub length: f64,
}

impl FactorScores {
    #[must_use]
    pub fn new(label: f64, discussion: f64, length: f64) -> Self {
        Self {
            label: clamp_score(label),
            discussion: clamp_score(discussion),
            length: clamp_score(length),
        }
    }
}

#[must_use]
pub const fn label_score(signal: LabelSignal) -> f64 {
    match signal {
        LabelSignal::Easy => 0.0,
        LabelSignal::Hard => 100.0,
        LabelSignal::Neutral => 50.0,
    }
}

/// Fewer comments means an easier issue.
#[must_use]
pub fn discussion_score(comments: u64) -> f64 {
    banded_score(comments, COMMENTS_EASY, COMMENTS_MEDIUM, |excess| {
        excess as f64 * COMMENTS_TAIL_SLOPE
    })
}

/// Shorter descriptions mean a simpler scope.
#[must_use]
pub fn length_score(chars: u64) -> f64 {
    banded_score(chars, BODY_EASY, BODY_MEDIUM, |excess| {
        (excess as f64 / 1000.0) * BODY_TAIL_SLOPE
    })
}

fn banded_score(value: u64, easy: u64, medium: u64, tail: impl Fn(u64) -> f64) -> f64 {
    let score = if value <= easy {
        (value as f64 / easy as f64) * EASY_BAND_TOP
    } else if value <= medium {
        let position = (value - easy) as f64;
        let range = (medium - easy) as f64;
        MEDIUM_BAND_BASE + (position / range) * MEDIUM_BAND_SPAN
    } else {
        (HARD_BAND_BASE + tail(value - medium)).min(MAX_SCORE)
    };
    clamp_score(score)
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}
