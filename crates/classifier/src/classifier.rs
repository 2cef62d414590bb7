use difficulty_protocol::{DifficultyResult, IssueRecord};
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::explain::explain;
use crate::factors::{discussion_score, label_score, length_score, FactorScores};
use crate::labels::{classify_labels, LabelSignal};

/// A result together with the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub result: DifficultyResult,
    pub label_signal: LabelSignal,
    pub factors: FactorScores,
    /// Weighted sum before rounding.
    pub raw_score: f64,
}

pub fn assess(record: &IssueRecord) -> Assessment {
    let label_signal = classify_labels(record.labels.as_slice());
    let factors = FactorScores::new(
        label_score(label_signal),
        discussion_score(record.comment_count),
        length_score(record.body_length),
    );
    let agg = aggregate(factors);
    let explanation = explain(
        label_signal,
        record.comment_count,
        record.body_length,
        agg.level,
    );

    log::debug!(
        "difficulty {}: labels={:?} ({:.1}) comments={} ({:.1}) body={} ({:.1}) raw={:.2} -> {} {}",
        record.id.as_deref().unwrap_or("-"),
        label_signal,
        factors.label,
        record.comment_count,
        factors.discussion,
        record.body_length,
        factors.length,
        agg.raw,
        agg.score,
        agg.level
    );

    Assessment {
        result: DifficultyResult {
            level: agg.level,
            score: agg.score,
            explanation,
        },
        label_signal,
        factors,
        raw_score: agg.raw,
    }
}

/// Classify one record. Total: every input yields a fully populated result.
pub fn calculate_difficulty(record: &IssueRecord) -> DifficultyResult {
    assess(record).result
}

/// Classify a batch, preserving input order.
pub fn classify_all(records: &[IssueRecord]) -> Vec<DifficultyResult> {
    records.iter().map(calculate_difficulty).collect()
}
