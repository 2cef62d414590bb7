use difficulty_protocol::DifficultyLevel;

use crate::labels::LabelSignal;

const COMMENTS_LOW: u64 = 2;
const COMMENTS_ACTIVE: u64 = 10;
const BODY_CONCISE: u64 = 500;
const BODY_DETAILED: u64 = 2000;

/// Render the rationale from the same band boundaries the scorers use.
///
/// Phrases always appear in label, discussion, length order.
#[must_use]
pub fn explain(
    signal: LabelSignal,
    comment_count: u64,
    body_length: u64,
    level: DifficultyLevel,
) -> String {
    let mut factors: Vec<&'static str> = Vec::with_capacity(3);

    match signal {
        LabelSignal::Easy => factors.push("beginner-friendly labels"),
        LabelSignal::Hard => factors.push("complex labels"),
        LabelSignal::Neutral => {}
    }

    if comment_count <= COMMENTS_LOW {
        factors.push("low discussion");
    } else if comment_count > COMMENTS_ACTIVE {
        factors.push("active discussion");
    }

    if body_length <= BODY_CONCISE {
        factors.push("concise scope");
    } else if body_length > BODY_DETAILED {
        factors.push("detailed requirements");
    }

    let heading = level.capitalized();
    if factors.is_empty() {
        format!("{heading} difficulty")
    } else {
        format!("{heading}: {}", factors.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_phrases_in_fixed_order() {
        assert_eq!(
            explain(LabelSignal::Hard, 25, 3000, DifficultyLevel::Hard),
            "Hard: complex labels, active discussion, detailed requirements"
        );
        assert_eq!(
            explain(LabelSignal::Easy, 0, 0, DifficultyLevel::Easy),
            "Easy: beginner-friendly labels, low discussion, concise scope"
        );
    }

    #[test]
    fn middle_bands_produce_no_phrase() {
        assert_eq!(
            explain(LabelSignal::Neutral, 5, 1000, DifficultyLevel::Medium),
            "Medium difficulty"
        );
    }

    #[test]
    fn band_edges() {
        assert_eq!(
            explain(LabelSignal::Neutral, 2, 500, DifficultyLevel::Easy),
            "Easy: low discussion, concise scope"
        );
        assert_eq!(
            explain(LabelSignal::Neutral, 10, 2000, DifficultyLevel::Medium),
            "Medium difficulty"
        );
        assert_eq!(
            explain(LabelSignal::Neutral, 11, 2001, DifficultyLevel::Hard),
            "Hard: active discussion, detailed requirements"
        );
    }

    #[test]
    fn heading_follows_level_not_factors() {
        assert_eq!(
            explain(LabelSignal::Hard, 3, 600, DifficultyLevel::Medium),
            "Medium: complex labels"
        );
    }
}
