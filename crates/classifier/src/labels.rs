use once_cell::sync::Lazy;
use serde::Serialize;

/// Label names that signal an approachable issue.
pub const EASY_LABELS: &[&str] = &[
    "good first issue",
    "good-first-issue",
    "beginner",
    "beginner-friendly",
    "easy",
    "starter",
    "first-timers-only",
    "documentation",
    "docs",
    "typo",
];

/// Label names that signal an involved issue.
pub const HARD_LABELS: &[&str] = &[
    "complex",
    "difficult",
    "hard",
    "advanced",
    "architecture",
    "security",
    "performance",
    "breaking-change",
    "major",
];

static EASY_PATTERNS: Lazy<Vec<String>> = Lazy::new(|| normalize_all(EASY_LABELS));
static HARD_PATTERNS: Lazy<Vec<String>> = Lazy::new(|| normalize_all(HARD_LABELS));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSignal {
    Easy,
    Hard,
    Neutral,
}

/// Lower-case and drop whitespace and hyphens: "Good First-Issue" -> "goodfirstissue".
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn normalize_all(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| normalize_label(p)).collect()
}

/// Easy patterns are checked first, so a record matching both vocabularies is easy.
#[must_use]
pub fn classify_labels<S: AsRef<str>>(labels: &[S]) -> LabelSignal {
    let normalized: Vec<String> = labels
        .iter()
        .map(|label| normalize_label(label.as_ref()))
        .collect();

    if any_match(&normalized, &EASY_PATTERNS) {
        LabelSignal::Easy
    } else if any_match(&normalized, &HARD_PATTERNS) {
        LabelSignal::Hard
    } else {
        LabelSignal::Neutral
    }
}

fn any_match(labels: &[String], patterns: &[String]) -> bool {
    labels.iter().any(|label| {
        patterns.iter().any(|pattern| {
            let hit = label.contains(pattern.as_str()) || pattern.contains(label.as_str());
            if hit {
                log::trace!("label '{label}' matched pattern '{pattern}'");
            }
            hit
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalization_strips_case_space_and_hyphen() {
        assert_eq!(normalize_label("Good First Issue"), "goodfirstissue");
        assert_eq!(normalize_label("good-first-issue"), "goodfirstissue");
        assert_eq!(normalize_label("  Breaking-Change\t"), "breakingchange");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn easy_variants() {
        assert_eq!(classify_labels(&["good first issue"]), LabelSignal::Easy);
        assert_eq!(classify_labels(&["Good-First-Issue"]), LabelSignal::Easy);
        assert_eq!(classify_labels(&["beginner friendly"]), LabelSignal::Easy);
        assert_eq!(classify_labels(&["Documentation"]), LabelSignal::Easy);
        assert_eq!(classify_labels(&["typo"]), LabelSignal::Easy);
    }

    #[test]
    fn containment_is_bidirectional() {
        // label contains pattern
        assert_eq!(
            classify_labels(&["good-first-issue-2024"]),
            LabelSignal::Easy
        );
        assert_eq!(classify_labels(&["area: security"]), LabelSignal::Hard);
        // pattern contains label
        assert_eq!(classify_labels(&["doc"]), LabelSignal::Easy);
        assert_eq!(classify_labels(&["perf"]), LabelSignal::Hard);
    }

    #[test]
    fn hard_variants() {
        assert_eq!(classify_labels(&["Security"]), LabelSignal::Hard);
        assert_eq!(classify_labels(&["breaking change"]), LabelSignal::Hard);
        assert_eq!(classify_labels(&["architecture"]), LabelSignal::Hard);
    }

    #[test]
    fn easy_takes_precedence_over_hard() {
        assert_eq!(
            classify_labels(&["security", "good first issue"]),
            LabelSignal::Easy
        );
    }

    #[test]
    fn unrelated_and_empty_labels_are_neutral() {
        let empty: [&str; 0] = [];
        assert_eq!(classify_labels(&empty), LabelSignal::Neutral);
        assert_eq!(classify_labels(&["bug", "enhancement"]), LabelSignal::Neutral);
    }

    #[test]
    fn blank_label_matches_everything() {
        // A blank label normalizes to "" which every pattern contains.
        assert_eq!(classify_labels(&[" - "]), LabelSignal::Easy);
    }
}
