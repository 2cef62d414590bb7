use anyhow::Result;
use difficulty_classifier::{FactorScores, LabelSignal};
use difficulty_protocol::{display_for, DifficultyLevel, DifficultyResult};
use serde::Serialize;

use crate::batch::Classified;
use crate::flags::OutputFormat;

pub(crate) fn render(rows: &[Classified], format: OutputFormat, breakdown: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(rows, breakdown)),
        OutputFormat::Json => render_json(rows, breakdown),
        OutputFormat::Markdown => Ok(render_markdown(rows, breakdown)),
        OutputFormat::Csv => Ok(render_csv(rows, breakdown)),
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(flatten)]
    result: &'a DifficultyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<JsonBreakdown<'a>>,
}

#[derive(Serialize)]
struct JsonBreakdown<'a> {
    label_signal: LabelSignal,
    factors: &'a FactorScores,
    raw_score: f64,
}

fn render_json(rows: &[Classified], breakdown: bool) -> Result<String> {
    let out: Vec<JsonRow<'_>> = rows
        .iter()
        .map(|row| JsonRow {
            id: row.record.id.as_deref(),
            title: row.record.title.as_deref(),
            result: &row.assessment.result,
            breakdown: breakdown.then(|| JsonBreakdown {
                label_signal: row.assessment.label_signal,
                factors: &row.assessment.factors,
                raw_score: row.assessment.raw_score,
            }),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&out)?;
    json.push('\n');
    Ok(json)
}

fn render_text(rows: &[Classified], breakdown: bool) -> String {
    let mut out = String::new();
    for row in rows {
        let result = &row.assessment.result;
        out.push_str(&format!(
            "{:<6} {:>3}  {}  {}",
            result.level.as_str(),
            result.score,
            identify(row),
            result.explanation
        ));
        if breakdown {
            let f = &row.assessment.factors;
            out.push_str(&format!(
                "  [label={:.1} discussion={:.1} length={:.1} raw={:.2}]",
                f.label, f.discussion, f.length, row.assessment.raw_score
            ));
        }
        out.push('\n');
    }
    out.push_str(&summary_line(rows));
    out.push('\n');
    out
}

fn render_markdown(rows: &[Classified], breakdown: bool) -> String {
    let mut md = String::new();
    md.push_str("# Issue difficulty\n\n");
    if breakdown {
        md.push_str("| id | title | difficulty | score | explanation | label | discussion | length |\n");
        md.push_str("|---|---|---|---:|---|---:|---:|---:|\n");
    } else {
        md.push_str("| id | title | difficulty | score | explanation |\n");
        md.push_str("|---|---|---|---:|---|\n");
    }
    for row in rows {
        let result = &row.assessment.result;
        md.push_str(&format!(
            "| `{}` | {} | {} | `{}` | {} |",
            escape_cell(row.record.id.as_deref().unwrap_or("-")),
            escape_cell(row.record.title.as_deref().unwrap_or("")),
            display_for(result.level).label,
            result.score,
            escape_cell(&result.explanation),
        ));
        if breakdown {
            let f = &row.assessment.factors;
            md.push_str(&format!(
                " `{:.1}` | `{:.1}` | `{:.1}` |",
                f.label, f.discussion, f.length
            ));
        }
        md.push('\n');
    }
    md.push('\n');
    md.push_str("## Summary\n\n");
    for (level, count) in tally(rows) {
        md.push_str(&format!("- {}: `{}`\n", display_for(level).label, count));
    }
    md
}

fn render_csv(rows: &[Classified], breakdown: bool) -> String {
    let mut out = String::from("id,title,level,score,comment_count,body_length,explanation");
    if breakdown {
        out.push_str(",label_score,discussion_score,length_score,raw_score");
    }
    out.push('\n');
    for row in rows {
        let result = &row.assessment.result;
        out.push_str(&format!(
            "{},{},{},{},{},{},{}",
            csv_field(row.record.id.as_deref().unwrap_or("")),
            csv_field(row.record.title.as_deref().unwrap_or("")),
            result.level.as_str(),
            result.score,
            row.record.comment_count,
            row.record.body_length,
            csv_field(&result.explanation),
        ));
        if breakdown {
            let f = &row.assessment.factors;
            out.push_str(&format!(
                ",{:.2},{:.2},{:.2},{:.2}",
                f.label, f.discussion, f.length, row.assessment.raw_score
            ));
        }
        out.push('\n');
    }
    out
}

fn identify(row: &Classified) -> String {
    let id = row
        .record
        .id
        .as_deref()
        .map_or_else(|| "-".to_string(), |id| format!("#{id}"));
    match row.record.title.as_deref() {
        Some(title) => format!("{id} {}", truncate_one_line(title, 60)),
        None => id,
    }
}

pub(crate) fn tally(rows: &[Classified]) -> [(DifficultyLevel, usize); 3] {
    DifficultyLevel::ALL.map(|level| {
        let count = rows
            .iter()
            .filter(|row| row.assessment.result.level == level)
            .count();
        (level, count)
    })
}

fn summary_line(rows: &[Classified]) -> String {
    let parts: Vec<String> = tally(rows)
        .iter()
        .map(|(level, count)| format!("{level}: {count}"))
        .collect();
    format!("{} issues ({})", rows.len(), parts.join(", "))
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn truncate_one_line(s: &str, max_chars: usize) -> String {
    let one_line = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() <= max_chars {
        return one_line;
    }
    let mut out: String = one_line.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use difficulty_classifier::assess;
    use difficulty_protocol::IssueRecord;
    use pretty_assertions::assert_eq;

    fn classified(record: IssueRecord) -> Classified {
        let assessment = assess(&record);
        Classified { record, assessment }
    }

    fn rows() -> Vec<Classified> {
        vec![
            classified(
                IssueRecord::new(["good first issue"], 1, 100)
                    .with_id("1")
                    .with_title("Fix typo"),
            ),
            classified(IssueRecord::new(["security"], 25, 3000).with_id("2")),
        ]
    }

    #[test]
    fn text_lists_each_issue_and_a_summary() {
        let text = render_text(&rows(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "easy     7  #1 Fix typo  Easy: beginner-friendly labels, low discussion, concise scope"
        );
        assert!(lines[1].starts_with("hard    93  #2  Hard:"));
        assert_eq!(lines[2], "2 issues (easy: 1, medium: 0, hard: 1)");
    }

    #[test]
    fn json_breakdown_is_optional() {
        let plain: serde_json::Value =
            serde_json::from_str(&render_json(&rows(), false).unwrap()).unwrap();
        assert_eq!(plain[0]["id"], "1");
        assert_eq!(plain[0]["level"], "easy");
        assert_eq!(plain[0]["score"], 7);
        assert!(plain[0].get("breakdown").is_none());
        assert!(plain[1].get("title").is_none());

        let detailed: serde_json::Value =
            serde_json::from_str(&render_json(&rows(), true).unwrap()).unwrap();
        assert_eq!(detailed[1]["breakdown"]["label_signal"], "hard");
        assert_eq!(detailed[1]["breakdown"]["factors"]["discussion"], 100.0);
    }

    #[test]
    fn markdown_uses_display_labels() {
        let md = render_markdown(&rows(), false);
        assert!(md.contains("| `1` | Fix typo | Easy | `7` |"), "{md}");
        assert!(md.contains("- Hard: `1`"));
        assert!(md.contains("- Medium: `0`"));
    }

    #[test]
    fn breakdown_columns_follow_each_row() {
        let text = render_text(&rows(), true);
        let first = text.lines().next().unwrap();
        assert!(first.contains("  [label="), "{first}");
        assert!(first.ends_with(']'), "{first}");

        let md = render_markdown(&rows(), true);
        assert!(md.contains("| explanation | label | discussion | length |\n"));
        for line in md.lines().filter(|line| line.starts_with("| `")) {
            assert_eq!(line.matches('|').count(), 9, "{line}");
        }
        assert!(md.ends_with("- Hard: `1`\n"), "{md}");
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let csv = render_csv(&rows(), false);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,title,level,score,comment_count,body_length,explanation"
        );
        assert_eq!(
            lines[1],
            "1,Fix typo,easy,7,1,100,\"Easy: beginner-friendly labels, low discussion, concise scope\""
        );
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "word ".repeat(40);
        let out = truncate_one_line(&title, 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }
}
