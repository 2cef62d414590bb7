//! Upstream issue node as returned by the issue tracker's GraphQL API.
//!
//! Every level of nesting may be missing or `null`; conversion into
//! [`IssueRecord`] collapses absent pieces to empty/zero.

use serde::Deserialize;

use crate::{body_length_of, IssueRecord};

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GitHubIssue {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Option<LabelConnection>,
    #[serde(default)]
    pub comments: Option<CommentConnection>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Option<Vec<LabelNode>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LabelNode {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentConnection {
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl From<GitHubIssue> for IssueRecord {
    fn from(issue: GitHubIssue) -> Self {
        let id = issue
            .number
            .map(|n| n.to_string())
            .or_else(|| issue.url.clone());
        let labels = issue
            .labels
            .and_then(|conn| conn.nodes)
            .unwrap_or_default()
            .into_iter()
            .map(|node| node.name)
            .collect();
        let comment_count = issue
            .comments
            .and_then(|conn| conn.total_count)
            .unwrap_or(0);
        let body_length = issue.body.as_deref().map_or(0, body_length_of);

        IssueRecord {
            id,
            title: issue.title,
            labels,
            comment_count,
            body_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_full_node() {
        let issue: GitHubIssue = serde_json::from_str(
            r#"{
                "number": 42,
                "title": "Fix typo in README",
                "url": "https://example.invalid/issues/42",
                "body": "abc",
                "labels": {"nodes": [{"name": "good first issue", "color": "7057ff"}]},
                "comments": {"totalCount": 3},
                "createdAt": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        let record = IssueRecord::from(issue);
        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.title.as_deref(), Some("Fix typo in README"));
        assert_eq!(record.labels, vec!["good first issue".to_string()]);
        assert_eq!(record.comment_count, 3);
        assert_eq!(record.body_length, 3);
    }

    #[test]
    fn null_connections_become_zero() {
        let issue: GitHubIssue = serde_json::from_str(
            r#"{"url": "u", "body": null, "labels": null, "comments": {"totalCount": null}}"#,
        )
        .unwrap();

        let record = IssueRecord::from(issue);
        assert_eq!(record.id.as_deref(), Some("u"));
        assert!(record.labels.is_empty());
        assert_eq!(record.comment_count, 0);
        assert_eq!(record.body_length, 0);
    }

    #[test]
    fn missing_label_nodes_become_empty() {
        let issue: GitHubIssue = serde_json::from_str(r#"{"labels": {}}"#).unwrap();
        assert!(IssueRecord::from(issue).labels.is_empty());
    }
}
