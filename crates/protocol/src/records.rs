//! Decoding of issue record collections from the shapes upstream tools emit.
//!
//! Accepted inputs:
//!
//! - a JSON array of records
//! - a single record object
//! - a GraphQL envelope: `{"data":{"repository":{"issues":{"nodes":[..]}}}}`
//! - `{"issues":[..]}`, `{"issues":{"nodes":[..]}}` or `{"nodes":[..]}`
//! - newline-delimited JSON, one record per non-blank line
//!
//! Each record is either the plain shape (`labels` as a list of names,
//! `comment_count`, `body_length`) or an upstream [`GitHubIssue`] node. A plain
//! record that also carries upstream keys (`body`, `comments`, `number`, `url`)
//! fills its missing fields from them.

use serde_json::{Map, Value};

use crate::{body_length_of, GitHubIssue, IssueRecord, ProtocolError, Result};

pub fn parse_records(text: &str) -> Result<Vec<IssueRecord>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => records_from_value(value),
        Err(err) if looks_like_json_lines(trimmed) => {
            log::trace!("input is not one JSON document ({err}), decoding as JSON lines");
            parse_json_lines(trimmed)
        }
        Err(err) => Err(ProtocolError::Json(err)),
    }
}

/// More than one non-blank line, the first of which is a complete JSON object.
fn looks_like_json_lines(text: &str) -> bool {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let first_is_object = lines
        .next()
        .is_some_and(|line| matches!(serde_json::from_str::<Value>(line), Ok(Value::Object(_))));
    first_is_object && lines.next().is_some()
}

fn parse_json_lines(text: &str) -> Result<Vec<IssueRecord>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| ProtocolError::Line {
            line: idx + 1,
            source,
        })?;
        let record = match value {
            Value::Object(map) => decode_object(map).map_err(|err| match err {
                ProtocolError::Json(source) => ProtocolError::Line {
                    line: idx + 1,
                    source,
                },
                other => other,
            })?,
            other => {
                return Err(ProtocolError::UnsupportedShape(format!(
                    "line {} holds a JSON {}, expected an object",
                    idx + 1,
                    kind_of(&other)
                )))
            }
        };
        records.push(record);
    }
    Ok(records)
}

fn records_from_value(value: Value) -> Result<Vec<IssueRecord>> {
    match value {
        Value::Array(items) => decode_array(items),
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                let nodes = data
                    .pointer("/repository/issues/nodes")
                    .cloned()
                    .ok_or_else(|| {
                        ProtocolError::UnsupportedShape(
                            "GraphQL envelope without data.repository.issues.nodes".to_string(),
                        )
                    })?;
                return records_from_nodes(nodes);
            }
            if let Some(issues) = map.remove("issues") {
                return match issues {
                    Value::Object(mut conn) => {
                        records_from_nodes(conn.remove("nodes").unwrap_or(Value::Null))
                    }
                    other => records_from_nodes(other),
                };
            }
            if let Some(nodes) = map.remove("nodes") {
                return records_from_nodes(nodes);
            }
            Ok(vec![decode_object(map)?])
        }
        other => Err(ProtocolError::UnsupportedShape(format!(
            "top-level JSON {} is not a record collection",
            kind_of(&other)
        ))),
    }
}

fn records_from_nodes(nodes: Value) -> Result<Vec<IssueRecord>> {
    match nodes {
        Value::Array(items) => decode_array(items),
        Value::Null => Ok(Vec::new()),
        other => Err(ProtocolError::UnsupportedShape(format!(
            "expected an array of issue nodes, found a JSON {}",
            kind_of(&other)
        ))),
    }
}

fn decode_array(items: Vec<Value>) -> Result<Vec<IssueRecord>> {
    items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| !item.is_null())
        .map(|(idx, item)| match item {
            Value::Object(map) => decode_object(map),
            other => Err(ProtocolError::UnsupportedShape(format!(
                "item {idx} is a JSON {}, expected an object",
                kind_of(&other)
            ))),
        })
        .collect()
}

fn decode_object(mut map: Map<String, Value>) -> Result<IssueRecord> {
    if is_upstream_node(&map) {
        let issue: GitHubIssue = serde_json::from_value(Value::Object(map))?;
        Ok(issue.into())
    } else {
        adopt_upstream_keys(&mut map);
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// Fills absent plain fields from upstream keys; explicit plain fields win.
fn adopt_upstream_keys(map: &mut Map<String, Value>) {
    if !map.contains_key("id") {
        let id = match (map.get("number"), map.get("url")) {
            (Some(Value::Number(n)), _) => Some(n.to_string()),
            (_, Some(Value::String(url))) => Some(url.clone()),
            _ => None,
        };
        if let Some(id) = id {
            map.insert("id".to_string(), Value::String(id));
        }
    }
    if !map.contains_key("body_length") {
        if let Some(Value::String(body)) = map.get("body") {
            let length = body_length_of(body);
            map.insert("body_length".to_string(), Value::from(length));
        }
    }
    if !map.contains_key("comment_count") {
        let count = match map.get("comments") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::Object(conn)) => conn.get("totalCount").and_then(Value::as_u64),
            _ => None,
        };
        if let Some(count) = count {
            map.insert("comment_count".to_string(), Value::from(count));
        }
    }
}

/// Plain-record keys win; otherwise any upstream-only key marks an issue node.
fn is_upstream_node(map: &Map<String, Value>) -> bool {
    let plain = map.contains_key("comment_count")
        || map.contains_key("body_length")
        || map.get("labels").is_some_and(Value::is_array);
    if plain {
        return false;
    }
    ["number", "url", "body", "comments"]
        .iter()
        .any(|key| map.contains_key(*key))
        || map.get("labels").is_some_and(Value::is_object)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
