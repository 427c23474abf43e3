use serde::{Deserialize, Serialize};

/// Label color used by GitHub when a label has no usable color.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

/// GitHub issue as returned by the REST API
///
/// Only the fields the blog consumes are modeled; everything else in the
/// payload is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user: IssueUser,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
    pub html_url: String,
}

impl RawIssue {
    /// GitHub lists pull requests on the issues endpoint; they carry a
    /// `pull_request` object.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Issue author
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IssueUser {
    pub login: String,
    pub avatar_url: String,
}

/// Issue label
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IssueLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Error type for decoding tracker payloads
#[derive(Debug, thiserror::Error)]
pub enum IssueDecodeError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of issues, got {0}")]
    NotAnArray(&'static str),
}

/// An element of an issue list that did not match the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedIssue {
    pub index: usize,
    pub reason: String,
}

/// Result of decoding an issue list payload
#[derive(Debug, Clone, Default)]
pub struct IssueBatch {
    pub issues: Vec<RawIssue>,
    pub rejected: Vec<RejectedIssue>,
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Decode the body of a list-issues response
///
/// The payload must be a JSON array. Each element is decoded on its own so a
/// single malformed issue is rejected without losing the rest of the list.
/// Order is preserved for the accepted issues.
pub fn parse_issue_list(payload: &str) -> Result<IssueBatch, IssueDecodeError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;

    let elements = match value {
        serde_json::Value::Array(elements) => elements,
        other => return Err(IssueDecodeError::NotAnArray(json_kind(&other))),
    };

    let mut batch = IssueBatch::default();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<RawIssue>(element) {
            Ok(issue) => batch.issues.push(normalize_issue(issue)),
            Err(e) => batch.rejected.push(RejectedIssue {
                index,
                reason: e.to_string(),
            }),
        }
    }

    Ok(batch)
}

/// Decode the body of a single-issue response
pub fn parse_issue(payload: &str) -> Result<RawIssue, IssueDecodeError> {
    let issue: RawIssue = serde_json::from_str(payload)?;
    Ok(normalize_issue(issue))
}

/// Apply label invariants: normalized colors and unique names
pub fn normalize_issue(mut issue: RawIssue) -> RawIssue {
    issue.labels = normalize_labels(issue.labels);
    issue
}

fn normalize_labels(labels: Vec<IssueLabel>) -> Vec<IssueLabel> {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    let mut result = Vec::with_capacity(labels.len());

    for label in labels {
        if seen.contains(&label.name) {
            continue;
        }
        seen.push(label.name.clone());
        result.push(IssueLabel {
            color: normalize_label_color(&label.color),
            name: label.name,
        });
    }

    result
}

/// Normalize a label color to a lowercase 6-digit hex triplet
///
/// Accepts an optional leading `#`. Anything else falls back to
/// [`DEFAULT_LABEL_COLOR`].
pub fn normalize_label_color(color: &str) -> String {
    let trimmed = color.trim().trim_start_matches('#');
    if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        trimmed.to_ascii_lowercase()
    } else {
        DEFAULT_LABEL_COLOR.to_string()
    }
}
