use serde_json::Value;

/// Key under which the workflow host nests the GitHub event.
const ENVELOPE_BODY: &str = "body";

/// Returns the GitHub event carried by `payload`.
///
/// Hosts hand over `{"body": <event>}`, while GitHub posts the event itself. GitHub comment
/// events never have a top-level `body`, so an object under that key means we got an envelope.
pub fn unwrap_envelope(payload: &Value) -> &Value {
    match payload.get(ENVELOPE_BODY) {
        Some(body) if body.is_object() => body,
        _ => payload,
    }
}

/// String at JSON pointer `path`, or `default` if it is missing or isn't a string.
pub fn field_or_default<'a>(payload: &'a Value, path: &str, default: &'a str) -> &'a str {
    optional_str(payload, path).unwrap_or(default)
}

fn optional_str<'a>(payload: &'a Value, path: &str) -> Option<&'a str> {
    payload.pointer(path).and_then(Value::as_str)
}

// `0` never identifies an issue or a comment, it is treated like a missing value
fn optional_id(payload: &Value, path: &str) -> Option<u64> {
    payload
        .pointer(path)
        .and_then(Value::as_u64)
        .filter(|&id| id != 0)
}

/// The fields of an `issue_comment` or `pull_request_review_comment` event we care about,
/// borrowed from the raw payload.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentEvent<'a> {
    pub action: Option<&'a str>,
    pub body: &'a str,
    pub html_url: &'a str,
    pub commenter: &'a str,
    pub comment_id: Option<u64>,
    /// Issue number, or pull request number for review comments
    pub number: Option<u64>,
    pub repository: Option<&'a str>,
}

impl<'a> CommentEvent<'a> {
    /// Extracts the comment fields from either an enveloped or a bare event. Never fails: missing
    /// or mistyped fields fall back to empty strings and `None`.
    pub fn from_payload(payload: &'a Value) -> Self {
        let event = unwrap_envelope(payload);

        Self {
            action: optional_str(event, "/action"),
            body: field_or_default(event, "/comment/body", ""),
            html_url: field_or_default(event, "/comment/html_url", ""),
            commenter: field_or_default(event, "/comment/user/login", ""),
            comment_id: optional_id(event, "/comment/id"),
            number: optional_id(event, "/issue/number")
                .or_else(|| optional_id(event, "/pull_request/number")),
            repository: optional_str(event, "/repository/full_name"),
        }
    }
}
