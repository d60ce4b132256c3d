use rocket::{
    request::{FromRequest, Outcome},
    serde::json::Json,
    Request, State,
};
use serde_json::Value;
use tracing::{info, trace};

use crate::{
    classifier::{classify_event, utils::shorten_content, Classification},
    config::PrwatchConfig,
};

mod events;
pub use events::*;

const X_GITHUB_EVENT: &str = "X-GitHub-Event";

#[rocket::post("/api/webhooks/github", data = "<payload>")]
pub fn github_webhook(
    event: GitHubEventType,
    payload: Json<Value>,
    config: &State<PrwatchConfig>,
) -> Json<Classification> {
    trace!("received {:?} payload:\n{}", event, payload.0);

    let comment = CommentEvent::from_payload(&payload.0);
    let classification = classify_event(&comment, config.inner());

    info!(
        "classified {} ({}) on #{} by `{}` as {}: {}",
        event,
        comment.action.unwrap_or("no action"),
        comment.number.map(|n| n.to_string()).unwrap_or_default(),
        comment.commenter,
        classification.notification_type,
        shorten_content(comment.body)
    );

    Json(classification)
}

/// Value of the `X-GitHub-Event` header. Only used for logging, the payload is classified the
/// same whatever its event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEventType {
    IssueComment,
    PullRequestReviewComment,
    Ping,
    Other(String),
    /// The request had no (or several) event headers, e.g. when a host forwards the payload
    Unknown,
}

impl GitHubEventType {
    pub fn from_header(value: &str) -> Self {
        match value {
            "issue_comment" => Self::IssueComment,
            "pull_request_review_comment" => Self::PullRequestReviewComment,
            "ping" => Self::Ping,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for GitHubEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssueComment => f.write_str("issue_comment"),
            Self::PullRequestReviewComment => f.write_str("pull_request_review_comment"),
            Self::Ping => f.write_str("ping"),
            Self::Other(name) => f.write_str(name),
            Self::Unknown => f.write_str("unknown event"),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for GitHubEventType {
    type Error = anyhow::Error;

    // never fails, an unknown event type is still classified

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let event_types = request.headers().get(X_GITHUB_EVENT).collect::<Vec<_>>();
        if event_types.len() != 1 {
            trace!("request doesn't have exactly one {} header", X_GITHUB_EVENT);
            return Outcome::Success(Self::Unknown);
        }

        Outcome::Success(Self::from_header(event_types[0]))
    }
}
