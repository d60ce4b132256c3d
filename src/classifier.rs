use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::{config::PrwatchConfig, webhooks::github::CommentEvent};

pub(crate) mod utils;

const ACTION_CREATED: &str = "created";
const ACTION_EDITED: &str = "edited";

/// Which notification, if any, the next workflow steps should send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Completion,
    Review,
    None,
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Completion => "completion",
            Self::Review => "review",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// The record handed back to the workflow host for one comment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub notification_type: NotificationType,
    pub needs_review: bool,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    pub phase: Option<String>,
    pub comment: String,
    pub html_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    pub commenter: String,
    pub comment_id: Option<u64>,
    /// Built without validation, a missing repository or number leaves its segment empty
    /// (`https://github.com//pull/`)
    pub pr_url: String,
    /// Diagnostic only, set even when the marker wasn't posted by the bot
    pub has_phase4_marker: bool,
}

/// Classifies a raw webhook payload, enveloped or not.
pub fn classify(payload: &Value, config: &PrwatchConfig) -> Classification {
    classify_event(&CommentEvent::from_payload(payload), config)
}

pub fn classify_event(event: &CommentEvent<'_>, config: &PrwatchConfig) -> Classification {
    let rules = &config.rules;
    let comment = event.body;

    let has_review_tag = comment.contains(&rules.review_tag);
    let phase = rules
        .phase_pattern
        .captures(comment)
        .and_then(|captures| captures.get(1))
        .map(|phase| phase.as_str().to_owned());
    let has_phase4_marker = comment.contains(&rules.completion_marker);

    let is_completed = has_phase4_marker && event.commenter == rules.completion_author;

    let needs_review = has_review_tag
        && !is_completed
        && match event.action {
            Some(ACTION_CREATED) => true,
            Some(ACTION_EDITED) => comment.contains(&rules.finished_marker),
            _ => false,
        };

    // completion wins over review
    let notification_type = match (is_completed, needs_review) {
        (true, _) => NotificationType::Completion,
        (false, true) => NotificationType::Review,
        (false, false) => NotificationType::None,
    };

    trace!(
        "review tag: {}, phase: {:?}, completion marker: {}",
        has_review_tag,
        phase,
        has_phase4_marker
    );

    Classification {
        notification_type,
        needs_review,
        is_completed,
        pr_number: event.number,
        phase,
        comment: comment.to_owned(),
        html_url: event.html_url.to_owned(),
        event_type: event.action.map(str::to_owned),
        commenter: event.commenter.to_owned(),
        comment_id: event.comment_id,
        pr_url: config.pr_url(event.repository, event.number),
        has_phase4_marker,
    }
}
