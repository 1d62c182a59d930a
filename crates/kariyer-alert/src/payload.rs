//! Slack attachment payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Attachment colour shown next to the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
    /// Any other Slack colour, e.g. a hex code like `#439FE0`.
    Custom(String),
}

impl Severity {
    pub const SUCCESS_COLOR: &'static str = "#36a64f";
    pub const INFO_COLOR: &'static str = "#00008b";
    pub const WARNING_COLOR: &'static str = "#ffcc00";
    pub const ERROR_COLOR: &'static str = "#ff0000";

    pub fn color(&self) -> &str {
        match self {
            Self::Success => Self::SUCCESS_COLOR,
            Self::Info => Self::INFO_COLOR,
            Self::Warning => Self::WARNING_COLOR,
            Self::Error => Self::ERROR_COLOR,
            Self::Custom(color) => color,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WebhookPayload {
    attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
struct Attachment {
    color: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mrkdwn_in: Option<Vec<&'static str>>,
}

impl WebhookPayload {
    /// Prefix the message with a timestamp; in markdown mode the timestamp is
    /// bold and Slack is told to render the text as mrkdwn.
    pub(crate) fn new(at: DateTime<Utc>, message: &str, severity: &Severity, markdown: bool) -> Self {
        let stamp = at.format("%Y-%m-%d %H:%M:%S");
        let (text, mrkdwn_in) = if markdown {
            (format!("*{stamp}* - {message}"), Some(vec!["text"]))
        } else {
            (format!("{stamp} - {message}"), None)
        };

        Self {
            attachments: vec![Attachment {
                color: severity.color().to_owned(),
                text,
                mrkdwn_in,
            }],
        }
    }
}
