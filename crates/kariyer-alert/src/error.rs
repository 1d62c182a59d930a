//! Alert delivery errors. Only visible through [`AlertClient::send`](crate::AlertClient::send).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Slack webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Error sending Slack message: {0}")]
    Http(#[from] reqwest::Error),
}
