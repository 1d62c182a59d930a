//! Mail delivery errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    /// Mailjet answered with a non-2xx status.
    #[error("Mailjet API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Mailjet accepted the request but reported no message result.
    #[error("Mailjet response contained no message result")]
    EmptyResult,

    /// Transport or decoding failure in the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type MailResult<T> = Result<T, MailError>;
