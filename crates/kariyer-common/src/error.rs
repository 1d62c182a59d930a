//! Token error taxonomy.
//!
//! Uses `thiserror` for the definitions and converts directly into HTTP
//! responses so callers can reject a request with `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Every way issuing or verifying a token can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Claim '{0}' not found")]
    ClaimNotFound(String),

    #[error("Claim '{claim}' is not {expected}")]
    ClaimTypeMismatch {
        claim: String,
        expected: &'static str,
    },

    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    #[error("Signing secret is not configured")]
    SecretUnavailable,
}

/// JSON error body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl TokenError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Signing(_) | Self::SecretUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnexpectedSigningMethod(_) => StatusCode::FORBIDDEN,
            Self::InvalidSignature
            | Self::MalformedToken(_)
            | Self::ExpiredToken
            | Self::ClaimNotFound(_)
            | Self::ClaimTypeMismatch { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Signing(_) => "SIGNING_ERROR",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MalformedToken(_) => "MALFORMED_TOKEN",
            Self::ExpiredToken => "TOKEN_EXPIRED",
            Self::ClaimNotFound(_) => "CLAIM_NOT_FOUND",
            Self::ClaimTypeMismatch { .. } => "CLAIM_TYPE_MISMATCH",
            Self::UnexpectedSigningMethod(_) => "UNEXPECTED_SIGNING_METHOD",
            Self::SecretUnavailable => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't leak internal details to clients
        let message = match &self {
            TokenError::Signing(e) => {
                tracing::error!("Token signing error: {e}");
                "An internal error occurred".to_string()
            }
            TokenError::SecretUnavailable => {
                tracing::error!("Token secret unavailable");
                "An internal error occurred".to_string()
            }
            TokenError::UnexpectedSigningMethod(alg) => {
                tracing::warn!(alg = %alg, "Rejected token with unexpected signing method");
                "Token rejected".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error: self.error_code().to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience type alias for token results.
pub type TokenResult<T> = Result<T, TokenError>;
