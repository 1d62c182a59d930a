//! Uniform JSON envelope for API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{ "message", "status_code", "success", "data" }` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status_code: u16,
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// A 200 response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::OK.as_u16(),
            success: true,
            data,
        }
    }

    /// A response with an explicit status. Only 200 counts as success.
    pub fn new(message: impl Into<String>, status: StatusCode, data: T) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            success: status == StatusCode::OK,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
