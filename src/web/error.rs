// Error types for the scan API and their JSON rendering.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    // No `week_number` field in the form.
    MissingWeekNumber,
    // No image file, or a file whose extension is not accepted.
    MissingImage,
    // Decoding or the OCR engine failed. Details are logged, never returned.
    ProcessError,
    // The multipart stream itself could not be read.
    BadRequest(String),
    // The body went over the configured upload limit.
    PayloadTooLarge(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::MissingWeekNumber => (StatusCode::NOT_FOUND, "No week number".to_string()),
            Self::MissingImage => (StatusCode::FORBIDDEN, "Missing image".to_string()),
            Self::ProcessError => (StatusCode::BAD_REQUEST, "Process error".to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let message = format!("Invalid multipart request: {}", err.body_text());
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}
