use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AskError, ErrorKind};

/// The single error banner every failure is reduced to.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub r#type: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn missing_file() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "missing_file",
            "Upload a document (.txt or .pdf)",
        )
    }

    pub fn payload_too_large(limit_mb: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            format!("Error: the document exceeds the {} MB upload limit", limit_mb),
        )
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                message: self.message.clone(),
                r#type: self.kind.to_string(),
            },
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Decode
        | ErrorKind::Parse
        | ErrorKind::Extraction
        | ErrorKind::MissingDocument => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::Authentication | ErrorKind::MissingCredential => StatusCode::UNAUTHORIZED,
        ErrorKind::MissingQuestion => StatusCode::BAD_REQUEST,
        ErrorKind::Completion | ErrorKind::Stream => StatusCode::BAD_GATEWAY,
    }
}

impl From<AskError> for ApiError {
    fn from(error: AskError) -> Self {
        let kind = error.kind();
        // Prompts for missing input are shown as-is, everything else as an error.
        let message = match kind {
            ErrorKind::MissingCredential | ErrorKind::MissingQuestion => error.to_string(),
            _ => format!("Error: {}", error),
        };

        Self::new(status_for(kind), kind.as_str(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}
