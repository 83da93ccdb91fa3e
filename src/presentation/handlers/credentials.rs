use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Serialize;

use crate::application::ports::FileLoader;
use crate::application::services::AskError;
use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::credential::bearer_credential;

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub message: &'static str,
    pub model_count: usize,
}

/// Lets the client confirm a key before offering the upload form.
#[tracing::instrument(skip(state, headers))]
pub async fn validate_credential_handler<F>(
    State(state): State<AppState<F>>,
    headers: HeaderMap,
) -> Result<Json<ValidationResponse>, ApiError>
where
    F: FileLoader + ?Sized + 'static,
{
    let credential = bearer_credential(&headers).map_err(AskError::from)?;
    let client = state.qa_service.validate(&credential).await?;

    Ok(Json(ValidationResponse {
        valid: true,
        message: "API Key validated!",
        model_count: client.model_count(),
    }))
}
