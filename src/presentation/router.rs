use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::FileLoader;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{ask_handler, health_handler, validate_credential_handler};
use crate::presentation::state::AppState;

// Room for the question field and multipart framing on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: FileLoader + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state
        .settings
        .extraction
        .max_file_size_bytes()
        .saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/credentials/validate",
            post(validate_credential_handler::<F>),
        )
        .route("/api/v1/ask", post(ask_handler::<F>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
