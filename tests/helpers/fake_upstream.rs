use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use super::scripted_llm::VALID_KEY;

/// What the fake chat-completion endpoint does once the key is accepted.
#[derive(Debug, Clone)]
pub enum UpstreamBehaviour {
    Answer(Vec<&'static str>),
    /// Sends the fragments, then closes without a completion signal.
    Interrupt(Vec<&'static str>),
    /// Sends the fragments, then an in-stream error payload.
    ErrorEvent(Vec<&'static str>, &'static str),
    RateLimited,
}

struct UpstreamState {
    behaviour: UpstreamBehaviour,
    requests: Mutex<Vec<Value>>,
}

/// Local stand-in for the OpenAI API on an ephemeral port.
pub struct FakeUpstream {
    pub base_url: String,
    state: Arc<UpstreamState>,
}

impl FakeUpstream {
    pub async fn spawn(behaviour: UpstreamBehaviour) -> Self {
        let state = Arc::new(UpstreamState {
            behaviour,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/models", get(models))
            .route("/v1/chat/completions", post(completions))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            state,
        }
    }

    pub fn completion_requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", VALID_KEY))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
            }
        })),
    )
        .into_response()
}

fn content_chunk(content: &str) -> String {
    let chunk = json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}],
    });
    format!("data: {}\n\n", chunk)
}

fn stop_chunk() -> String {
    let chunk = json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}],
    });
    format!("data: {}\n\n", chunk)
}

fn event_stream(body: String) -> Response {
    ([(CONTENT_TYPE, "text/event-stream")], body).into_response()
}

async fn models(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "object": "list",
        "data": [
            {"id": "gpt-5-nano", "object": "model", "owned_by": "openai"},
            {"id": "gpt-4o-mini", "object": "model", "owned_by": "openai"},
        ]
    }))
    .into_response()
}

async fn completions(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.requests.lock().unwrap().push(request);

    let role_chunk = format!(
        "data: {}\n\n",
        json!({"choices": [{"index": 0, "delta": {"role": "assistant"}, "finish_reason": null}]})
    );

    match &state.behaviour {
        UpstreamBehaviour::Answer(fragments) => {
            let mut body = role_chunk;
            fragments.iter().for_each(|f| body.push_str(&content_chunk(f)));
            body.push_str(&stop_chunk());
            body.push_str("data: [DONE]\n\n");
            event_stream(body)
        }
        UpstreamBehaviour::Interrupt(fragments) => {
            let mut body = role_chunk;
            fragments.iter().for_each(|f| body.push_str(&content_chunk(f)));
            event_stream(body)
        }
        UpstreamBehaviour::ErrorEvent(fragments, message) => {
            let mut body = role_chunk;
            fragments.iter().for_each(|f| body.push_str(&content_chunk(f)));
            body.push_str(&format!(
                "data: {}\n\n",
                json!({"error": {"message": message, "type": "server_error"}})
            ));
            event_stream(body)
        }
        UpstreamBehaviour::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": {"message": "Rate limit reached", "type": "requests"}})),
        )
            .into_response(),
    }
}
