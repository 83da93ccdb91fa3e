use std::convert::Infallible;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{FileLoader, FragmentSink, SinkClosed};
use crate::application::services::{AskError, RenderSummary, StreamError};
use crate::domain::UploadedDocument;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_error::ApiError;
use super::credential::bearer_credential;

const EVENT_BUFFER: usize = 64;

const FILE_FIELD: &str = "file";
const QUESTION_FIELD: &str = "question";

#[derive(Serialize)]
struct FragmentPayload<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct DonePayload {
    fragments: usize,
    characters: usize,
}

struct AskForm {
    filename: String,
    data: Bytes,
    question: String,
}

/// Writes fragments to the SSE response as they arrive.
struct SseSink {
    sender: mpsc::Sender<Event>,
}

#[async_trait]
impl FragmentSink for SseSink {
    async fn write_fragment(&mut self, fragment: &str) -> Result<(), SinkClosed> {
        let event = Event::default()
            .event("fragment")
            .json_data(FragmentPayload { content: fragment })
            .map_err(|_| SinkClosed)?;
        self.sender.send(event).await.map_err(|_| SinkClosed)
    }
}

fn done_event(summary: RenderSummary) -> Event {
    Event::default()
        .event("done")
        .json_data(DonePayload {
            fragments: summary.fragments,
            characters: summary.characters,
        })
        .unwrap_or_else(|_| Event::default().event("done"))
}

fn error_event(error: ApiError) -> Event {
    let message = error.message.clone();
    Event::default()
        .event("error")
        .json_data(error.body())
        .unwrap_or_else(|_| Event::default().event("error").data(message))
}

async fn read_form(mut multipart: Multipart, max_bytes: usize) -> Result<AskForm, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut question = String::new();

    let limit_mb = max_bytes / (1024 * 1024);
    let read_error = |e: MultipartError| {
        // The router body limit surfaces here when the upload is far over the cap.
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::payload_too_large(limit_mb);
        }
        ApiError::new(
            e.status(),
            "invalid_request_error",
            format!("Error: failed to read upload: {}", e.body_text()),
        )
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(read_error)?;
                file = Some((filename, data));
            }
            Some(QUESTION_FIELD) => {
                question = field.text().await.map_err(read_error)?;
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    let (filename, data) = file.ok_or_else(ApiError::missing_file)?;
    if filename.is_empty() {
        return Err(ApiError::missing_file());
    }
    if data.len() > max_bytes {
        return Err(ApiError::payload_too_large(limit_mb));
    }

    Ok(AskForm {
        filename,
        data,
        question,
    })
}

/// Validates the key, reads the upload, then streams the answer as server-sent events.
///
/// Failures before the first fragment come back as a JSON error banner. Once streaming has
/// started, a failure is reported as a final `error` event after the fragments already sent.
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn ask_handler<F>(
    State(state): State<AppState<F>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    F: FileLoader + ?Sized + 'static,
{
    let credential = bearer_credential(&headers).map_err(AskError::from)?;
    let client = state.qa_service.validate(&credential).await?;

    let multipart = multipart.map_err(|rejection| {
        ApiError::new(
            rejection.status(),
            "invalid_request_error",
            format!("Error: {}", rejection.body_text()),
        )
    })?;

    let form = read_form(multipart, state.settings.extraction.max_file_size_bytes()).await?;
    let document = UploadedDocument::from_filename(form.filename, form.data.len() as u64)
        .map_err(AskError::from)?;

    tracing::debug!(
        filename = %document.filename,
        question = %sanitize_prompt(&form.question),
        "Processing question"
    );

    let prepared = state
        .qa_service
        .ask(&client, &document, &form.data, &form.question)
        .await?;

    let (sender, mut receiver) = mpsc::channel::<Event>(EVENT_BUFFER);
    let renderer = state.renderer;

    tokio::spawn(
        async move {
            let mut sink = SseSink { sender };
            let final_event = match renderer.render(prepared.stream, &mut sink).await {
                Ok(summary) => done_event(summary),
                Err(StreamError::SinkClosed { .. }) => return,
                Err(e) => error_event(ApiError::from(AskError::from(e))),
            };
            let _ = sink.sender.send(final_event).await;
        }
        .instrument(tracing::Span::current()),
    );

    let events = async_stream::stream! {
        while let Some(event) = receiver.recv().await {
            yield Ok::<_, Infallible>(event);
        }
    };

    let keep_alive = Duration::from_secs(state.settings.llm.sse_keep_alive_seconds);

    Ok(Sse::new(events)
        .keep_alive(KeepAlive::new().interval(keep_alive).text("keep-alive"))
        .into_response())
}
