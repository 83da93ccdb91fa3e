use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError, LlmClientFactory, LlmTokenStream};
use crate::domain::{Credential, Message};
use crate::presentation::config::LlmSettings;

use super::sse_decoder::SseDecoder;

/// Chat-completion client for an OpenAI-compatible API, bound to one API key.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    request_timeout: Duration,
}

/// Hands out [`OpenAiClient`]s that share one connection pool.
pub struct OpenAiClientFactory {
    client: Client,
    base_url: String,
    model: String,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: String,
        model: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            request_timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LlmClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LlmClientError::Unauthorized(format!("HTTP {}: {}", status, detail))
            }
            StatusCode::TOO_MANY_REQUESTS => LlmClientError::RateLimited,
            _ => LlmClientError::ApiRequestFailed(format!("HTTP {}: {}", status, detail)),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_models(&self) -> Result<Vec<String>, LlmClientError> {
        let request = self
            .client
            .get(format!("{}/models", self.base_url))
            .timeout(self.request_timeout);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let models: ModelsResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        Ok(models.data.into_iter().map(|m| m.id).collect())
    }

    #[tracing::instrument(
        skip(self, messages),
        fields(model = %self.model, messages = messages.len())
    )]
    async fn complete_stream(
        &self,
        messages: &[Message],
    ) -> Result<LlmTokenStream, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            stream: true,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let mut bytes = Self::check_status(response).await?.bytes_stream();

        let token_stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut failed = false;

            'read: while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(chunk) => {
                        for item in decoder.push(&chunk) {
                            failed = item.is_err();
                            yield item;
                            if failed {
                                break 'read;
                            }
                        }
                        if decoder.is_done() {
                            break 'read;
                        }
                    }
                    Err(e) => {
                        failed = true;
                        yield Err(LlmClientError::StreamInterrupted(e.to_string()));
                        break 'read;
                    }
                }
            }

            if !failed {
                for item in decoder.finish() {
                    yield item;
                }
            }
        };

        Ok(Box::pin(token_stream))
    }
}

impl OpenAiClientFactory {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url,
            model,
            request_timeout,
        }
    }

    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmClientError> {
        let request_timeout = Duration::from_secs(settings.request_timeout_seconds);
        let client = Client::builder()
            .connect_timeout(request_timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        Ok(Self::new(
            client,
            settings.base_url.clone(),
            settings.chat_model.clone(),
            request_timeout,
        ))
    }
}

impl LlmClientFactory for OpenAiClientFactory {
    fn create(&self, credential: &Credential) -> Arc<dyn LlmClient> {
        Arc::new(OpenAiClient::new(
            self.client.clone(),
            &self.base_url,
            credential.expose().to_string(),
            self.model.clone(),
            self.request_timeout,
        ))
    }
}
