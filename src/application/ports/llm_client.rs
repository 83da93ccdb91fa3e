use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::domain::{Credential, Message};

/// Fragments of a streamed completion in arrival order. Finite and single-pass.
pub type LlmTokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmClientError>> + Send>>;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Identifiers of the models the credential can use.
    async fn list_models(&self) -> Result<Vec<String>, LlmClientError>;

    async fn complete_stream(
        &self,
        messages: &[Message],
    ) -> Result<LlmTokenStream, LlmClientError>;
}

/// Builds clients bound to a single credential.
pub trait LlmClientFactory: Send + Sync {
    fn create(&self, credential: &Credential) -> Arc<dyn LlmClient>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),
}
