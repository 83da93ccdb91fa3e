use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError, LlmClientFactory};
use crate::domain::Credential;

/// Confirms a credential against the remote service before any document work starts.
///
/// A single `list_models` round-trip is made per call. Failures are returned as-is;
/// retrying is left to the caller.
pub struct CredentialValidator {
    client_factory: Arc<dyn LlmClientFactory>,
}

/// Client handle whose credential passed validation.
#[derive(Clone)]
pub struct AuthorizedClient {
    client: Arc<dyn LlmClient>,
    model_count: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("API key could not be validated: {source}")]
pub struct AuthenticationError {
    #[source]
    pub source: LlmClientError,
}

impl CredentialValidator {
    pub fn new(client_factory: Arc<dyn LlmClientFactory>) -> Self {
        Self { client_factory }
    }

    #[tracing::instrument(skip(self, credential), fields(credential = %credential))]
    pub async fn validate(
        &self,
        credential: &Credential,
    ) -> Result<AuthorizedClient, AuthenticationError> {
        let client = self.client_factory.create(credential);

        let models = client.list_models().await.map_err(|source| {
            tracing::warn!(error = %source, "Credential validation failed");
            AuthenticationError { source }
        })?;

        tracing::info!(model_count = models.len(), "Credential validated");

        Ok(AuthorizedClient {
            client,
            model_count: models.len(),
        })
    }
}

impl AuthorizedClient {
    pub fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    pub fn model_count(&self) -> usize {
        self.model_count
    }
}
