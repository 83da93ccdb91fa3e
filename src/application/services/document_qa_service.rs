use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClientFactory, LlmTokenStream};
use crate::domain::{Credential, ExtractedText, Message, UploadedDocument};

use super::ask_error::AskError;
use super::credential_validator::{AuthorizedClient, CredentialValidator};
use super::prompt_composer::PromptComposer;

/// Runs one question against one document: extract, compose, request a streamed answer.
pub struct DocumentQaService<F>
where
    F: FileLoader + ?Sized,
{
    file_loader: Arc<F>,
    validator: CredentialValidator,
    composer: PromptComposer,
}

/// The composed request and the answer stream it produced, ready to be rendered.
pub struct PreparedAnswer {
    pub message: Message,
    pub stream: LlmTokenStream,
}

impl<F> DocumentQaService<F>
where
    F: FileLoader + ?Sized,
{
    pub fn new(file_loader: Arc<F>, client_factory: Arc<dyn LlmClientFactory>) -> Self {
        Self {
            file_loader,
            validator: CredentialValidator::new(client_factory),
            composer: PromptComposer::new(),
        }
    }

    pub async fn validate(&self, credential: &Credential) -> Result<AuthorizedClient, AskError> {
        Ok(self.validator.validate(credential).await?)
    }

    #[tracing::instrument(
        skip(self, data, document),
        fields(filename = %document.filename, content_type = %document.content_type)
    )]
    pub async fn extract(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<ExtractedText, AskError> {
        let raw = self.file_loader.extract_text(data, document).await?;
        let text = ExtractedText::new(raw).inspect_err(|_| {
            tracing::warn!("Document produced no readable text");
        })?;

        tracing::debug!(characters = text.as_str().len(), "Document text extracted");

        Ok(text)
    }

    /// Blank questions are rejected before the document is touched.
    pub async fn ask(
        &self,
        client: &AuthorizedClient,
        document: &UploadedDocument,
        data: &[u8],
        question: &str,
    ) -> Result<PreparedAnswer, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::MissingQuestion);
        }

        let text = self.extract(data, document).await?;
        let message = self.composer.compose(&text, question);

        let stream = client
            .client()
            .complete_stream(std::slice::from_ref(&message))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Completion request failed");
                AskError::Completion(e)
            })?;

        Ok(PreparedAnswer { message, stream })
    }
}
