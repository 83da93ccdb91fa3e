use std::fmt;

use crate::application::ports::{FileLoaderError, LlmClientError};
use crate::domain::{MissingCredential, MissingDocumentError, UnsupportedExtension};

use super::credential_validator::AuthenticationError;
use super::response_renderer::StreamError;

/// Any failure in the document question flow.
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("Please add your OpenAI API key to continue.")]
    MissingCredential(#[from] MissingCredential),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error(transparent)]
    UnsupportedExtension(#[from] UnsupportedExtension),
    #[error(transparent)]
    Extraction(#[from] FileLoaderError),
    #[error(transparent)]
    MissingDocument(#[from] MissingDocumentError),
    #[error("Now ask a question about the document!")]
    MissingQuestion,
    #[error("completion request failed: {0}")]
    Completion(LlmClientError),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Coarse failure category shown alongside the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    Parse,
    UnsupportedFormat,
    Extraction,
    Authentication,
    MissingCredential,
    MissingDocument,
    MissingQuestion,
    Completion,
    Stream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode_error",
            ErrorKind::Parse => "parse_error",
            ErrorKind::UnsupportedFormat => "unsupported_format_error",
            ErrorKind::Extraction => "extraction_error",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::MissingDocument => "missing_document_error",
            ErrorKind::MissingQuestion => "missing_question",
            ErrorKind::Completion => "completion_error",
            ErrorKind::Stream => "stream_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AskError::MissingCredential(_) => ErrorKind::MissingCredential,
            AskError::Authentication(_) => ErrorKind::Authentication,
            AskError::UnsupportedExtension(_) => ErrorKind::UnsupportedFormat,
            AskError::Extraction(FileLoaderError::Decode(_)) => ErrorKind::Decode,
            AskError::Extraction(FileLoaderError::Parse(_)) => ErrorKind::Parse,
            AskError::Extraction(FileLoaderError::UnsupportedFormat(_)) => {
                ErrorKind::UnsupportedFormat
            }
            AskError::Extraction(FileLoaderError::ExtractionFailed(_)) => ErrorKind::Extraction,
            AskError::MissingDocument(_) => ErrorKind::MissingDocument,
            AskError::MissingQuestion => ErrorKind::MissingQuestion,
            AskError::Completion(_) => ErrorKind::Completion,
            AskError::Stream(_) => ErrorKind::Stream,
        }
    }
}
