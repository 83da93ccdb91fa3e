mod ask_error;
mod credential_validator;
mod document_qa_service;
mod prompt_composer;
mod response_renderer;

pub use ask_error::{AskError, ErrorKind};
pub use credential_validator::{AuthenticationError, AuthorizedClient, CredentialValidator};
pub use document_qa_service::{DocumentQaService, PreparedAnswer};
pub use prompt_composer::PromptComposer;
pub use response_renderer::{RenderSummary, ResponseRenderer, StreamError};
