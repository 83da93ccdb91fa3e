mod file_loader;
mod fragment_sink;
mod llm_client;

pub use file_loader::{FileLoader, FileLoaderError};
pub use fragment_sink::{FragmentSink, SinkClosed};
pub use llm_client::{LlmClient, LlmClientError, LlmClientFactory, LlmTokenStream};
