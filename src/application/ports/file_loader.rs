use async_trait::async_trait;

use crate::domain::UploadedDocument;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("could not decode text: {0}")]
    Decode(String),
    #[error("could not parse PDF: {0}")]
    Parse(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
