use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

use super::{PdfAdapter, PlainTextAdapter};

/// Routes each document to the adapter registered for its content type.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text and PDF, the two formats accepted for upload.
    pub fn standard(pdf_timeout: Duration) -> Self {
        let text_adapter: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let pdf_adapter: Arc<dyn FileLoader> = Arc::new(PdfAdapter::with_timeout(pdf_timeout));

        Self::new(vec![
            (ContentType::Text, text_adapter),
            (ContentType::Pdf, pdf_adapter),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(document.content_type.as_extension().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
