use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts text from every page, in page order, and concatenates it.
pub struct PdfAdapter {
    timeout: Duration,
}

struct PageContent {
    page_number: u32,
    text: String,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    // The parsed document lives only inside this call.
    fn extract_pages(data: &[u8]) -> Result<Vec<PageContent>, FileLoaderError> {
        let doc = Document::load_mem(data).map_err(|e| FileLoaderError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(FileLoaderError::Parse(
                "encrypted PDF is not supported".to_string(),
            ));
        }

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());

        for page_number in page_numbers {
            let text = doc.extract_text(&[page_number]).map_err(|e| {
                FileLoaderError::Parse(format!("failed to read page {page_number}: {e}"))
            })?;
            pages.push(PageContent { page_number, text });
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(filename = %document.filename, size_bytes = document.size_bytes)
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedFormat(
                document.content_type.as_extension().to_string(),
            ));
        }

        let owned = data.to_vec();

        // A timed-out parse is abandoned, not cancelled: the blocking task runs to
        // completion in the background and only its result is dropped.
        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let page_count = pages.len();
        let mut text = String::new();
        for page in pages {
            tracing::trace!(
                page = page.page_number,
                characters = page.text.len(),
                "Page extracted"
            );
            text.push_str(&page.text);
        }

        tracing::info!(
            page_count,
            characters = text.len(),
            "PDF text extraction complete"
        );

        Ok(text)
    }
}
