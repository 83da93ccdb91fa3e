use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &UploadedDocument,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.content_type.as_extension().to_string(),
            ));
        }

        let bytes = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| FileLoaderError::Decode(e.to_string()))
    }
}
