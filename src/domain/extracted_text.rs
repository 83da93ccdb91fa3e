/// Plain text pulled out of an uploaded document. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the document contains no readable text")]
pub struct MissingDocumentError;

impl ExtractedText {
    pub fn new(text: String) -> Result<Self, MissingDocumentError> {
        if text.trim().is_empty() {
            return Err(MissingDocumentError);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
