use crate::domain::{ExtractedText, Message, MissingDocumentError};

const DOCUMENT_PREFIX: &str = "Here's a document: ";
const QUESTION_SEPARATOR: &str = " \n\n---\n\n ";

/// Turns a document and a question into the single user message sent upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, document: &ExtractedText, question: &str) -> Message {
        let content = format!(
            "{DOCUMENT_PREFIX}{}{QUESTION_SEPARATOR}{question}",
            document.as_str()
        );

        Message::user(content)
    }

    pub fn compose_from(
        &self,
        raw_text: String,
        question: &str,
    ) -> Result<Message, MissingDocumentError> {
        let document = ExtractedText::new(raw_text)?;
        Ok(self.compose(&document, question))
    }
}
