mod credential;
mod document;
mod extracted_text;
mod message;
mod message_role;

pub use credential::{Credential, MissingCredential};
pub use document::{ContentType, UnsupportedExtension, UploadedDocument};
pub use extracted_text::{ExtractedText, MissingDocumentError};
pub use message::Message;
pub use message_role::MessageRole;
