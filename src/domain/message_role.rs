use serde::Serialize;

/// Sender of a chat message. Questions about a document are always sent as the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}
