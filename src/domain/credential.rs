use std::fmt;

/// API key for the remote chat-completion service.
///
/// Never blank once constructed. `Debug` and `Display` do not reveal the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no API key supplied")]
pub struct MissingCredential;

impl Credential {
    pub fn parse(raw: &str) -> Result<Self, MissingCredential> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MissingCredential);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short non-reversible hint for logs, e.g. `sk-...3xyz`.
    pub fn hint(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let prefix: String = chars[..3].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.hint()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hint())
    }
}
