use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported file type: {extension}")]
pub struct UnsupportedExtension {
    pub extension: String,
}

impl ContentType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Uses the text after the last `.`; a name without a dot is its own extension.
    pub fn from_filename(filename: &str) -> Result<Self, UnsupportedExtension> {
        let extension = filename.rsplit('.').next().unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| UnsupportedExtension {
            extension: extension.to_lowercase(),
        })
    }

    pub fn as_extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Text => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_extension())
    }
}

impl UploadedDocument {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }

    pub fn from_filename(filename: String, size_bytes: u64) -> Result<Self, UnsupportedExtension> {
        let content_type = ContentType::from_filename(&filename)?;
        Ok(Self::new(filename, content_type, size_bytes))
    }
}
