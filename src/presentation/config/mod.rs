mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{ExtractionSettings, LlmSettings, LoggingSettings, ServerSettings, Settings};
