mod api_error;
mod ask;
mod credential;
mod credentials;
mod health;

pub use api_error::{ApiError, ErrorBody, ErrorResponse};
pub use ask::ask_handler;
pub use credential::bearer_credential;
pub use credentials::{ValidationResponse, validate_credential_handler};
pub use health::health_handler;
