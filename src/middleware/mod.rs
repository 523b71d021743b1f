mod auth;
mod error_handler;
mod extract;

pub use auth::{Identity, authorize, optional_auth, require_auth};
pub use error_handler::log_errors;
pub use extract::{ValidJson, ValidPath};
