//! Authentication helpers around the hosted backend.

pub mod backend;
pub mod jwt;
pub mod validation;

pub use self::backend::{AUTH_ENTRY_PATH, BackendClient, BackendConfig, BackendError};
pub use self::jwt::user_id_from_jwt;
