use crate::profile::Platform;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Handle is required.")]
    MissingHandle,
    #[error("{} is not configured.", .0.credential_name())]
    NotConfigured(Platform),
    /// The platform answered with a non-success status; status and body are proxied.
    #[error("upstream responded with {status}")]
    Upstream { status: StatusCode, body: Value },
    #[error("An unexpected error occurred.")]
    Unexpected(#[source] anyhow::Error),
}

impl ProfileError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHandle => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => json!({ "error": body }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<reqwest::Error> for ProfileError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unexpected(err.into())
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
