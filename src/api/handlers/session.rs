use crate::{
    api::ApiState,
    auth::{AUTH_ENTRY_PATH, BackendError, user_id_from_jwt},
};
use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
}

#[utoipa::path(
    get,
    path= "/api/session",
    responses (
        (status = 200, description = "Session owner", body = Session),
        (status = 401, description = "No valid session, redirect to the auth screen"),
        (status = 500, description = "Hosted backend is not configured"),
        (status = 502, description = "Hosted backend is unreachable, redirect to the auth screen"),
    ),
    tag = "session",
)]
/// Resolve the bearer token to its owner through the hosted backend.
#[instrument(skip(state, headers))]
pub async fn session(Extension(state): Extension<Arc<ApiState>>, headers: HeaderMap) -> Response {
    let Some(backend) = state.backend.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Hosted backend is not configured." })),
        )
            .into_response();
    };

    let Some(token) = bearer_token(&headers) else {
        return redirect_to_auth(StatusCode::UNAUTHORIZED, "Missing session token.");
    };

    if user_id_from_jwt(token).is_none() {
        debug!("session token has no subject");
        return redirect_to_auth(StatusCode::UNAUTHORIZED, "Invalid session token.");
    }

    match backend.fetch_user(token).await {
        Ok(user) => (
            StatusCode::OK,
            Json(Session {
                user_id: user.id,
                email: user.email,
            }),
        )
            .into_response(),
        Err(BackendError::Unauthorized) => {
            redirect_to_auth(StatusCode::UNAUTHORIZED, "Session is no longer valid.")
        }
        Err(BackendError::Unavailable(_)) => {
            redirect_to_auth(StatusCode::BAD_GATEWAY, "Hosted backend is unreachable.")
        }
        Err(err) => {
            warn!("session lookup failed: {}", err);
            redirect_to_auth(StatusCode::BAD_GATEWAY, "Hosted backend is unreachable.")
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn redirect_to_auth(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": message, "redirect": AUTH_ENTRY_PATH })),
    )
        .into_response()
}
