mod common;

use anyhow::Result;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use cicada::{
    api::{self, ApiState},
    auth::BackendConfig,
    profile::upstream::{ProfileSettings, ProviderSettings},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

fn token_for(sub: &str) -> String {
    let claims = json!({ "sub": sub, "role": "authenticated" });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature")
}

async fn current_user(headers: HeaderMap) -> Response {
    let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

    if header("apikey") != Some("anon-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "No API key" }))).into_response();
    }

    let expected = format!("Bearer {}", token_for("user-1"));
    if header("authorization") == Some(expected.as_str()) {
        Json(json!({
            "id": "user-1",
            "email": "reseller@cicada.test",
            "aud": "authenticated",
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response()
    }
}

async fn spawn_backend() -> Result<Url> {
    let router = Router::new().route("/auth/v1/user", get(current_user));

    common::serve(router).await
}

fn profiles() -> Result<ProfileSettings> {
    let unused = Url::parse("http://127.0.0.1:9/")?;
    Ok(ProfileSettings {
        instagram: ProviderSettings::new(unused.clone(), None),
        tiktok: ProviderSettings::new(unused.clone(), None),
        twitter: ProviderSettings::new(unused, None),
    })
}

async fn app() -> Result<Router> {
    let backend = BackendConfig {
        url: spawn_backend().await?,
        anon_key: SecretString::from("anon-key".to_string()),
    };
    let state = ApiState::new(profiles()?, Some(backend))?;
    Ok(api::app(Arc::new(state)))
}

async fn session(app: Router, authorization: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut request = Request::builder().uri("/api/session");
    if let Some(value) = authorization {
        request = request.header(AUTHORIZATION, value);
    }
    let response = app.oneshot(request.body(Body::empty())?).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
async fn valid_token_resolves_to_user() -> Result<()> {
    let bearer = format!("Bearer {}", token_for("user-1"));

    let (status, body) = session(app().await?, Some(&bearer)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "userId": "user-1", "email": "reseller@cicada.test" })
    );
    Ok(())
}

#[tokio::test]
async fn missing_token_redirects_to_auth() -> Result<()> {
    let (status, body) = session(app().await?, None).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "/auth");
    Ok(())
}

#[tokio::test]
async fn token_without_subject_never_reaches_backend() -> Result<()> {
    let (status, body) = session(app().await?, Some("Bearer not-a-jwt")).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid session token.");
    assert_eq!(body["redirect"], "/auth");
    Ok(())
}

#[tokio::test]
async fn rejected_token_redirects_to_auth() -> Result<()> {
    let bearer = format!("Bearer {}", token_for("someone-else"));

    let (status, body) = session(app().await?, Some(&bearer)).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session is no longer valid.");
    assert_eq!(body["redirect"], "/auth");
    Ok(())
}

#[tokio::test]
async fn session_needs_configured_backend() -> Result<()> {
    let state = ApiState::new(profiles()?, None)?;
    let bearer = format!("Bearer {}", token_for("user-1"));

    let (status, body) = session(api::app(Arc::new(state)), Some(&bearer)).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Hosted backend is not configured." }));
    Ok(())
}
