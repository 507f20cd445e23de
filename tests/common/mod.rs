//! Stand-ins for the platform APIs, shared by the integration tests.
#![allow(dead_code)]

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use cicada::profile::upstream::{ProfileSettings, ProviderSettings};
use secrecy::SecretString;
use serde_json::json;
use std::collections::HashMap;
use tokio::net::TcpListener;
use url::Url;

pub const INSTAGRAM_KEY: &str = "ig-key";
pub const TIKTOK_KEY: &str = "tt-key";
pub const TWITTER_TOKEN: &str = "tw-token";

async fn instagram_user(
    Path(handle): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("access_token").map(String::as_str) != Some(INSTAGRAM_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid OAuth access token" })),
        )
            .into_response();
    }

    match handle.as_str() {
        "cicada.vpn" => Json(json!({
            "id": "1789",
            "username": "cicada.vpn",
            "profile_picture_url": "https://cdn.instagram.test/cicada.jpg",
            "followers_count": 15000,
            "media_count": 12,
        }))
        .into_response(),
        "garbled" => Json(json!({ "username": "garbled" })).into_response(),
        "plaintext" => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "User not found" })),
        )
            .into_response(),
    }
}

async fn tiktok_user(Query(query): Query<HashMap<String, String>>) -> Response {
    let username = query.get("username").cloned().unwrap_or_default();
    Json(json!({
        "data": {
            "avatar_url": format!("https://cdn.tiktok.test/{username}.png"),
            "followers_count": 1001,
        }
    }))
    .into_response()
}

async fn twitter_user(Path(handle): Path<String>, headers: HeaderMap) -> Response {
    let expected = format!("Bearer {TWITTER_TOKEN}");
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "title": "Unauthorized" })),
        )
            .into_response();
    }

    Json(json!({
        "data": {
            "id": "42",
            "username": handle,
            "profile_image_url": "https://pbs.twimg.test/cicada.jpg",
            "public_metrics": { "followers_count": 10 },
        }
    }))
    .into_response()
}

/// Serve a stand-in for the three platform APIs and return its base URL.
pub async fn spawn_platforms() -> Result<Url> {
    let router = Router::new()
        .route("/ig/{handle}", get(instagram_user))
        .route("/tt/user/info/", get(tiktok_user))
        .route("/tw/2/users/by/username/{handle}", get(twitter_user));

    serve(router).await
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(Url::parse(&format!("http://{addr}/"))?)
}

pub fn secret(value: &str) -> Option<SecretString> {
    Some(SecretString::from(value.to_string()))
}

/// Settings pointing every platform at `base`, as served by [`spawn_platforms`].
pub fn profile_settings(
    base: &Url,
    twitter_token: Option<SecretString>,
) -> Result<ProfileSettings> {
    Ok(ProfileSettings {
        instagram: ProviderSettings::new(base.join("ig")?, secret(INSTAGRAM_KEY)),
        tiktok: ProviderSettings::new(base.join("tt")?, secret(TIKTOK_KEY)),
        twitter: ProviderSettings::new(base.join("tw")?, twitter_token),
    })
}
