//! Profile proxy endpoints, one per platform.

use crate::{
    api::ApiState,
    profile::{Platform, ProfileData, ProfileError, upstream},
};
use axum::{
    Json,
    extract::{Extension, Query},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::IntoParams;

#[derive(IntoParams, Debug, Deserialize, Default)]
#[into_params(parameter_in = Query)]
pub struct HandleArgs {
    /// Handle without the leading `@`
    handle: Option<String>,
}

type ProfileResponse = Result<Json<ProfileData>, ProfileError>;

#[utoipa::path(
    get,
    path= "/api/instagramProfile",
    params(HandleArgs),
    responses (
        (status = 200, description = "Instagram profile", body = ProfileData),
        (status = 400, description = "Missing handle"),
        (status = 500, description = "API key not configured or unexpected error"),
    ),
    tag = "profile",
)]
#[instrument(skip(state))]
pub async fn instagram_profile(
    Extension(state): Extension<Arc<ApiState>>,
    Query(args): Query<HandleArgs>,
) -> ProfileResponse {
    lookup(&state, Platform::Instagram, args).await
}

#[utoipa::path(
    get,
    path= "/api/tiktokProfile",
    params(HandleArgs),
    responses (
        (status = 200, description = "TikTok profile", body = ProfileData),
        (status = 400, description = "Missing handle"),
        (status = 500, description = "API key not configured or unexpected error"),
    ),
    tag = "profile",
)]
#[instrument(skip(state))]
pub async fn tiktok_profile(
    Extension(state): Extension<Arc<ApiState>>,
    Query(args): Query<HandleArgs>,
) -> ProfileResponse {
    lookup(&state, Platform::TikTok, args).await
}

#[utoipa::path(
    get,
    path= "/api/twitterProfile",
    params(HandleArgs),
    responses (
        (status = 200, description = "Twitter profile", body = ProfileData),
        (status = 400, description = "Missing handle"),
        (status = 500, description = "Bearer token not configured or unexpected error"),
    ),
    tag = "profile",
)]
#[instrument(skip(state))]
pub async fn twitter_profile(
    Extension(state): Extension<Arc<ApiState>>,
    Query(args): Query<HandleArgs>,
) -> ProfileResponse {
    lookup(&state, Platform::Twitter, args).await
}

async fn lookup(state: &ApiState, platform: Platform, args: HandleArgs) -> ProfileResponse {
    match upstream::lookup(&state.http, &state.profiles, platform, args.handle.as_deref()).await {
        Ok(profile) => Ok(Json(profile)),
        Err(err) => {
            if let ProfileError::Unexpected(source) = &err {
                error!("{} profile lookup failed: {:#}", platform, source);
            }
            Err(err)
        }
    }
}
