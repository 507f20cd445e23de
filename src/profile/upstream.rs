//! Platform API calls behind the profile proxy endpoints.
//!
//! Every lookup is a single request: missing handle and missing credential are
//! rejected before any I/O, a non-success answer is handed back untouched and
//! anything else that goes wrong collapses into [`ProfileError::Unexpected`].

use crate::profile::{Platform, ProfileData, ProfileError};
use anyhow::anyhow;
use reqwest::{Client, RequestBuilder, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

pub const DEFAULT_INSTAGRAM_API_URL: &str = "https://graph.instagram.com";
pub const DEFAULT_TIKTOK_API_URL: &str = "https://open-api.tiktok.com";
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";

const INSTAGRAM_FIELDS: &str =
    "id,username,account_type,media_count,followers_count,profile_picture_url";
const TWITTER_USER_FIELDS: &str = "profile_image_url,public_metrics";

/// Where a platform lives and the credential used to call it.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: Url,
    pub credential: Option<SecretString>,
}

impl ProviderSettings {
    #[must_use]
    pub fn new(base_url: Url, credential: Option<SecretString>) -> Self {
        // an empty env var means "not configured", same as an absent one
        let credential = credential.filter(|secret| !secret.expose_secret().trim().is_empty());
        Self {
            base_url,
            credential,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileSettings {
    pub instagram: ProviderSettings,
    pub tiktok: ProviderSettings,
    pub twitter: ProviderSettings,
}

impl ProfileSettings {
    #[must_use]
    pub const fn for_platform(&self, platform: Platform) -> &ProviderSettings {
        match platform {
            Platform::Instagram => &self.instagram,
            Platform::TikTok => &self.tiktok,
            Platform::Twitter => &self.twitter,
        }
    }
}

#[derive(Deserialize)]
struct InstagramProfile {
    profile_picture_url: String,
    followers_count: u64,
}

#[derive(Deserialize)]
struct TikTokEnvelope {
    data: TikTokUser,
}

#[derive(Deserialize)]
struct TikTokUser {
    avatar_url: String,
    followers_count: u64,
}

#[derive(Deserialize)]
struct TwitterEnvelope {
    data: TwitterUser,
}

#[derive(Deserialize)]
struct TwitterUser {
    profile_image_url: String,
    public_metrics: TwitterMetrics,
}

#[derive(Deserialize)]
struct TwitterMetrics {
    followers_count: u64,
}

/// Look up `handle` on `platform` and reshape the answer.
///
/// # Errors
/// See [`ProfileError`] for the mapping of each failure to a response.
#[instrument(skip(client, settings))]
pub async fn lookup(
    client: &Client,
    settings: &ProfileSettings,
    platform: Platform,
    handle: Option<&str>,
) -> Result<ProfileData, ProfileError> {
    let handle = handle
        .filter(|handle| !handle.is_empty())
        .ok_or(ProfileError::MissingHandle)?;

    let provider = settings.for_platform(platform);
    let credential = provider
        .credential
        .as_ref()
        .ok_or(ProfileError::NotConfigured(platform))?;

    let request = build_request(
        client,
        platform,
        &provider.base_url,
        handle,
        credential.expose_secret(),
    )?;

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body: Value = response.json().await?;
        warn!("{} lookup for {} failed: {}", platform, handle, status);
        return Err(ProfileError::Upstream { status, body });
    }

    let bytes = response.bytes().await?;
    let profile = parse_profile(platform, &bytes)?;

    debug!(
        "{} lookup for {}: {} followers",
        platform, handle, profile.followers
    );

    Ok(profile)
}

fn build_request(
    client: &Client,
    platform: Platform,
    base_url: &Url,
    handle: &str,
    credential: &str,
) -> Result<RequestBuilder, ProfileError> {
    let mut url = base_url.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ProfileError::Unexpected(anyhow!("invalid base url: {base_url}")))?;
        segments.pop_if_empty();
        match platform {
            Platform::Instagram => {
                segments.push(handle);
            }
            Platform::TikTok => {
                segments.extend(["user", "info", ""]);
            }
            Platform::Twitter => {
                segments.extend(["2", "users", "by", "username", handle]);
            }
        }
    }

    let request = match platform {
        Platform::Instagram => {
            url.query_pairs_mut()
                .append_pair("fields", INSTAGRAM_FIELDS)
                .append_pair("access_token", credential);
            client.get(url)
        }
        Platform::TikTok => {
            url.query_pairs_mut()
                .append_pair("username", handle)
                .append_pair("access_token", credential);
            client.get(url)
        }
        Platform::Twitter => {
            url.query_pairs_mut()
                .append_pair("user.fields", TWITTER_USER_FIELDS);
            client
                .get(url)
                .header(AUTHORIZATION, format!("Bearer {credential}"))
        }
    };

    Ok(request)
}

fn parse_profile(platform: Platform, body: &[u8]) -> Result<ProfileData, ProfileError> {
    let unexpected = |err: serde_json::Error| {
        ProfileError::Unexpected(anyhow!("malformed {platform} profile: {err}"))
    };

    let (pic, followers) = match platform {
        Platform::Instagram => {
            let profile: InstagramProfile = serde_json::from_slice(body).map_err(unexpected)?;
            (profile.profile_picture_url, profile.followers_count)
        }
        Platform::TikTok => {
            let envelope: TikTokEnvelope = serde_json::from_slice(body).map_err(unexpected)?;
            (envelope.data.avatar_url, envelope.data.followers_count)
        }
        Platform::Twitter => {
            let envelope: TwitterEnvelope = serde_json::from_slice(body).map_err(unexpected)?;
            (
                envelope.data.profile_image_url,
                envelope.data.public_metrics.followers_count,
            )
        }
    };

    Ok(ProfileData::new(pic, followers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EngagementLevel;
    use anyhow::{Context, Result};
    use reqwest::StatusCode;

    fn settings(credential: Option<&str>) -> Result<ProfileSettings> {
        let provider = |base: &str| -> Result<ProviderSettings> {
            Ok(ProviderSettings::new(
                Url::parse(base)?,
                credential.map(|c| SecretString::from(c.to_string())),
            ))
        };
        Ok(ProfileSettings {
            instagram: provider(DEFAULT_INSTAGRAM_API_URL)?,
            tiktok: provider(DEFAULT_TIKTOK_API_URL)?,
            twitter: provider(DEFAULT_TWITTER_API_URL)?,
        })
    }

    fn request_url(platform: Platform, base: &str, handle: &str) -> Result<String> {
        let client = Client::new();
        let request = build_request(&client, platform, &Url::parse(base)?, handle, "secret")?
            .build()
            .context("request should build")?;
        Ok(request.url().to_string())
    }

    #[test]
    fn instagram_url_carries_fields_and_token() -> Result<()> {
        let url = request_url(Platform::Instagram, DEFAULT_INSTAGRAM_API_URL, "cicada.vpn")?;
        assert_eq!(
            url,
            "https://graph.instagram.com/cicada.vpn?fields=id%2Cusername%2Caccount_type%2Cmedia_count%2Cfollowers_count%2Cprofile_picture_url&access_token=secret"
        );
        Ok(())
    }

    #[test]
    fn tiktok_url_passes_username_as_query() -> Result<()> {
        let url = request_url(Platform::TikTok, DEFAULT_TIKTOK_API_URL, "cicada_vpn")?;
        assert_eq!(
            url,
            "https://open-api.tiktok.com/user/info/?username=cicada_vpn&access_token=secret"
        );
        Ok(())
    }

    #[test]
    fn twitter_uses_bearer_header() -> Result<()> {
        let client = Client::new();
        let request = build_request(
            &client,
            Platform::Twitter,
            &Url::parse(DEFAULT_TWITTER_API_URL)?,
            "jack",
            "token-123",
        )?
        .build()?;
        assert_eq!(
            request.url().as_str(),
            "https://api.twitter.com/2/users/by/username/jack?user.fields=profile_image_url%2Cpublic_metrics"
        );
        let auth = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(auth, Some("Bearer token-123"));
        Ok(())
    }

    #[test]
    fn handle_is_path_encoded() -> Result<()> {
        let url = request_url(Platform::Instagram, "http://127.0.0.1:9000/mock/", "a/b")?;
        assert!(url.starts_with("http://127.0.0.1:9000/mock/a%2Fb?"));
        Ok(())
    }

    #[test]
    fn parse_each_platform_shape() -> Result<()> {
        let instagram = parse_profile(
            Platform::Instagram,
            br#"{"id":"1","profile_picture_url":"https://ig/p.jpg","followers_count":15000}"#,
        )?;
        assert_eq!(instagram.profile_pic_url, "https://ig/p.jpg");
        assert_eq!(instagram.engagement_level, EngagementLevel::High);

        let tiktok = parse_profile(
            Platform::TikTok,
            br#"{"data":{"avatar_url":"https://tt/a.jpg","followers_count":1500}}"#,
        )?;
        assert_eq!(tiktok.followers, 1500);
        assert_eq!(tiktok.engagement_level, EngagementLevel::Medium);

        let twitter = parse_profile(
            Platform::Twitter,
            br#"{"data":{"profile_image_url":"https://tw/i.jpg","public_metrics":{"followers_count":12}}}"#,
        )?;
        assert_eq!(twitter.profile_pic_url, "https://tw/i.jpg");
        assert_eq!(twitter.engagement_level, EngagementLevel::Low);
        Ok(())
    }

    #[test]
    fn parse_rejects_missing_fields() {
        let result = parse_profile(Platform::Twitter, br#"{"data":{}}"#);
        assert!(matches!(result, Err(ProfileError::Unexpected(_))));
    }

    #[tokio::test]
    async fn lookup_requires_handle_before_credential() -> Result<()> {
        let client = Client::new();
        let settings = settings(None)?;

        let err = lookup(&client, &settings, Platform::Instagram, None).await.err();
        assert!(matches!(err, Some(ProfileError::MissingHandle)));

        let err = lookup(&client, &settings, Platform::Instagram, Some("")).await.err();
        assert!(matches!(err, Some(ProfileError::MissingHandle)));

        let err = lookup(&client, &settings, Platform::Twitter, Some("jack"))
            .await
            .err()
            .context("expected a configuration error")?;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Twitter Bearer Token is not configured.");
        Ok(())
    }

    #[test]
    fn blank_credential_counts_as_missing() -> Result<()> {
        let settings = settings(Some("  "))?;
        assert!(settings.for_platform(Platform::TikTok).credential.is_none());
        Ok(())
    }
}
