//! Social profile lookups.
//!
//! [`upstream`] talks to the platform APIs on behalf of the proxy endpoints,
//! [`client`] calls those endpoints for the progress cards shown by the signup
//! wizard.

pub mod client;
pub mod upstream;

mod error;
pub use self::error::ProfileError;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Followers strictly above this are `High`.
const HIGH_ENGAGEMENT_FOLLOWERS: u64 = 10_000;
/// Followers strictly above this are `Medium`.
const MEDIUM_ENGAGEMENT_FOLLOWERS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Instagram,
    TikTok,
    Twitter,
}

impl Platform {
    pub const ALL: [Self; 3] = [Self::Instagram, Self::TikTok, Self::Twitter];

    /// Lowercase key used by the handle validator and in logs.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::TikTok => "tiktok",
            Self::Twitter => "twitter",
        }
    }

    /// Label used for the wizard step and the progress entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::Twitter => "Twitter",
        }
    }

    /// Path of the proxy endpoint serving this platform.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Instagram => "/api/instagramProfile",
            Self::TikTok => "/api/tiktokProfile",
            Self::Twitter => "/api/twitterProfile",
        }
    }

    /// Name of the server-side credential, as reported when it is missing.
    #[must_use]
    pub const fn credential_name(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram API Key",
            Self::TikTok => "TikTok API Key",
            Self::Twitter => "Twitter Bearer Token",
        }
    }

    /// Where a reseller manages the API keys for this platform.
    #[must_use]
    pub const fn developer_portal(self) -> &'static str {
        match self {
            Self::Instagram => "https://www.instagram.com/developer/",
            Self::TikTok => "https://developers.tiktok.com/",
            Self::Twitter => "https://developer.twitter.com/en/docs/twitter-api",
        }
    }

    /// Match a progress entry label (`"Instagram"`, `"TikTok"`, `"Twitter"`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.label() == label)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::TikTok),
            "twitter" => Ok(Self::Twitter),
            _ => Err(UnknownPlatform(value.to_string())),
        }
    }
}

#[derive(ToSchema, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

impl EngagementLevel {
    #[must_use]
    pub const fn from_followers(followers: u64) -> Self {
        if followers > HIGH_ENGAGEMENT_FOLLOWERS {
            Self::High
        } else if followers > MEDIUM_ENGAGEMENT_FOLLOWERS {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

/// Reshaped profile returned by the proxy endpoints.
#[derive(ToSchema, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub profile_pic_url: String,
    pub followers: u64,
    pub engagement_level: EngagementLevel,
}

impl ProfileData {
    #[must_use]
    pub fn new(profile_pic_url: String, followers: u64) -> Self {
        Self {
            profile_pic_url,
            followers,
            engagement_level: EngagementLevel::from_followers(followers),
        }
    }
}
