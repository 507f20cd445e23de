//! Client side of profile enrichment: the cards shown under each social handle
//! in the signup progress list.

use crate::{
    profile::{Platform, ProfileData},
    signup::ProgressEntry,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tokio::task::JoinSet;
use tracing::{debug, error, instrument};
use url::Url;

const FALLBACK_ERROR: &str = "Failed to fetch profile data";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct LookupError(pub String);

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<Value>,
}

/// Calls the proxy endpoints of a running cicada instance.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    base_url: Url,
    http: Client,
}

impl ProfileClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        let http = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;
        Ok(Self { base_url, http })
    }

    /// Fetch one profile card.
    ///
    /// # Errors
    /// Returns the proxy's `error` message, or a generic one when the proxy gave none.
    #[instrument(skip(self))]
    pub async fn fetch(&self, platform: Platform, handle: &str) -> Result<ProfileData, LookupError> {
        let mut url = self
            .base_url
            .join(platform.endpoint())
            .map_err(|err| LookupError(err.to_string()))?;
        url.query_pairs_mut().append_pair("handle", handle);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| LookupError(err.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map_or_else(|| FALLBACK_ERROR.to_string(), error_message);
            return Err(LookupError(message));
        }

        response
            .json::<ProfileData>()
            .await
            .map_err(|err| LookupError(err.to_string()))
    }

    /// Look up every social handle recorded in `entries`, concurrently.
    ///
    /// Skipped handles are ignored. Cards come back in completion order and a
    /// failed lookup only affects its own card.
    pub async fn enrich(&self, entries: &[ProgressEntry]) -> Vec<ProfileCard> {
        let mut lookups = JoinSet::new();

        for (platform, handle) in entries.iter().filter_map(ProgressEntry::social_handle) {
            let client = self.clone();
            let handle = handle.to_string();
            lookups.spawn(async move {
                let outcome = client.fetch(platform, &handle).await;
                ProfileCard {
                    platform,
                    handle,
                    outcome,
                }
            });
        }

        let mut cards = Vec::with_capacity(lookups.len());
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok(card) => {
                    debug!("{} card ready", card.platform);
                    cards.push(card);
                }
                Err(err) => error!("profile lookup task failed: {}", err),
            }
        }

        cards
    }
}

fn error_message(value: Value) -> String {
    match value {
        Value::String(message) => message,
        other => other.to_string(),
    }
}

/// One social profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub platform: Platform,
    pub handle: String,
    pub outcome: Result<ProfileData, LookupError>,
}

impl ProfileCard {
    #[must_use]
    pub const fn api_keys_link(&self) -> &'static str {
        self.platform.developer_portal()
    }
}

impl fmt::Display for ProfileCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(profile) => write!(
                f,
                "@{} Followers: {} Engagement: {}",
                self.handle, profile.followers, profile.engagement_level
            ),
            Err(err) => write!(f, "Error: {err}"),
        }
    }
}
