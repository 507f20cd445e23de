//! Hosted backend-as-a-service client.
//!
//! The backend owns users, sessions, accounts and devices. Only the session
//! lookup is needed server side: given an access token, who is it?

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, instrument};
use url::Url;

/// Where unauthenticated users are sent.
pub const AUTH_ENTRY_PATH: &str = "/auth";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: SecretString,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("session is not valid")]
    Unauthorized,
    #[error("backend is unreachable")]
    Unavailable(#[source] reqwest::Error),
    #[error("unexpected backend response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    #[must_use]
    pub const fn new(config: BackendConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Resolve the user owning `access_token`.
    ///
    /// # Errors
    /// [`BackendError::Unauthorized`] when the backend rejects the token,
    /// [`BackendError::Unavailable`] on network failures.
    #[instrument(skip_all)]
    pub async fn fetch_user(&self, access_token: &str) -> Result<BackendUser, BackendError> {
        let url = self
            .config
            .url
            .join("auth/v1/user")
            .map_err(|err| BackendError::Unexpected(err.to_string()))?;

        let response = self
            .http
            .get(url)
            .header("apikey", self.config.anon_key.expose_secret())
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|err| {
                error!("Error reaching hosted backend: {:?}", err);
                BackendError::Unavailable(err)
            })?;

        match response.status() {
            status if status.is_success() => response
                .json::<BackendUser>()
                .await
                .map_err(|err| BackendError::Unexpected(err.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            status => Err(BackendError::Unexpected(status.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn debug_redacts_anon_key() -> Result<()> {
        let config = BackendConfig {
            url: Url::parse("https://project.supabase.co/")?,
            anon_key: SecretString::from("anon-key-value".to_string()),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("anon-key-value"));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() -> Result<()> {
        // grab a free port and release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let client = BackendClient::new(
            BackendConfig {
                url: Url::parse(&format!("http://127.0.0.1:{port}/"))?,
                anon_key: SecretString::from("anon".to_string()),
            },
            Client::new(),
        );
        let err = client.fetch_user("token").await.err();
        assert!(matches!(err, Some(BackendError::Unavailable(_))));
        Ok(())
    }
}
