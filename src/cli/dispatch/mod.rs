use crate::{
    auth::BackendConfig,
    cli::{
        actions::{Action, server::Args},
        commands::{backend, providers},
    },
    profile::upstream::{ProfileSettings, ProviderSettings},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let provider = |url_arg: &str, credential_arg: &str| -> Result<ProviderSettings> {
        let base_url = matches
            .get_one::<Url>(url_arg)
            .cloned()
            .with_context(|| format!("missing required argument: --{url_arg}"))?;
        let credential = matches
            .get_one::<String>(credential_arg)
            .cloned()
            .map(SecretString::from);
        Ok(ProviderSettings::new(base_url, credential))
    };

    let profiles = ProfileSettings {
        instagram: provider(
            providers::ARG_INSTAGRAM_API_URL,
            providers::ARG_INSTAGRAM_API_KEY,
        )?,
        tiktok: provider(providers::ARG_TIKTOK_API_URL, providers::ARG_TIKTOK_API_KEY)?,
        twitter: provider(
            providers::ARG_TWITTER_API_URL,
            providers::ARG_TWITTER_BEARER_TOKEN,
        )?,
    };

    let backend = backend_config(
        matches.get_one::<Url>(backend::ARG_BACKEND_URL).cloned(),
        matches
            .get_one::<String>(backend::ARG_BACKEND_ANON_KEY)
            .cloned(),
    )?;

    Ok(Action::Server(Args {
        port,
        profiles,
        backend,
    }))
}

fn backend_config(url: Option<Url>, anon_key: Option<String>) -> Result<Option<BackendConfig>> {
    match (url, anon_key) {
        (None, None) => Ok(None),
        (Some(mut url), Some(anon_key)) => {
            // Url::join drops the last segment unless the path ends with '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Some(BackendConfig {
                url,
                anon_key: SecretString::from(anon_key),
            }))
        }
        (Some(_), None) => {
            anyhow::bail!("missing required argument: --{}", backend::ARG_BACKEND_ANON_KEY)
        }
        (None, Some(_)) => {
            anyhow::bail!("missing required argument: --{}", backend::ARG_BACKEND_URL)
        }
    }
}
