use crate::{
    api::{self, ApiState},
    auth::BackendConfig,
    cli::telemetry,
    profile::{
        Platform,
        upstream::{ProfileSettings, ProviderSettings},
    },
};
use anyhow::Result;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub profiles: ProfileSettings,
    pub backend: Option<BackendConfig>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let state = ApiState::new(args.profiles, args.backend)?;

    let result = api::new(args.port, state).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let mut entries = vec![("listen", format!("tcp:{}", args.port))];

    for platform in Platform::ALL {
        let provider = args.profiles.for_platform(platform);
        entries.push((platform.key(), describe_provider(provider)));
    }

    entries.push((
        "backend",
        args.backend
            .as_ref()
            .map_or_else(|| "disabled".to_string(), |config| redact_url(&config.url)),
    ));

    log_entries("Startup configuration", &entries);
}

fn describe_provider(provider: &ProviderSettings) -> String {
    let credential = if provider.credential.is_some() {
        "set"
    } else {
        "missing"
    };
    format!("{} (credential {credential})", redact_url(&provider.base_url))
}

fn redact_url(url: &Url) -> String {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some("REDACTED"));
    }
    url.set_query(None);
    url.to_string()
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", cicada_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn cicada_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    CICADA_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed).to_string()
}

const CICADA_BANNER: &str = r"
    \  _  /
   __\(_)/__
  /  (   )  \   C I C A D A {VERSION}
 /___/ | \___\
      / \";
