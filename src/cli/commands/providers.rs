use crate::profile::upstream::{
    DEFAULT_INSTAGRAM_API_URL, DEFAULT_TIKTOK_API_URL, DEFAULT_TWITTER_API_URL,
};
use clap::{Arg, Command};

pub const ARG_INSTAGRAM_API_KEY: &str = "instagram-api-key";
pub const ARG_TIKTOK_API_KEY: &str = "tiktok-api-key";
pub const ARG_TWITTER_BEARER_TOKEN: &str = "twitter-bearer-token";
pub const ARG_INSTAGRAM_API_URL: &str = "instagram-api-url";
pub const ARG_TIKTOK_API_URL: &str = "tiktok-api-url";
pub const ARG_TWITTER_API_URL: &str = "twitter-api-url";

/// Platform credentials keep the variable names the deployment already uses,
/// without the `CICADA_` prefix.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_INSTAGRAM_API_KEY)
                .long(ARG_INSTAGRAM_API_KEY)
                .help("Instagram Graph API key")
                .env("INSTAGRAM_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_TIKTOK_API_KEY)
                .long(ARG_TIKTOK_API_KEY)
                .help("TikTok Open API key")
                .env("TIKTOK_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_TWITTER_BEARER_TOKEN)
                .long(ARG_TWITTER_BEARER_TOKEN)
                .help("Twitter API v2 bearer token")
                .env("TWITTER_BEARER_TOKEN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_INSTAGRAM_API_URL)
                .long(ARG_INSTAGRAM_API_URL)
                .help("Instagram Graph API base URL")
                .env("CICADA_INSTAGRAM_API_URL")
                .default_value(DEFAULT_INSTAGRAM_API_URL)
                .value_parser(clap::value_parser!(url::Url)),
        )
        .arg(
            Arg::new(ARG_TIKTOK_API_URL)
                .long(ARG_TIKTOK_API_URL)
                .help("TikTok Open API base URL")
                .env("CICADA_TIKTOK_API_URL")
                .default_value(DEFAULT_TIKTOK_API_URL)
                .value_parser(clap::value_parser!(url::Url)),
        )
        .arg(
            Arg::new(ARG_TWITTER_API_URL)
                .long(ARG_TWITTER_API_URL)
                .help("Twitter API base URL")
                .env("CICADA_TWITTER_API_URL")
                .default_value(DEFAULT_TWITTER_API_URL)
                .value_parser(clap::value_parser!(url::Url)),
        )
}
