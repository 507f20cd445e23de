use clap::{Arg, Command};

pub const ARG_BACKEND_URL: &str = "backend-url";
pub const ARG_BACKEND_ANON_KEY: &str = "backend-anon-key";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BACKEND_URL)
                .long(ARG_BACKEND_URL)
                .help("Hosted backend base URL used to resolve sessions")
                .env("CICADA_BACKEND_URL")
                .requires(ARG_BACKEND_ANON_KEY)
                .value_parser(clap::value_parser!(url::Url)),
        )
        .arg(
            Arg::new(ARG_BACKEND_ANON_KEY)
                .long(ARG_BACKEND_ANON_KEY)
                .help("Hosted backend anonymous (public) key")
                .env("CICADA_BACKEND_ANON_KEY")
                .hide_env_values(true)
                .requires(ARG_BACKEND_URL),
        )
}
