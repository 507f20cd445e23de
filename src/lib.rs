//! # Cicada (Private Label Onboarding)
//!
//! `cicada` backs the CicadaVPN private label site: resellers sign up through a
//! short onboarding wizard, name their brand, upload a logo and link their
//! social accounts, then land on their dashboard.
//!
//! ## Signup Wizard
//!
//! The wizard in [`signup`] is a pure state machine. A heading types itself out,
//! the steps are answered one at a time and validated synchronously, and a
//! fixed-length transition ends in a navigation to `/dashboard`. All timers are
//! elapsed-time inputs to [`signup::Wizard::tick`], so dropping the wizard drops
//! every pending timer with it.
//!
//! ## Profile Enrichment
//!
//! Social handles collected by the wizard are looked up through three proxy
//! endpoints (`/api/instagramProfile`, `/api/tiktokProfile`,
//! `/api/twitterProfile`). Each one calls the platform API with a server-side
//! credential and reshapes the answer into `{profilePicUrl, followers,
//! engagementLevel}`. Lookups fail fast: no retries, no caching.
//!
//! ## Hosted Backend
//!
//! Users, sessions, accounts and devices live in a hosted backend-as-a-service.
//! [`auth`] only validates credentials locally and asks the backend who owns a
//! session token.

pub mod api;
pub mod auth;
pub mod cli;
pub mod profile;
pub mod signup;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
