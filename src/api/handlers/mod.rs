pub mod health;
pub mod profile;
pub mod session;

// axum handler for /
pub async fn root() -> String {
    format!(
        "{} {} - {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}
