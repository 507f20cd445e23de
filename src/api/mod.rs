use crate::{
    api::handlers::{health, profile, session},
    auth::{BackendClient, BackendConfig},
    profile::upstream::ProfileSettings,
};
use anyhow::Result;
use axum::{
    Extension, Json, Router,
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::{get, options},
};
use reqwest::Client;
use std::{
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

pub mod handlers;

/// Shared by every handler through an `Extension` layer.
#[derive(Debug)]
pub struct ApiState {
    pub http: Client,
    pub profiles: ProfileSettings,
    pub backend: Option<BackendClient>,
}

impl ApiState {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(profiles: ProfileSettings, backend: Option<BackendConfig>) -> Result<Self> {
        let http = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;
        let backend = backend.map(|config| BackendClient::new(config, http.clone()));

        Ok(Self {
            http,
            profiles,
            backend,
        })
    }
}

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and documented.
fn api_router() -> OpenApiRouter {
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    let mut router = OpenApiRouter::with_openapi(OpenApiBuilder::new().info(info).build())
        .routes(routes!(health::health))
        .routes(routes!(profile::instagram_profile))
        .routes(routes!(profile::tiktok_profile))
        .routes(routes!(profile::twitter_profile))
        .routes(routes!(session::session));

    let mut profile_tag = Tag::new("profile");
    profile_tag.description = Some("Social profile enrichment proxy".to_string());
    let mut session_tag = Tag::new("session");
    session_tag.description = Some("Hosted backend session lookup".to_string());
    router.get_openapi_mut().tags = Some(vec![profile_tag, session_tag]);

    router
}

/// The full application with middleware, ready to serve.
pub fn app(state: Arc<ApiState>) -> Router {
    let (router, openapi) = api_router().split_for_parts();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    router
        .route("/", get(handlers::root))
        .route("/health", options(health::health))
        .route(
            "/openapi.json",
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(state)),
        )
}

/// Serve until Ctrl-C or SIGTERM.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn new(port: u16, state: ApiState) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = TcpListener::bind(SocketAddr::from((Ipv6Addr::UNSPECIFIED, port))).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}
