// Path: crates/global-state-gateway/src/server.rs

use crate::error::AppError;
use crate::metrics;
use crate::service::GlobalStateService;
use crate::writer::write_json;
use agora_types::config::GatewayConfig;
use agora_types::error::GlobalStateError;
use anyhow::Result;
use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration, time::Instant};
use tokio::sync::watch;
use tower::{
    limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, BoxError,
    ServiceBuilder,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub const VERIFIED_USERNAMES_ROUTE: &str = "/api/v0/get-verified-username-map";
pub const BLACKLIST_ROUTE: &str = "/api/v0/get-blacklisted-public-keys";
pub const GRAYLIST_ROUTE: &str = "/api/v0/get-graylisted-public-keys";
pub const GLOBAL_FEED_ROUTE: &str = "/api/v0/get-global-feed";

type SharedService = Arc<GlobalStateService>;

fn finish(
    service: &GlobalStateService,
    operation: &'static str,
    route: &'static str,
    started: Instant,
    result: Result<Response, GlobalStateError>,
) -> Response {
    metrics::observe(route, result.is_ok(), started);
    match result {
        Ok(resp) => resp,
        Err(e) => AppError::new(operation, e, service.snapshot_status()).into_response(),
    }
}

async fn verified_username_map_handler(State(service): State<SharedService>) -> Response {
    let started = Instant::now();
    let result = service
        .verified_username_map()
        .and_then(|registry| write_json(registry.as_ref()));
    finish(
        &service,
        "GetVerifiedUsernameMap",
        VERIFIED_USERNAMES_ROUTE,
        started,
        result,
    )
}

async fn blacklisted_public_keys_handler(State(service): State<SharedService>) -> Response {
    let started = Instant::now();
    let result = service
        .blacklisted_public_keys()
        .and_then(|keys| write_json(&keys));
    finish(
        &service,
        "GetBlacklistedPublicKeys",
        BLACKLIST_ROUTE,
        started,
        result,
    )
}

async fn graylisted_public_keys_handler(State(service): State<SharedService>) -> Response {
    let started = Instant::now();
    let result = service
        .graylisted_public_keys()
        .and_then(|keys| write_json(&keys));
    finish(
        &service,
        "GetGraylistedPublicKeys",
        GRAYLIST_ROUTE,
        started,
        result,
    )
}

// Takes the raw body: decoding waits until the exposure gate has passed.
async fn global_feed_handler(State(service): State<SharedService>, body: Body) -> Response {
    let started = Instant::now();
    let result = service.global_feed(body).await.and_then(|page| {
        metrics::feed_items_returned(page.len());
        write_json(&page)
    });
    finish(&service, "GetGlobalFeed", GLOBAL_FEED_ROUTE, started, result)
}

async fn map_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(serde_json::json!({
                "error": { "code": "TIMEOUT", "message": "request timed out" }
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": { "code": "OVERLOADED", "message": err.to_string() }
            })),
        )
    }
}

/// Builds the gateway application: the four operations plus the telemetry
/// endpoints, wrapped in the transport layers.
pub fn router(config: &GatewayConfig, service: GlobalStateService) -> Router {
    metrics::install();

    let ops = Router::new()
        .route(
            VERIFIED_USERNAMES_ROUTE,
            get(verified_username_map_handler).post(verified_username_map_handler),
        )
        .route(
            BLACKLIST_ROUTE,
            get(blacklisted_public_keys_handler).post(blacklisted_public_keys_handler),
        )
        .route(
            GRAYLIST_ROUTE,
            get(graylisted_public_keys_handler).post(graylisted_public_keys_handler),
        )
        .route(GLOBAL_FEED_ROUTE, post(global_feed_handler))
        .with_state(Arc::new(service));

    ops.merge(agora_telemetry::http::router())
        // `HandleErrorLayer` must wrap the fallible layers to make the service infallible.
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(map_middleware_error))
                .layer(LoadShedLayer::new())
                .layer(ConcurrencyLimitLayer::new(config.concurrency_limit.max(1)))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs.max(1),
                ))),
        )
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Serves the gateway until `shutdown_rx` changes.
pub async fn run_server(
    config: GatewayConfig,
    service: GlobalStateService,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    let app = router(&config, service);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        target: "gateway",
        %addr,
        exposed = config.expose_global_state,
        network = ?config.network,
        "global-state gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.changed().await.ok();
            tracing::info!(target: "gateway", "shutting down gracefully");
        })
        .await?;

    Ok(())
}
