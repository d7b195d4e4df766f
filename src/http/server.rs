//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (host allow list, plugins, tracing, timeout,
//!   request ID)
//! - Dispatch requests: proxy rules first, static assets as fallback
//! - Forward matched requests to the configured upstream origin
//! - Observability (metrics, request IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode, Uri, Version},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DevServerConfig;
use crate::http::assets::{asset_service, AssetService};
use crate::http::middleware::allowed_hosts::allowed_hosts_middleware;
use crate::http::middleware::plugins::plugin_middleware;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::plugin::{PluginRegistry, UnknownPlugin};
use crate::routing::{CompiledRule, ProxyRouter, RouterError};
use crate::security::HostFilter;

/// The reloadable slice of the configuration, compiled for request handling.
///
/// Swapped atomically on config reload; request handlers read a consistent
/// snapshot per request.
#[derive(Debug)]
pub struct RuntimeState {
    pub router: ProxyRouter,
    pub hosts: HostFilter,
}

impl RuntimeState {
    /// Compile the reloadable parts of a configuration.
    pub fn from_config(config: &DevServerConfig) -> Result<Self, RouterError> {
        Ok(Self {
            router: ProxyRouter::from_config(&config.server.proxy)?,
            hosts: HostFilter::from_patterns(&config.server.allowed_hosts),
        })
    }
}

/// Error constructing the server from a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Plugin(#[from] UnknownPlugin),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ArcSwap<RuntimeState>>,
    pub client: Client<HttpConnector, Body>,
    pub plugins: Arc<PluginRegistry>,
    pub assets: AssetService,
}

/// The development HTTP server.
pub struct DevServer {
    router: Router,
    config: DevServerConfig,
    runtime: Arc<ArcSwap<RuntimeState>>,
}

impl DevServer {
    /// Create a new server from a validated configuration.
    pub fn new(config: DevServerConfig) -> Result<Self, ServerError> {
        let runtime = Arc::new(ArcSwap::from_pointee(RuntimeState::from_config(&config)?));
        let plugins = Arc::new(PluginRegistry::from_names(&config.plugins)?);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            runtime: runtime.clone(),
            client,
            plugins,
            assets: asset_service(&config.root),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            runtime,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &DevServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                plugin_middleware,
            ))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                allowed_hosts_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Handle to the reloadable runtime snapshot, for the reload task.
    pub fn runtime(&self) -> Arc<ArcSwap<RuntimeState>> {
        self.runtime.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DevServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.root.display(),
            "Dev server listening"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }
}

/// Main dispatch handler: proxy rules first, static assets otherwise.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let path = request.uri().path().to_string();

    let snapshot = state.runtime.load_full();
    match snapshot.router.match_path(&path) {
        Some(rule) => proxy_request(&state, rule, request, start).await,
        None => serve_asset(&state, request, start).await,
    }
}

/// Forward a request to the rule's upstream origin.
async fn proxy_request(
    state: &AppState,
    rule: &CompiledRule,
    request: Request<Body>,
    start: Instant,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let method = parts.method.to_string();

    let forwarded_path = rule.forwarded_path(parts.uri.path());
    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{forwarded_path}?{query}"),
        None => forwarded_path,
    };

    let uri = match Uri::builder()
        .scheme(rule.scheme.as_str())
        .authority(rule.authority.as_str())
        .path_and_query(path_and_query)
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, upstream = %rule.authority, "Failed to build upstream URI");
            metrics::record_request(&method, 500, &rule.authority, start);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid upstream URI").into_response();
        }
    };

    tracing::debug!(
        path = %parts.uri.path(),
        upstream = %uri,
        "Proxying request"
    );

    parts.uri = uri;
    // Upstream connection is plain HTTP/1.1 regardless of the inbound version.
    parts.version = Version::HTTP_11;

    if rule.change_origin {
        match HeaderValue::from_str(&rule.authority) {
            Ok(value) => {
                parts.headers.insert(header::HOST, value);
            }
            Err(e) => {
                tracing::warn!(error = %e, authority = %rule.authority, "Invalid upstream authority for Host header");
            }
        }
    }

    let result: Result<Response<Incoming>, _> =
        state.client.request(Request::from_parts(parts, body)).await;

    match result {
        Ok(response) => {
            let status = response.status().as_u16();
            metrics::record_request(&method, status, &rule.authority, start);
            response.map(Body::new).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, upstream = %rule.authority, "Upstream request failed");
            metrics::record_request(&method, 502, &rule.authority, start);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Serve a request from the static asset root.
async fn serve_asset(state: &AppState, request: Request<Body>, start: Instant) -> Response {
    let method = request.method().to_string();
    match state.assets.clone().oneshot(request).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), "static", start);
            response.map(Body::new).into_response()
        }
        Err(infallible) => match infallible {},
    }
}
