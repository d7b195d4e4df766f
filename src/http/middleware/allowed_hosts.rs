//! Host allow-list middleware.
//!
//! Rejects requests whose Host header is not covered by the configured
//! patterns. Runs before any other handling so a blocked request never
//! reaches the proxy or the asset service.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

pub async fn allowed_hosts_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let allowed = {
        let snapshot = state.runtime.load();
        snapshot.hosts.allows(&host)
    };

    if allowed {
        next.run(req).await
    } else {
        tracing::warn!(host = %host, "Blocked request from disallowed host");
        (
            StatusCode::FORBIDDEN,
            "Blocked request. This host is not allowed.",
        )
            .into_response()
    }
}
