//! Plugin hook middleware.
//!
//! Drives the plugin registry around each request: request hooks before the
//! handler, response hooks after it.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;

pub async fn plugin_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    state.plugins.on_request(&req);
    let mut res = next.run(req).await;
    state.plugins.on_response(&mut res);
    res
}
