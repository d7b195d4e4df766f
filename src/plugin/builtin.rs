//! Built-in plugins.

use axum::body::Body;
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::http::{Request, Response};

use crate::plugin::Plugin;

/// Logs every request at debug level.
#[derive(Debug)]
pub struct RequestLogger;

impl Plugin for RequestLogger {
    fn name(&self) -> &'static str {
        "request-logger"
    }

    fn on_request(&self, req: &Request<Body>) {
        tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            "Request received"
        );
    }
}

/// Marks every response as uncacheable, which keeps browsers from holding on
/// to stale assets during development.
#[derive(Debug)]
pub struct DevHeaders;

impl Plugin for DevHeaders {
    fn name(&self) -> &'static str {
        "dev-headers"
    }

    fn on_response(&self, res: &mut Response<Body>) {
        res.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
}
