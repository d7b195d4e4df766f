//! Axum middleware for the dev server.

pub mod allowed_hosts;
pub mod plugins;
