//! Plugin registry.
//!
//! Plugins are opaque handles named in the configuration. The registry
//! resolves each name to a built-in implementation and preserves declaration
//! order: `on_request` hooks run in declared order, `on_response` hooks in
//! reverse, so later plugins wrap earlier ones.

mod builtin;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::plugin::builtin::{DevHeaders, RequestLogger};

/// A request/response observer activated by name from the configuration.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Stable name used in the `plugins` config list.
    fn name(&self) -> &'static str;

    /// Observe an incoming request before it is handled.
    fn on_request(&self, _req: &Request<Body>) {}

    /// Observe (and possibly amend) an outgoing response.
    fn on_response(&self, _res: &mut Response<Body>) {}
}

/// Names the registry can resolve.
const KNOWN_PLUGINS: &[&str] = &["request-logger", "dev-headers"];

/// Whether `name` refers to a built-in plugin.
pub fn is_known(name: &str) -> bool {
    KNOWN_PLUGINS.contains(&name)
}

/// Error resolving a plugin name.
#[derive(Debug, thiserror::Error)]
#[error("unknown plugin {0:?}")]
pub struct UnknownPlugin(pub String);

/// Ordered collection of active plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Resolve configured names into plugin handles, preserving order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownPlugin> {
        let mut plugins: Vec<Box<dyn Plugin>> = Vec::with_capacity(names.len());
        for name in names {
            let plugin: Box<dyn Plugin> = match name.as_ref() {
                "request-logger" => Box::new(RequestLogger),
                "dev-headers" => Box::new(DevHeaders),
                other => return Err(UnknownPlugin(other.to_string())),
            };
            plugins.push(plugin);
        }
        Ok(Self { plugins })
    }

    /// Active plugin names, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run request hooks in declaration order.
    pub fn on_request(&self, req: &Request<Body>) {
        for plugin in &self.plugins {
            plugin.on_request(req);
        }
    }

    /// Run response hooks in reverse declaration order.
    pub fn on_response(&self, res: &mut Response<Body>) {
        for plugin in self.plugins.iter().rev() {
            plugin.on_response(res);
        }
    }
}
