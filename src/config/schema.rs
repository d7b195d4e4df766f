//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev
//! server. All types derive Serde traits for deserialization from config
//! files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration for the development server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DevServerConfig {
    /// Directory of static assets to serve (SPA root).
    pub root: PathBuf,

    /// Ordered list of plugin names to activate.
    ///
    /// Order is preserved exactly as declared; later plugins observe the
    /// request after earlier ones and the response before them.
    pub plugins: Vec<String>,

    /// Module resolution settings (import path aliases).
    pub resolve: ResolveConfig,

    /// Server settings (bind address, proxy rules, host allow list).
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            plugins: Vec::new(),
            resolve: ResolveConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DevServerConfig {
    /// Make `root` and alias targets absolute by resolving them against
    /// `base` (the directory containing the configuration file).
    ///
    /// Called once by the loader, before validation.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.root.is_relative() {
            self.root = base.join(&self.root);
        }
        for target in self.resolve.alias.values_mut() {
            if target.is_relative() {
                let absolute = base.join(&*target);
                *target = absolute;
            }
        }
    }
}

/// Module resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ResolveConfig {
    /// Import path aliases: symbolic prefix -> filesystem path.
    ///
    /// Keys are unique by construction (a duplicate key is a parse error).
    /// Relative values are resolved against the config file's directory.
    pub alias: BTreeMap<String, PathBuf>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host. Either an address string or a boolean, where `true`
    /// means "listen on all interfaces".
    pub host: HostConfig,

    /// TCP port to listen on.
    pub port: u16,

    /// Proxy rules, evaluated in declaration order. First match wins.
    pub proxy: Vec<ProxyRuleConfig>,

    /// Host header patterns accepted by the server.
    ///
    /// An entry is either an exact hostname, or a `.suffix` pattern that
    /// matches any subdomain of `suffix`. An empty list disables the check.
    pub allowed_hosts: Vec<String>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: HostConfig::default(),
            port: 5173,
            proxy: Vec::new(),
            allowed_hosts: Vec::new(),
            request_timeout_secs: 30,
        }
    }
}

/// Bind host, accepting either a string address or a boolean shorthand.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum HostConfig {
    /// `true` = all interfaces, `false` = loopback only.
    Flag(bool),
    /// Explicit bind address (e.g., "0.0.0.0").
    Addr(String),
}

impl HostConfig {
    /// The concrete address to bind.
    pub fn bind_addr(&self) -> &str {
        match self {
            HostConfig::Flag(true) => "0.0.0.0",
            HostConfig::Flag(false) => "127.0.0.1",
            HostConfig::Addr(addr) => addr,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig::Addr("127.0.0.1".to_string())
    }
}

/// A single proxy rule forwarding a path prefix to another origin.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProxyRuleConfig {
    /// Request path prefix to match (e.g., "/api").
    pub prefix: String,

    /// Target origin (e.g., "http://127.0.0.1:5001").
    pub target: String,

    /// Rewrite the outgoing Host header to the target's authority.
    #[serde(default)]
    pub change_origin: bool,

    /// Strip the matched prefix from the forwarded path.
    #[serde(default = "default_strip_prefix")]
    pub strip_prefix: bool,
}

fn default_strip_prefix() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
