//! Proxy rule lookup.
//!
//! # Responsibilities
//! - Compile proxy rules (parse targets once, at construction)
//! - Look up the matching rule for a request path
//! - Return the matched rule or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan in declaration order; first match wins
//! - Explicit None rather than silent default

use url::Url;

use crate::config::schema::ProxyRuleConfig;
use crate::routing::matcher;

/// A proxy rule with its target origin parsed and split.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Path prefix this rule matches.
    pub prefix: String,

    /// URI scheme of the target origin ("http" or "https").
    pub scheme: String,

    /// Authority of the target origin (host, plus port when explicit).
    pub authority: String,

    /// Rewrite the outgoing Host header to `authority`.
    pub change_origin: bool,

    /// Strip `prefix` from the forwarded path.
    pub strip_prefix: bool,
}

impl CompiledRule {
    /// The forwarded path for a request path that matched this rule.
    pub fn forwarded_path(&self, path: &str) -> String {
        if self.strip_prefix {
            matcher::rewrite_path(path, &self.prefix)
        } else {
            path.to_string()
        }
    }
}

/// Error compiling proxy rules.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("proxy target {target:?} is invalid: {source}")]
    InvalidTarget {
        target: String,
        source: url::ParseError,
    },

    #[error("proxy target {0:?} has no host")]
    MissingHost(String),
}

/// Immutable set of compiled proxy rules.
#[derive(Debug, Clone, Default)]
pub struct ProxyRouter {
    rules: Vec<CompiledRule>,
}

impl ProxyRouter {
    /// Compile rules from configuration, preserving declaration order.
    pub fn from_config(rules: &[ProxyRuleConfig]) -> Result<Self, RouterError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let url = Url::parse(&rule.target).map_err(|source| RouterError::InvalidTarget {
                target: rule.target.clone(),
                source,
            })?;
            if url.host_str().is_none() {
                return Err(RouterError::MissingHost(rule.target.clone()));
            }
            compiled.push(CompiledRule {
                prefix: rule.prefix.clone(),
                scheme: url.scheme().to_string(),
                authority: url.authority().to_string(),
                change_origin: rule.change_origin,
                strip_prefix: rule.strip_prefix,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// First rule whose prefix matches `path`, if any.
    pub fn match_path(&self, path: &str) -> Option<&CompiledRule> {
        self.rules
            .iter()
            .find(|rule| matcher::path_matches(path, &rule.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(prefix: &str, target: &str) -> ProxyRuleConfig {
        ProxyRuleConfig {
            prefix: prefix.into(),
            target: target.into(),
            change_origin: true,
            strip_prefix: true,
        }
    }

    #[test]
    fn test_compile_splits_origin() {
        let router = ProxyRouter::from_config(&[rule("/api", "http://127.0.0.1:5001")]).unwrap();
        let matched = router.match_path("/api/users").unwrap();
        assert_eq!(matched.scheme, "http");
        assert_eq!(matched.authority, "127.0.0.1:5001");
        assert_eq!(matched.forwarded_path("/api/users"), "/users");
    }

    #[test]
    fn test_no_match_for_other_paths() {
        let router = ProxyRouter::from_config(&[rule("/api", "http://127.0.0.1:5001")]).unwrap();
        assert!(router.match_path("/assets/logo.png").is_none());
        assert!(router.match_path("/").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let router = ProxyRouter::from_config(&[
            rule("/api/v2", "http://127.0.0.1:6000"),
            rule("/api", "http://127.0.0.1:5001"),
        ])
        .unwrap();
        assert_eq!(
            router.match_path("/api/v2/users").unwrap().authority,
            "127.0.0.1:6000"
        );
        assert_eq!(
            router.match_path("/api/users").unwrap().authority,
            "127.0.0.1:5001"
        );
    }

    #[test]
    fn test_strip_prefix_disabled_keeps_path() {
        let mut r = rule("/api", "http://127.0.0.1:5001");
        r.strip_prefix = false;
        let router = ProxyRouter::from_config(&[r]).unwrap();
        let matched = router.match_path("/api/users").unwrap();
        assert_eq!(matched.forwarded_path("/api/users"), "/api/users");
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let err = ProxyRouter::from_config(&[rule("/api", "not a url")]).unwrap_err();
        assert!(matches!(err, RouterError::InvalidTarget { .. }));
    }
}
