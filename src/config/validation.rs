//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port non-zero, prefixes anchored)
//! - Check proxy targets parse as http(s) origins
//! - Check alias targets and the static root exist on disk
//! - Check plugin names against the built-in registry
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from filesystem existence checks
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::path::PathBuf;

use url::Url;

use crate::config::schema::DevServerConfig;
use crate::plugin;

/// A single semantic error found in a configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("server.port must be non-zero")]
    PortZero,

    #[error("proxy prefix {0:?} must start with '/'")]
    UnanchoredPrefix(String),

    #[error("duplicate proxy prefix {0:?}")]
    DuplicatePrefix(String),

    #[error("proxy target {target:?} is not a valid URL: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("proxy target {0:?} must use the http or https scheme")]
    InvalidTargetScheme(String),

    #[error("alias {alias:?} points to {path:?}, which does not exist")]
    MissingAliasTarget { alias: String, path: PathBuf },

    #[error("allowed host pattern {0:?} is empty or a bare dot")]
    InvalidHostPattern(String),

    #[error("unknown plugin {0:?}")]
    UnknownPlugin(String),

    #[error("static root {0:?} is not a directory")]
    MissingRoot(PathBuf),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &DevServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ValidationError::PortZero);
    }

    if !config.root.is_dir() {
        errors.push(ValidationError::MissingRoot(config.root.clone()));
    }

    let mut seen_prefixes = HashSet::new();
    for rule in &config.server.proxy {
        if !rule.prefix.starts_with('/') {
            errors.push(ValidationError::UnanchoredPrefix(rule.prefix.clone()));
        }
        if !seen_prefixes.insert(rule.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(rule.prefix.clone()));
        }
        match Url::parse(&rule.target) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(ValidationError::InvalidTargetScheme(rule.target.clone()));
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidTarget {
                    target: rule.target.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    for (alias, path) in &config.resolve.alias {
        if !path.exists() {
            errors.push(ValidationError::MissingAliasTarget {
                alias: alias.clone(),
                path: path.clone(),
            });
        }
    }

    for pattern in &config.server.allowed_hosts {
        if pattern.is_empty() || pattern == "." {
            errors.push(ValidationError::InvalidHostPattern(pattern.clone()));
        }
    }

    for name in &config.plugins {
        if !plugin::is_known(name) {
            errors.push(ValidationError::UnknownPlugin(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProxyRuleConfig;

    fn base_config() -> DevServerConfig {
        let mut config = DevServerConfig::default();
        // Use a directory that always exists so root checks pass.
        config.root = std::env::temp_dir();
        config
    }

    #[test]
    fn valid_config_passes() {
        let mut config = base_config();
        config.server.proxy.push(ProxyRuleConfig {
            prefix: "/api".into(),
            target: "http://127.0.0.1:5001".into(),
            change_origin: true,
            strip_prefix: true,
        });
        config.server.allowed_hosts = vec!["9y846303k2.goho.co".into(), ".goho.co".into()];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = base_config();
        config.server.port = 0;
        config.server.proxy.push(ProxyRuleConfig {
            prefix: "api".into(),
            target: "not a url".into(),
            change_origin: false,
            strip_prefix: true,
        });
        config.server.allowed_hosts.push(String::new());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::PortZero));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnanchoredPrefix(_))));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidTarget { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidHostPattern(_))));
    }

    #[test]
    fn duplicate_prefixes_are_rejected() {
        let mut config = base_config();
        for _ in 0..2 {
            config.server.proxy.push(ProxyRuleConfig {
                prefix: "/api".into(),
                target: "http://127.0.0.1:5001".into(),
                change_origin: false,
                strip_prefix: true,
            });
        }
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicatePrefix("/api".into())]);
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let mut config = base_config();
        config.server.proxy.push(ProxyRuleConfig {
            prefix: "/ws".into(),
            target: "ftp://127.0.0.1:21".into(),
            change_origin: false,
            strip_prefix: false,
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidTargetScheme("ftp://127.0.0.1:21".into())]
        );
    }

    #[test]
    fn unknown_plugin_is_rejected() {
        let mut config = base_config();
        config.plugins.push("does-not-exist".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnknownPlugin("does-not-exist".into())]
        );
    }

    #[test]
    fn missing_alias_target_is_rejected() {
        let mut config = base_config();
        config
            .resolve
            .alias
            .insert("@".into(), PathBuf::from("/definitely/not/here"));
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::MissingAliasTarget { .. }
        ));
    }
}
