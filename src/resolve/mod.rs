//! Import path alias resolution.
//!
//! # Responsibilities
//! - Map symbolic import prefixes (e.g. `@`) to absolute filesystem paths
//! - Rewrite import specifiers before module resolution
//!
//! # Design Decisions
//! - An alias matches the whole specifier or a `/`-delimited prefix of it;
//!   `@foo/bar` is not a match for the alias `@`
//! - Longest alias wins when keys nest
//! - Non-matching specifiers pass through untouched (`None`)

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolver built from the configured alias map.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    /// Alias entries sorted longest-key-first.
    aliases: Vec<(String, PathBuf)>,
}

impl AliasResolver {
    /// Build a resolver from the configured alias map.
    ///
    /// Values are expected to be absolute already (the config loader resolves
    /// them against the config file's directory).
    pub fn new(alias: &BTreeMap<String, PathBuf>) -> Self {
        let mut aliases: Vec<_> = alias
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { aliases }
    }

    /// Resolve an import specifier against the alias table.
    ///
    /// `@/components/Foo` with `@ -> /abs/src` yields
    /// `/abs/src/components/Foo`. Returns `None` when no alias applies.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        for (key, target) in &self.aliases {
            if specifier == key {
                return Some(target.clone());
            }
            if let Some(rest) = specifier.strip_prefix(key.as_str()) {
                if let Some(relative) = rest.strip_prefix('/') {
                    return Some(target.join(relative));
                }
            }
        }
        None
    }
}
