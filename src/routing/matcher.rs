//! Path matching and rewriting for proxy rules.
//!
//! # Responsibilities
//! - Match request paths against a rule's prefix
//! - Rewrite forwarded paths (strip the matched prefix)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Plain string prefixes, no regex, to guarantee O(n) matching
//! - Rewrite removes the first occurrence only

/// Returns true if `path` falls under `prefix`.
pub fn path_matches(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix)
}

/// Remove the first occurrence of `prefix` from `path`.
///
/// Plain string replacement, first match only. An empty result is mapped to
/// "/" so the forwarded URI stays well-formed. Callers only invoke this for
/// paths that already matched the prefix.
pub fn rewrite_path(path: &str, prefix: &str) -> String {
    let rewritten = path.replacen(prefix, "", 1);
    if rewritten.is_empty() {
        "/".to_string()
    } else {
        rewritten
    }
}
