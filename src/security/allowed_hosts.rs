//! Host header allow list.
//!
//! # Responsibilities
//! - Parse configured host patterns (exact names and `.suffix` wildcards)
//! - Decide whether an incoming Host header is acceptable
//!
//! # Design Decisions
//! - Set semantics: any matching pattern is sufficient, order irrelevant
//! - Hostname comparison is case-insensitive; the port is ignored
//! - A `.suffix` pattern requires a real subdomain: `.goho.co` does not
//!   match the bare `goho.co`
//! - An empty list disables the check entirely

/// A single configured host pattern.
#[derive(Debug, Clone, PartialEq)]
enum HostPattern {
    /// Exact hostname match.
    Exact(String),
    /// Domain-suffix wildcard; the stored string keeps its leading dot.
    Suffix(String),
}

impl HostPattern {
    fn parse(entry: &str) -> Self {
        let normalized = entry.to_ascii_lowercase();
        if normalized.starts_with('.') {
            HostPattern::Suffix(normalized)
        } else {
            HostPattern::Exact(normalized)
        }
    }

    fn matches(&self, hostname: &str) -> bool {
        match self {
            HostPattern::Exact(expected) => hostname == expected,
            HostPattern::Suffix(suffix) => hostname.ends_with(suffix.as_str()),
        }
    }
}

/// Predicate over incoming Host header values.
#[derive(Debug, Clone, Default)]
pub struct HostFilter {
    patterns: Vec<HostPattern>,
}

impl HostFilter {
    /// Build a filter from configured pattern strings.
    pub fn from_patterns<S: AsRef<str>>(entries: &[S]) -> Self {
        Self {
            patterns: entries.iter().map(|e| HostPattern::parse(e.as_ref())).collect(),
        }
    }

    /// True when no patterns are configured (all hosts accepted).
    pub fn is_unrestricted(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a Host header value is acceptable.
    ///
    /// The value may carry a port ("example.com:5173"), which is stripped
    /// before matching.
    pub fn allows(&self, host_header: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        let hostname = strip_port(host_header).to_ascii_lowercase();
        self.patterns.iter().any(|p| p.matches(&hostname))
    }
}

/// Drop the `:port` suffix from a Host header value, if present.
///
/// IPv6 literals keep their brackets: `[::1]:5173` becomes `[::1]`.
fn strip_port(host: &str) -> &str {
    if let Some(bracket_end) = host.find(']') {
        // IPv6 literal.
        &host[..=bracket_end]
    } else {
        match host.split_once(':') {
            Some((hostname, _port)) => hostname,
            None => host,
        }
    }
}
