//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (rule lookup)
//!     → matcher.rs (prefix match, path rewrite)
//!     → Return: matched CompiledRule or None
//!
//! Rule Compilation (at startup and on reload):
//!     ProxyRuleConfig[]
//!     → Parse target origins (scheme + authority)
//!     → Freeze as immutable ProxyRouter
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same rule
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use matcher::rewrite_path;
pub use router::{CompiledRule, ProxyRouter, RouterError};
