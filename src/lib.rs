//! devserve — a development server for front-end applications.
//!
//! Serves a single-page app's static assets, forwards API traffic to a local
//! backend, and validates incoming Host headers, all driven by one TOML
//! configuration file.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  DEV SERVER                  │
//!                    │                                              │
//!  Client Request    │  ┌─────────┐   ┌───────────┐   ┌──────────┐ │
//!  ──────────────────┼─▶│  http   │──▶│ security  │──▶│ routing  │ │
//!                    │  │ server  │   │ (hosts)   │   │ (rules)  │ │
//!                    │  └─────────┘   └───────────┘   └────┬─────┘ │
//!                    │                                     │       │
//!                    │              matched ───────────────┤       │
//!                    │                 │                   │       │
//!                    │                 ▼                   ▼       │
//!                    │          ┌────────────┐      ┌───────────┐  │
//!  Client Response   │          │   proxy    │      │  static   │  │     Backend
//!  ◀─────────────────┼──────────│  forward   │      │  assets   │  │ ◀── (e.g. Flask
//!                    │          └────────────┘      └───────────┘  │      on :5001)
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns         │ │
//!                    │  │  config · plugins · resolve (aliases)   │ │
//!                    │  │  observability · lifecycle              │ │
//!                    │  └────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Request policy
pub mod plugin;
pub mod resolve;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::DevServerConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;
pub use resolve::AliasResolver;
