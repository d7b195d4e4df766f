//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch)
//!     → middleware/ (host allow list, plugin hooks)
//!     → request.rs (request ID)
//!     → [proxy rule matched] forward to upstream origin
//!     → [no rule matched]   assets.rs (static files, SPA fallback)
//!     → Send to client
//! ```

pub mod assets;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, DevServer, RuntimeState, ServerError};
