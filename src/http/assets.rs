//! Static asset serving.
//!
//! Serves the front-end's files from the configured root with an SPA
//! fallback: any path that does not map to a file gets `index.html`, so
//! client-side routes survive a full page reload.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Asset service type: directory listing with an `index.html` fallback.
pub type AssetService = ServeDir<ServeFile>;

/// Build the asset service for a static root.
pub fn asset_service(root: &Path) -> AssetService {
    ServeDir::new(root).fallback(ServeFile::new(root.join("index.html")))
}
