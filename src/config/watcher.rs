//! Configuration file watcher for hot reload.
//!
//! The original-style workflow is "edit the config, the server picks it up".
//! A change event triggers a full load + validation cycle; only configs that
//! pass validation are published. A broken edit keeps the current
//! configuration running.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::DevServerConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<DevServerConfig>,
}

impl ConfigWatcher {
    /// Create a new watcher for `path`.
    ///
    /// Returns the watcher and a receiver yielding validated configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<DevServerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file.
    ///
    /// The returned watcher handle must be kept alive for events to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Config file change detected, reloading");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    error = %e,
                                    "Reload failed, keeping current configuration"
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::time::timeout;

    #[tokio::test]
    async fn broken_edit_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devserve.toml");
        fs::write(&path, "root = \".\"\n").unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        // An edit that fails to parse must not reach subscribers; the
        // running configuration stays as it is.
        fs::write(&path, "server = [broken").unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        // The next good edit is the first thing the receiver sees.
        fs::write(&path, "root = \".\"\n\n[server]\nport = 8123\n").unwrap();

        let config = timeout(Duration::from_secs(10), updates.recv())
            .await
            .expect("valid edit should be published")
            .expect("update channel closed");
        assert_eq!(config.server.port, 8123);
    }

    #[tokio::test]
    async fn semantically_invalid_edit_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devserve.toml");
        fs::write(&path, "root = \".\"\n").unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        // Parses fine, fails validation (unknown plugin).
        fs::write(&path, "root = \".\"\nplugins = [\"nope\"]\n").unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        fs::write(&path, "root = \".\"\n\n[server]\nport = 8124\n").unwrap();

        let config = timeout(Duration::from_secs(10), updates.recv())
            .await
            .expect("valid edit should be published")
            .expect("update channel closed");
        assert_eq!(config.server.port, 8124);
    }
}
