//! devserve binary: load configuration, bind, serve.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use devserve::config::validation::validate_config;
use devserve::config::watcher::ConfigWatcher;
use devserve::config::{load_config, ConfigError, DevServerConfig, HostConfig};
use devserve::http::server::RuntimeState;
use devserve::lifecycle::Shutdown;
use devserve::observability::{logging, metrics};
use devserve::DevServer;

#[derive(Parser)]
#[command(name = "devserve")]
#[command(about = "Development server with API proxying", version)]
struct Cli {
    /// Path to the configuration file (default: ./devserve.toml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the static asset root.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,

    /// Disable configuration hot reload.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(|| {
        let default = PathBuf::from("devserve.toml");
        default.exists().then_some(default)
    });

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => DevServerConfig::default(),
    };

    // CLI overrides can invalidate a config that loaded cleanly, so the
    // effective config is validated again before anything binds.
    let config = apply_overrides(config, &cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.observability);

    tracing::info!(
        host = config.server.host.bind_addr(),
        port = config.server.port,
        root = %config.root.display(),
        proxy_rules = config.server.proxy.len(),
        plugins = config.plugins.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind = format!("{}:{}", config.server.host.bind_addr(), config.server.port);
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = DevServer::new(config)?;

    // Hot reload: swap proxy rules and the host allow list in place.
    // Changes to root, plugins, or the bind address need a restart.
    let shutdown = Shutdown::new();
    let mut watcher_handle = None;
    if let (Some(path), false) = (&config_path, cli.no_watch) {
        let (watcher, mut updates) = ConfigWatcher::new(path);
        watcher_handle = Some(watcher.run()?);

        let runtime = server.runtime();
        let mut stop = shutdown.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.recv() => break,
                    update = updates.recv() => match update {
                        Some(new_config) => match RuntimeState::from_config(&new_config) {
                            Ok(state) => {
                                runtime.store(Arc::new(state));
                                tracing::info!("Configuration reloaded");
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Reloaded config rejected");
                            }
                        },
                        None => break,
                    },
                }
            }
        });
    }

    server.run(listener).await?;

    shutdown.trigger();
    drop(watcher_handle);

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Apply CLI overrides and re-validate the effective configuration.
fn apply_overrides(mut config: DevServerConfig, cli: &Cli) -> Result<DevServerConfig, ConfigError> {
    if let Some(host) = &cli.host {
        config.server.host = HostConfig::Addr(host.clone());
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_with_missing_root_is_rejected() {
        let cli = Cli::parse_from(["devserve", "--root", "/definitely/not/here"]);
        let err = apply_overrides(DevServerConfig::default(), &cli).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn valid_overrides_are_applied() {
        let cli = Cli::parse_from(["devserve", "--host", "0.0.0.0", "--port", "8080"]);
        let config = apply_overrides(DevServerConfig::default(), &cli).unwrap();
        assert_eq!(config.server.host.bind_addr(), "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }
}
