//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::startup::{load_runtime, RoutingRuntime};
use crate::observability::metrics;

/// A watcher that rebuilds the routing runtime when the configuration file changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RoutingRuntime>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt runtimes.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutingRuntime>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to be delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Config file change detected, reloading");
                        reload(&path, &tx);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Rebuild the runtime from `path` and hand it to the server.
///
/// A broken file keeps the current runtime in place.
fn reload(path: &Path, tx: &mpsc::UnboundedSender<RoutingRuntime>) {
    match load_runtime(path) {
        Ok(runtime) => {
            metrics::record_reload("success");
            if tx.send(runtime).is_err() {
                tracing::warn!("Runtime receiver dropped, reload discarded");
            }
        }
        Err(e) => {
            metrics::record_reload("failure");
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dimension-router-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reload_sends_runtime() {
        let path = temp_config("reload-ok", "[routing]\nseparator = \"-\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        reload(&path, &watcher.update_tx);

        let runtime = rx.try_recv().unwrap();
        assert_eq!(runtime.config().routing.separator, "-");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_reload_keeps_current_on_error() {
        let path = temp_config("reload-bad", "[routing]\nseparator = \"/\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        reload(&path, &watcher.update_tx);

        assert!(rx.try_recv().is_err());
        fs::remove_file(path).unwrap();
    }
}
