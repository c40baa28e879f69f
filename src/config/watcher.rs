//! Organ description watcher for hot-reload support

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::OrganConfig;

/// Delay before reading a modified file, letting editors finish writing
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Watches an organ description and yields every valid new version
pub struct DescriptionWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<OrganConfig>,
}

impl DescriptionWatcher {
    /// Load the description at `path` and start watching it
    pub async fn new(path: String) -> Result<(Self, OrganConfig)> {
        let (tx, rx) = mpsc::channel(10);

        let initial = OrganConfig::load(&path)
            .await
            .context("Failed to load initial organ description")?;

        let watched_path = path.clone();

        // notify callbacks run on their own OS thread, outside the runtime
        let runtime_handle = tokio::runtime::Handle::current();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_)) {
                        return;
                    }
                    debug!("Organ description modified: {:?}", event.paths);

                    let path = watched_path.clone();
                    let tx = tx.clone();
                    runtime_handle.spawn(async move {
                        tokio::time::sleep(SETTLE_DELAY).await;

                        match OrganConfig::load(&path).await {
                            Ok(config) => {
                                info!("Organ description reloaded ({} objects)", config.objects.len());
                                if let Err(e) = tx.send(config).await {
                                    error!("Failed to send organ description update: {}", e);
                                }
                            }
                            Err(e) => {
                                warn!("Failed to reload organ description (keeping previous): {:#}", e);
                            }
                        }
                    });
                }
                Err(e) => {
                    error!("Watch error: {}", e);
                }
            }
        })?;

        watcher
            .watch(Path::new(&path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch organ description: {}", path))?;

        info!("Watching organ description: {}", path);

        Ok((Self { _watcher: watcher, rx }, initial))
    }

    /// Wait for the next valid description
    /// Returns None if the watcher has been closed
    pub async fn next_config(&mut self) -> Option<OrganConfig> {
        self.rx.recv().await
    }
}
