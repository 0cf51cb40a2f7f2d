//! Generic hot-reload watcher: monitors a config file and swaps a frozen
//! in-memory value when it changes (§6 "Persisted state").

use crate::{ConfigError, ConfigLoader, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Watches a single config file of type `T` and keeps an `Arc<RwLock<T>>`
/// current with its contents.
pub struct ConfigWatcher<T> {
    current: Arc<RwLock<T>>,
    path: PathBuf,
    loader: fn(&std::path::Path) -> Result<T>,
}

impl<T: Clone + Send + Sync + DeserializeOwned + 'static> ConfigWatcher<T> {
    pub fn new(path: PathBuf, loader: fn(&std::path::Path) -> Result<T>) -> Result<Self> {
        let value = loader(&path)?;
        Ok(Self {
            current: Arc::new(RwLock::new(value)),
            path,
            loader,
        })
    }

    pub fn get(&self) -> T {
        self.current.read().expect("config lock poisoned").clone()
    }

    pub fn start_watching(&self) -> Result<JoinHandle<()>> {
        let current = Arc::clone(&self.current);
        let path = self.path.clone();
        let loader = self.loader;

        let (tx, mut rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(e) = tx.blocking_send(event) {
                        error!("failed to send file event: {e}");
                    }
                }
                Err(e) => error!("file watch error: {e}"),
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        info!(path = %path.display(), "started watching config file");

        let handle = tokio::spawn(async move {
            let _watcher = watcher;

            while let Some(event) = rx.recv().await {
                if matches!(event.kind, EventKind::Modify(_)) {
                    debug!("config file modified, reloading");
                    match loader(&path) {
                        Ok(new_value) => match current.write() {
                            Ok(mut guard) => {
                                *guard = new_value;
                                info!("config reloaded");
                            }
                            Err(e) => error!("failed to acquire write lock: {e}"),
                        },
                        Err(e) => warn!("failed to reload config, keeping old value: {e}"),
                    }
                }
            }

            debug!("config watcher task stopped");
        });

        Ok(handle)
    }

    pub fn watch(
        path: PathBuf,
        loader: fn(&std::path::Path) -> Result<T>,
    ) -> Result<(Self, JoinHandle<()>)> {
        let watcher = Self::new(path, loader)?;
        let handle = watcher.start_watching()?;
        Ok((watcher, handle))
    }
}
