//! Change-notification bridge.
//!
//! Watches a directory of scene snapshots and, whenever one changes,
//! regenerates its interface and POSTs it to the asset-types endpoint.
//! Nothing that goes wrong for a single asset stops the loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use treegen::{Generator, GeneratorError};

use crate::ui;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:7006/update-asset-types";
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Directory holding one `*.json` snapshot per asset.
    pub assets_dir: PathBuf,
    pub endpoint: String,
    /// Minimum time between two updates for the same asset.
    pub throttle: Duration,
    pub debounce: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetTypesUpdate<'a> {
    asset_name: &'a str,
    asset_types: &'a str,
}

#[derive(Debug, thiserror::Error)]
enum PublishError {
    #[error(transparent)]
    Generate(#[from] GeneratorError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Per-asset rate limit.
///
/// A trigger inside the window is held until the window ends, so the last
/// edit is always published. Repeated triggers inside one window collapse
/// into a single flush.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_fired: HashMap<PathBuf, Instant>,
    pending: HashMap<PathBuf, Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    /// Records a trigger for `asset` at `now`; true when it should run now.
    /// Otherwise the asset is due again once its window ends.
    pub fn try_fire(&mut self, asset: &Path, now: Instant) -> bool {
        if let Some(last) = self.last_fired.get(asset) {
            if now.saturating_duration_since(*last) < self.window {
                let due = *last + self.window;
                self.pending.insert(asset.to_path_buf(), due);
                return false;
            }
        }
        self.pending.remove(asset);
        self.last_fired.insert(asset.to_path_buf(), now);
        true
    }

    /// Earliest time a held trigger becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Removes and returns the assets whose held trigger is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut due: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(path, _)| path.clone())
            .collect();
        due.sort();
        for path in &due {
            self.pending.remove(path);
        }
        due
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Snapshot files directly inside `dir`, sorted by file name.
pub fn snapshot_paths(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_snapshot(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

struct Bridge<'g> {
    generator: &'g Generator,
    client: reqwest::Client,
    endpoint: String,
    throttle: Throttle,
}

impl Bridge<'_> {
    async fn asset_changed(&mut self, path: &Path) {
        if !path.is_file() {
            debug!(path = %path.display(), "Snapshot removed");
            return;
        }
        if !self.throttle.try_fire(path, Instant::now()) {
            debug!(path = %path.display(), "Throttled, publishing when the window ends");
            return;
        }

        let start = Instant::now();
        match self.publish(path).await {
            Ok(asset_name) => {
                info!(asset = %asset_name, "Updated asset types");
                ui::timing(&format!("Updated {}", asset_name), start.elapsed().as_millis());
            }
            Err(e) => {
                warn!("Failed to update asset types for {}\n{}", path.display(), e);
                ui::error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    async fn publish(&self, path: &Path) -> Result<String, PublishError> {
        let root = treegen::scene::load_snapshot(path)?;
        let asset_types = self.generator.generate_interface(&root)?;

        self.client
            .post(&self.endpoint)
            .json(&AssetTypesUpdate {
                asset_name: &root.name,
                asset_types: &asset_types,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(root.name)
    }
}

/// Processes every existing snapshot, then reacts to changes until Ctrl-C.
pub async fn run(generator: &Generator, config: BridgeConfig) -> miette::Result<()> {
    if !config.assets_dir.is_dir() {
        return Err(miette::miette!(
            "Asset directory not found: {}",
            config.assets_dir.display()
        ));
    }

    let mut bridge = Bridge {
        generator,
        client: reqwest::Client::new(),
        endpoint: config.endpoint.clone(),
        throttle: Throttle::new(config.throttle),
    };

    for path in snapshot_paths(&config.assets_dir) {
        bridge.asset_changed(&path).await;
    }

    let (tx, mut rx) = mpsc::channel::<Vec<PathBuf>>(16);

    let mut debouncer = new_debouncer(config.debounce, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let paths: Vec<PathBuf> = events.into_iter().map(|event| event.path).collect();
                if !paths.is_empty() {
                    let _ = tx.blocking_send(paths);
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        }
    })
    .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    debouncer
        .watcher()
        .watch(&config.assets_dir, RecursiveMode::NonRecursive)
        .map_err(|e| miette::miette!("Failed to watch directory: {}", e))?;

    ui::info(&format!("Watching {} for changes...", config.assets_dir.display()));
    ui::dim(&format!("Posting to {}", config.endpoint));

    loop {
        let next_due = bridge.throttle.next_due();

        tokio::select! {
            Some(paths) = rx.recv() => {
                let mut changed: Vec<PathBuf> = paths.into_iter().filter(|p| is_snapshot(p)).collect();
                changed.sort();
                changed.dedup();
                for path in changed {
                    bridge.asset_changed(&path).await;
                }
            }
            _ = sleep_until(next_due.unwrap_or_else(Instant::now).into()), if next_due.is_some() => {
                for path in bridge.throttle.take_due(Instant::now()) {
                    bridge.asset_changed(&path).await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                ui::info("Stopped watching.");
                break;
            }
        }
    }

    Ok(())
}
