//! Bridges canvas change notifications to the config store

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::RateLimiter;
use crate::config::ConfigStore;
use crate::session::CanvasEngine;

/// Outcome of restoring the persisted snapshot at startup.
#[derive(Debug)]
pub enum RestoreOutcome {
    /// Nothing was persisted; start from the empty document.
    Empty,
    /// A snapshot was loaded into the engine.
    Loaded,
    /// A snapshot was present but unusable; terminal for this session.
    Malformed(String),
}

/// Writes engine snapshots to the config store at a bounded rate.
///
/// The first change notification writes immediately; repeats inside the
/// window are coalesced and the latest state is written at the window
/// boundary by [`SnapshotPersister::pump`]. A process that exits mid-window
/// loses the pending write; no flush-on-exit is guaranteed.
pub struct SnapshotPersister {
    store: ConfigStore,
    key: String,
    limiter: RateLimiter<()>,
    attached: bool,
}

impl SnapshotPersister {
    /// Default write window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

    /// Create a persister over an opened store.
    pub fn new(store: ConfigStore, key: impl Into<String>, window: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            limiter: RateLimiter::new(window),
            attached: true,
        }
    }

    /// Read the persisted snapshot under this persister's key and load it
    /// into the engine.
    pub fn restore<E: CanvasEngine>(&self, engine: &mut E) -> RestoreOutcome {
        let Some(raw) = self.store.get(&self.key) else {
            return RestoreOutcome::Empty;
        };
        let snapshot: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => return RestoreOutcome::Malformed(e.to_string()),
        };
        match engine.load_snapshot(snapshot) {
            Ok(()) => RestoreOutcome::Loaded,
            Err(e) => RestoreOutcome::Malformed(e.to_string()),
        }
    }

    /// Handle one engine mutation notification.
    pub fn note_change<E: CanvasEngine>(&mut self, engine: &E) -> Result<()> {
        self.note_change_at(engine, Instant::now())
    }

    pub(crate) fn note_change_at<E: CanvasEngine>(&mut self, engine: &E, now: Instant) -> Result<()> {
        if !self.attached {
            return Ok(());
        }
        if self.limiter.offer((), now).is_some() {
            self.write_snapshot(engine)?;
        }
        Ok(())
    }

    /// Trailing-edge flush; call once per host update tick.
    pub fn pump<E: CanvasEngine>(&mut self, engine: &E) -> Result<()> {
        self.pump_at(engine, Instant::now())
    }

    pub(crate) fn pump_at<E: CanvasEngine>(&mut self, engine: &E, now: Instant) -> Result<()> {
        if !self.attached {
            return Ok(());
        }
        if self.limiter.poll(now).is_some() {
            self.write_snapshot(engine)?;
        }
        Ok(())
    }

    /// Stop persisting; any pending in-window write is dropped.
    pub fn detach(&mut self) {
        self.attached = false;
        self.limiter.clear();
        tracing::debug!("Snapshot persister detached");
    }

    /// Access the underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn write_snapshot<E: CanvasEngine>(&mut self, engine: &E) -> Result<()> {
        let snapshot = engine.snapshot();
        let raw = serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?;
        self.store.set(self.key.clone(), raw)?;
        tracing::debug!("Persisted snapshot under key '{}'", self.key);
        Ok(())
    }
}
