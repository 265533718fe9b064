//! Application-level wiring between the canvas engine and persistence

use std::time::Duration;

use anyhow::Result;

use crate::config::ConfigStore;
use crate::persist::{RestoreOutcome, SnapshotPersister};

/// The embedded drawing engine, seen only through its snapshot surface.
///
/// The engine owns its document schema; snapshots are opaque JSON here. A
/// snapshot saved by one session must load in a later session running a
/// compatible engine version; no migration is attempted on this side.
pub trait CanvasEngine {
    /// Capture the full document state.
    fn snapshot(&self) -> serde_json::Value;

    /// Replace the document state from a previously captured snapshot.
    fn load_snapshot(&mut self, snapshot: serde_json::Value) -> Result<()>;
}

/// UI-visible lifecycle of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState {
    Loading,
    Ready,
    Error(String),
}

/// Ties the persister to an engine for the lifetime of the plugin view.
///
/// The host calls [`Session::start`] once after constructing the engine,
/// [`Session::on_change`] for every engine mutation notification,
/// [`Session::pump`] from its update loop, and [`Session::close`] on
/// teardown.
pub struct Session {
    persister: SnapshotPersister,
    state: LoadingState,
}

impl Session {
    /// Store key holding the whiteboard document snapshot.
    pub const PERSISTENCE_KEY: &'static str = "whiteboard-app";

    /// Create a session with the default write window.
    pub fn new(store: ConfigStore) -> Self {
        Self::with_window(store, SnapshotPersister::DEFAULT_WINDOW)
    }

    /// Create a session with an explicit write window.
    pub fn with_window(store: ConfigStore, window: Duration) -> Self {
        Self {
            persister: SnapshotPersister::new(store, Self::PERSISTENCE_KEY, window),
            state: LoadingState::Loading,
        }
    }

    /// Load the persisted document into the engine and settle the UI state.
    ///
    /// A malformed snapshot is terminal: the session stays in `Error` and no
    /// partial document is recovered.
    pub fn start<E: CanvasEngine>(&mut self, engine: &mut E) -> &LoadingState {
        self.state = match self.persister.restore(engine) {
            RestoreOutcome::Empty | RestoreOutcome::Loaded => LoadingState::Ready,
            RestoreOutcome::Malformed(message) => {
                tracing::error!("Failed to load persisted whiteboard: {message}");
                LoadingState::Error(message)
            }
        };
        &self.state
    }

    /// Forward one engine mutation notification.
    ///
    /// Write failures are logged, not fatal to the UI; the host is
    /// responsible for notifying the user.
    pub fn on_change<E: CanvasEngine>(&mut self, engine: &E) {
        if self.state != LoadingState::Ready {
            return;
        }
        if let Err(e) = self.persister.note_change(engine) {
            tracing::error!("Failed to persist snapshot: {e:#}");
        }
    }

    /// Release any write held back by the rate limiter; call once per host
    /// update tick.
    pub fn pump<E: CanvasEngine>(&mut self, engine: &E) {
        if self.state != LoadingState::Ready {
            return;
        }
        if let Err(e) = self.persister.pump(engine) {
            tracing::error!("Failed to persist snapshot: {e:#}");
        }
    }

    /// Unsubscribe from change notifications; any in-flight scheduled write
    /// is dropped.
    pub fn close(&mut self) {
        self.persister.detach();
    }

    /// Current UI state.
    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    /// Access the underlying store, e.g. for unrelated settings.
    pub fn store(&self) -> &ConfigStore {
        self.persister.store()
    }
}
