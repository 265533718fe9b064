//! Whiteboard Shell - host-side glue for an embedded drawing canvas
//!
//! The canvas engine itself lives elsewhere; this crate supplies what the
//! host shell wraps around it: a JSON-backed key-value config store, a
//! rate-limited snapshot persister, native file dialogs with byte transfer,
//! and media/locale helpers.

pub mod bridge;
pub mod config;
pub mod error;
pub mod locale;
pub mod logging;
pub mod media;
pub mod persist;
pub mod session;

pub use bridge::{DialogOptions, DialogProperty, FileFilter, NamedFile, SaveContent};
pub use config::ConfigStore;
pub use error::BridgeError;
pub use persist::{RateLimiter, RestoreOutcome, SnapshotPersister};
pub use session::{CanvasEngine, LoadingState, Session};
