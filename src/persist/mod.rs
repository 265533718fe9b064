//! Snapshot persistence: rate limiting and the store bridge

mod persister;
mod rate_limit;

pub use persister::{RestoreOutcome, SnapshotPersister};
pub use rate_limit::RateLimiter;
