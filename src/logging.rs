//! Logging setup for host applications

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the default subscriber: a fmt layer at INFO.
///
/// Call once at host startup, before any component logs.
pub fn init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();
}
