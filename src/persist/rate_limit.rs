//! Leading-edge throttle with a trailing pending slot

use std::time::{Duration, Instant};

/// Bounds an operation to at most one fire per window.
///
/// The first offer fires immediately. Offers inside the window replace the
/// pending payload, which [`RateLimiter::poll`] releases once the window
/// boundary has passed. Every decision takes the current time as an argument,
/// so tests drive a synthetic clock instead of sleeping.
#[derive(Debug)]
pub struct RateLimiter<T> {
    window: Duration,
    last_fired: Option<Instant>,
    pending: Option<T>,
}

impl<T> RateLimiter<T> {
    /// Create a limiter with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: None,
            pending: None,
        }
    }

    /// Offer a payload; returns it if it should fire now.
    ///
    /// Inside the window the payload is stashed, displacing any older pending
    /// payload so the window boundary always fires the latest state.
    pub fn offer(&mut self, payload: T, now: Instant) -> Option<T> {
        match self.last_fired {
            Some(fired) if now.duration_since(fired) < self.window => {
                self.pending = Some(payload);
                None
            }
            _ => {
                self.last_fired = Some(now);
                self.pending = None;
                Some(payload)
            }
        }
    }

    /// Release the pending payload once the window boundary has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.last_fired {
            Some(fired) if now.duration_since(fired) >= self.window => {
                let payload = self.pending.take()?;
                self.last_fired = Some(now);
                Some(payload)
            }
            _ => None,
        }
    }

    /// Drop any pending payload without firing it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Whether a payload is waiting for the window boundary.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}
