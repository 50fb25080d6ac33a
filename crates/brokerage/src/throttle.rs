// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Availability state and re-announcement throttle.
//!
//! Bundles an availability flag and a monotonic re-announcement timer (a
//! clock reading restarted on every successful announcement) behind one
//! lock, since the façade always reads and updates them together and a
//! split lock would let a concurrent caller observe them out of sync.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use brokerage_core::Clock;

struct Inner {
    available: bool,
    last_announce: Instant,
}

/// Tracks whether this worker has last advertised itself as available,
/// and gates how often a re-announcement may occur while already
/// available.
pub struct Availability<C: Clock> {
    clock: C,
    window: Duration,
    inner: Mutex<Inner>,
}

impl<C: Clock> Availability<C> {
    /// The timer starts running at construction time, so a freshly built
    /// `Availability` is immediately due for its first announcement.
    pub fn new(clock: C, window: Duration) -> Self {
        let last_announce = clock.now();
        Self { inner: Mutex::new(Inner { available: false, last_announce }), clock, window }
    }

    /// The `AvailabilityState` as of the last `set_state` call.
    pub fn is_available(&self) -> bool {
        self.inner.lock().available
    }

    /// Whether the throttle window has elapsed since the last successful
    /// announcement. Only meaningful when `is_available()` is already
    /// true — a false→true transition always announces regardless.
    pub fn due(&self) -> bool {
        let inner = self.inner.lock();
        self.clock.now().saturating_duration_since(inner.last_announce) >= self.window
    }

    /// Record a successful announcement, restarting the throttle window.
    pub fn restart(&self) {
        self.inner.lock().last_announce = self.clock.now();
    }

    /// Update `AvailabilityState` to the given value. Called unconditionally
    /// at the end of every `SetAvailability` call, regardless of whether an
    /// announce/revoke was actually performed.
    pub fn set_state(&self, available: bool) {
        self.inner.lock().available = available;
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod tests;
