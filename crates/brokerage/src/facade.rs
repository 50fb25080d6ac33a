// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The brokerage façade: the only public surface most callers need.
//!
//! Routes `FindWorkers`/`SetAvailability` to whichever backend
//! `BrokerageConfig` selected at construction, and applies the
//! self/loopback filter uniformly regardless of backend.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use brokerage_core::env::THROTTLE_MS;
use brokerage_core::{host_identity, BrokerageConfig, Clock, HostIdentity, SystemClock};

use crate::coordinator::{self, new_pending_slot, PendingSlot};
use crate::filesystem;
use crate::throttle::Availability;

/// Public brokerage façade, generic over the clock so tests can drive the
/// availability throttle deterministically with a `FakeClock`.
pub struct Brokerage<C: Clock = SystemClock> {
    config: BrokerageConfig,
    identity: HostIdentity,
    availability: Availability<C>,
    pending: PendingSlot,
}

impl Brokerage<SystemClock> {
    /// Resolve configuration from `FASTBUILD_COORDINATOR` /
    /// `FASTBUILD_BROKERAGE_PATH` and construct a brokerage using the real
    /// system clock. The constructor production callers should use.
    pub fn from_env() -> Self {
        Self::new(BrokerageConfig::from_env())
    }

    /// Construct with an explicit configuration and the real system clock.
    pub fn new(config: BrokerageConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Brokerage<C> {
    /// Construct with an explicit configuration and clock.
    pub fn with_clock(config: BrokerageConfig, clock: C) -> Self {
        Self::with_clock_and_identity(config, clock, host_identity::resolve())
    }

    /// Construct with an explicit configuration, clock, and host identity.
    /// Exists mainly for tests that need a deterministic identity rather
    /// than whatever the test host's real hostname happens to be.
    pub fn with_clock_and_identity(
        config: BrokerageConfig,
        clock: C,
        identity: HostIdentity,
    ) -> Self {
        if config.is_none() {
            warn!(
                "brokerage unconfigured: set {} or {}",
                brokerage_core::env::COORDINATOR_VAR,
                brokerage_core::env::BROKERAGE_PATH_VAR
            );
        }
        Self {
            config,
            identity,
            availability: Availability::new(clock, Duration::from_millis(THROTTLE_MS)),
            pending: new_pending_slot(),
        }
    }

    /// The local host identity used for the self-filter and, on the
    /// filesystem backend, the sentinel filename.
    pub fn host_identity(&self) -> &HostIdentity {
        &self.identity
    }

    /// The configured rendezvous root, or `None` when the backend isn't
    /// the filesystem.
    pub fn brokerage_root(&self) -> Option<PathBuf> {
        self.config.effective_root()
    }

    /// Returns a (possibly empty) list of reachable worker addresses,
    /// excluding this host and the loopback address. Never fails: every
    /// error is absorbed and logged, and an empty list is returned.
    pub async fn find_workers(&self) -> Vec<String> {
        let raw = match &self.config {
            BrokerageConfig::Coordinator { address, port } => {
                match coordinator::request_worker_list(address, *port, &self.pending).await {
                    Ok(addresses) => addresses.into_iter().map(|a| a.to_string()).collect(),
                    Err(e) => {
                        // Coordinator configured but unreachable: does not
                        // fall through to a filesystem backend, even if one
                        // happens to also be configured — the two modes
                        // are exclusive.
                        warn!("coordinator unreachable, returning no workers: {e}");
                        Vec::new()
                    }
                }
            }
            BrokerageConfig::Filesystem { .. } => match self.config.effective_root() {
                Some(root) => filesystem::enumerate(&root).await,
                None => Vec::new(),
            },
            BrokerageConfig::None => {
                warn!("FindWorkers called with no brokerage backend configured");
                Vec::new()
            }
        };

        self.filter_self_and_loopback(raw)
    }

    /// Callback sink invoked by the wire layer when a worker-list response
    /// arrives. Safe to call from a different thread than the one blocked
    /// in `find_workers`; takes ownership of `addresses`.
    pub fn update_worker_list(&self, addresses: Vec<Ipv4Addr>) {
        coordinator::deliver(&self.pending, addresses);
    }

    /// Advertise (`true`) or revoke (`false`) this worker's availability.
    /// `AvailabilityState` is updated to `available` unconditionally,
    /// regardless of whether an underlying announce/revoke succeeded.
    pub async fn set_availability(&self, available: bool) {
        if available {
            self.announce_if_due().await;
        } else {
            if self.availability.is_available() {
                self.revoke().await;
            }
            // SetAvailability(false) always restarts the timer, even when
            // the state didn't actually change.
            self.availability.restart();
        }
        self.availability.set_state(available);
    }

    async fn announce_if_due(&self) {
        let was_available = self.availability.is_available();
        if was_available && !self.availability.due() {
            return;
        }

        match &self.config {
            BrokerageConfig::Coordinator { address, port } => {
                match coordinator::set_worker_status(address, *port, true).await {
                    Ok(()) => self.availability.restart(),
                    Err(e) => warn!("failed to announce availability to coordinator: {e}"),
                }
            }
            BrokerageConfig::Filesystem { .. } => {
                let Some(root) = self.config.effective_root() else { return };
                if was_available && filesystem::sentinel_exists(&root, &self.identity).await {
                    // Sentinel still present: a genuine external cleanup
                    // would have removed it. Leave the timer alone so the
                    // next tick can still observe and repair a real removal.
                    return;
                }
                if filesystem::announce(&root, &self.identity).await {
                    self.availability.restart();
                } else {
                    warn!("failed to create sentinel file; will retry on the next throttle tick");
                }
            }
            BrokerageConfig::None => {
                warn!("SetAvailability(true) ignored: brokerage unconfigured");
            }
        }
    }

    async fn revoke(&self) {
        match &self.config {
            BrokerageConfig::Coordinator { address, port } => {
                if let Err(e) = coordinator::set_worker_status(address, *port, false).await {
                    warn!("failed to revoke availability with coordinator: {e}");
                }
            }
            BrokerageConfig::Filesystem { .. } => {
                if let Some(root) = self.config.effective_root() {
                    filesystem::revoke(&root, &self.identity).await;
                }
            }
            BrokerageConfig::None => {}
        }
    }

    /// Drops entries matching the local host identity (case-insensitive)
    /// or the literal loopback address, preserving the order of the rest.
    fn filter_self_and_loopback(&self, addresses: Vec<String>) -> Vec<String> {
        addresses
            .into_iter()
            .filter(|addr| !self.identity.matches(addr) && addr != "127.0.0.1")
            .collect()
    }
}

impl<C: Clock> Drop for Brokerage<C> {
    fn drop(&mut self) {
        if !self.availability.is_available() || !self.config.is_filesystem() {
            return;
        }
        if let Some(root) = self.config.effective_root() {
            filesystem::revoke_sync(&root, &self.identity);
        }
    }
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
