// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host identity resolution.
//!
//! The identity resolved here is used both as the rendezvous sentinel
//! filename and as the self-filter key applied to worker lists. On
//! Darwin it is the IPv4 dotted-quad bound to `en0` (falling back to the
//! hostname when `en0` has no IPv4 address); on every other platform it
//! is simply the OS hostname.
//!
//! Resolution happens once, at brokerage construction, and the result is
//! immutable thereafter — matching the lifecycle described for
//! `HostIdentity` in the data model.

use tracing::warn;

/// A stable local identifier for this host within the fleet.
///
/// An empty identity is permitted (resolution never panics or errors) but
/// yields a degenerate sentinel path; callers should not treat an empty
/// identity as a reason to disable the brokerage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostIdentity(String);

impl HostIdentity {
    /// Wrap an already-known identity string (primarily for tests).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a worker address string, used
    /// by the self-filter. Intentionally asymmetric with the loopback
    /// filter, which compares literally — see the brokerage façade.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate)
    }
}

impl std::fmt::Display for HostIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the local host identity for the current platform.
pub fn resolve() -> HostIdentity {
    #[cfg(target_os = "macos")]
    {
        if let Some(addr) = darwin_primary_interface_ipv4("en0") {
            return HostIdentity(addr);
        }
    }

    HostIdentity(hostname_fallback())
}

/// OS hostname, used directly on Linux/Windows and as the Darwin fallback.
fn hostname_fallback() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("failed to resolve hostname: {e}");
            String::new()
        }
    }
}

#[cfg(target_os = "macos")]
fn darwin_primary_interface_ipv4(interface: &str) -> Option<String> {
    let interfaces = if_addrs::get_if_addrs()
        .map_err(|e| warn!("failed to enumerate network interfaces: {e}"))
        .ok()?;

    interfaces
        .into_iter()
        .find(|iface| iface.name == interface && iface.ip().is_ipv4())
        .map(|iface| iface.ip().to_string())
}

#[cfg(test)]
#[path = "host_identity_tests.rs"]
mod tests;
