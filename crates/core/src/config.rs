// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend configuration: exactly one of filesystem rendezvous,
//! coordinator RPC, or disabled.

use std::path::{Path, PathBuf};

use crate::env::{self, os_tag, PROTOCOL_VERSION};
use crate::host_identity::HostIdentity;

/// Selects exactly one backend. Modeled as a sum type (rather than two
/// optional strings tested for emptiness) so backend exclusivity is a
/// type-level property: there is no representable state with both a
/// filesystem root and a coordinator address set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerageConfig {
    /// Shared-filesystem rendezvous rooted at the given user-provided
    /// path. The effective root used for sentinel files is derived from
    /// this via [`BrokerageConfig::effective_root`].
    Filesystem { root: PathBuf },
    /// Coordinator RPC endpoint.
    Coordinator { address: String, port: u16 },
    /// No backend configured; all brokerage operations become no-ops.
    None,
}

impl BrokerageConfig {
    /// Resolve configuration from the environment per the documented
    /// priority: `FASTBUILD_COORDINATOR` beats `FASTBUILD_BROKERAGE_PATH`,
    /// which beats disabling the brokerage entirely.
    pub fn from_env() -> Self {
        Self::resolve(None)
    }

    /// Resolve configuration, honoring an explicit coordinator override
    /// (e.g. a parsed CLI flag) ahead of the environment. When `override_coordinator`
    /// is `None`, this is identical to [`BrokerageConfig::from_env`].
    pub fn resolve(override_coordinator: Option<(String, u16)>) -> Self {
        if let Some((address, port)) = override_coordinator {
            return Self::Coordinator { address, port };
        }
        if let Some(address) = env::coordinator_address() {
            return Self::Coordinator { address, port: env::COORDINATOR_PORT };
        }
        if let Some(path) = env::brokerage_path() {
            return Self::Filesystem { root: PathBuf::from(path) };
        }
        Self::None
    }

    /// The versioned rendezvous directory sentinel files live under:
    /// `<root>/main/<protocol-version>.<os-tag>/`, terminated with the
    /// platform's native separator. `None` for non-filesystem backends.
    pub fn effective_root(&self) -> Option<PathBuf> {
        match self {
            Self::Filesystem { root } => Some(versioned_root(root)),
            Self::Coordinator { .. } | Self::None => None,
        }
    }

    /// The sentinel file path for the given host identity, or `None`
    /// when the backend is coordinator or disabled.
    pub fn sentinel_path(&self, identity: &HostIdentity) -> Option<PathBuf> {
        self.effective_root().map(|root| root.join(identity.as_str()))
    }

    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Filesystem { .. })
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, Self::Coordinator { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

fn versioned_root(root: &Path) -> PathBuf {
    root.join("main").join(format!("{}.{}", PROTOCOL_VERSION, os_tag()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
