// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared-filesystem rendezvous backend.
//!
//! Each available worker touches a zero-byte sentinel file named after
//! its host identity under the versioned rendezvous directory; clients
//! enumerate that directory to discover workers.

use std::io;
use std::path::Path;

use brokerage_core::HostIdentity;
use tracing::warn;

/// Non-recursive listing of the rendezvous directory. A missing directory
/// is "no workers", not an error.
pub(crate) async fn enumerate(root: &Path) -> Vec<String> {
    let mut entries = match tokio::fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %root.display(), "rendezvous directory missing; reporting no workers");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %root.display(), error = %e, "failed to list rendezvous directory");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(path = %root.display(), error = %e, "error while listing rendezvous directory");
                break;
            }
        }
    }
    names
}

/// Create the sentinel file for `identity` under `root`, creating the
/// directory first if needed. A pre-existing sentinel is not an error.
/// Returns whether the host can now be considered announced.
pub(crate) async fn announce(root: &Path, identity: &HostIdentity) -> bool {
    if let Err(e) = tokio::fs::create_dir_all(root).await {
        warn!(path = %root.display(), error = %e, "failed to create rendezvous directory");
        return false;
    }

    let path = root.join(identity.as_str());
    match tokio::fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to create sentinel file");
            false
        }
    }
}

/// Delete the sentinel file for `identity`. Absence is not an error.
pub(crate) async fn revoke(root: &Path, identity: &HostIdentity) -> bool {
    let path = root.join(identity.as_str());
    match tokio::fs::remove_file(&path).await {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove sentinel file");
            false
        }
    }
}

pub(crate) async fn sentinel_exists(root: &Path, identity: &HostIdentity) -> bool {
    tokio::fs::try_exists(root.join(identity.as_str())).await.unwrap_or(false)
}

/// Synchronous sentinel removal for use from `Drop`, where async I/O
/// can't be awaited. Best-effort: errors are logged, not propagated.
pub(crate) fn revoke_sync(root: &Path, identity: &HostIdentity) {
    let path = root.join(identity.as_str());
    if let Err(e) = std::fs::remove_file(&path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove sentinel file on drop");
        }
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
