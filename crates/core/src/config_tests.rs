// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::host_identity::HostIdentity;
use serial_test::serial;

fn clear_env() {
    std::env::remove_var(env::COORDINATOR_VAR);
    std::env::remove_var(env::BROKERAGE_PATH_VAR);
}

#[test]
#[serial]
fn from_env_disabled_when_nothing_set() {
    clear_env();
    assert_eq!(BrokerageConfig::from_env(), BrokerageConfig::None);
}

#[test]
#[serial]
fn from_env_prefers_coordinator_over_filesystem() {
    clear_env();
    std::env::set_var(env::COORDINATOR_VAR, "10.0.0.1");
    std::env::set_var(env::BROKERAGE_PATH_VAR, "/srv/fb");
    let config = BrokerageConfig::from_env();
    assert_eq!(
        config,
        BrokerageConfig::Coordinator {
            address: "10.0.0.1".to_string(),
            port: env::COORDINATOR_PORT
        }
    );
    clear_env();
}

#[test]
#[serial]
fn from_env_falls_back_to_filesystem() {
    clear_env();
    std::env::set_var(env::BROKERAGE_PATH_VAR, "/srv/fb");
    let config = BrokerageConfig::from_env();
    assert_eq!(config, BrokerageConfig::Filesystem { root: PathBuf::from("/srv/fb") });
    clear_env();
}

#[test]
#[serial]
fn explicit_override_beats_environment() {
    clear_env();
    std::env::set_var(env::BROKERAGE_PATH_VAR, "/srv/fb");
    let config = BrokerageConfig::resolve(Some(("10.0.0.9".to_string(), 9999)));
    assert_eq!(
        config,
        BrokerageConfig::Coordinator { address: "10.0.0.9".to_string(), port: 9999 }
    );
    clear_env();
}

#[test]
fn effective_root_embeds_protocol_version_and_os_tag() {
    let config = BrokerageConfig::Filesystem { root: PathBuf::from("/srv/fb") };
    let root = config.effective_root().expect("filesystem backend has a root");
    let expected =
        PathBuf::from("/srv/fb").join("main").join(format!("{}.{}", PROTOCOL_VERSION, os_tag()));
    assert_eq!(root, expected);
}

#[test]
fn effective_root_is_none_for_coordinator_and_disabled() {
    let coordinator = BrokerageConfig::Coordinator { address: "x".to_string(), port: 1 };
    let disabled = BrokerageConfig::None;
    assert_eq!(coordinator.effective_root(), None);
    assert_eq!(disabled.effective_root(), None);
}

#[test]
fn sentinel_path_joins_root_and_identity() {
    let config = BrokerageConfig::Filesystem { root: PathBuf::from("/srv/fb") };
    let identity = HostIdentity::new("build-07");
    let path = config.sentinel_path(&identity).expect("filesystem backend has a sentinel path");
    assert!(path.ends_with("build-07"));
    assert!(path.starts_with("/srv/fb"));
}

#[test]
fn predicates_match_exactly_one_variant() {
    let fs = BrokerageConfig::Filesystem { root: PathBuf::from("/x") };
    assert!(fs.is_filesystem() && !fs.is_coordinator() && !fs.is_none());

    let coord = BrokerageConfig::Coordinator { address: "x".to_string(), port: 1 };
    assert!(coord.is_coordinator() && !coord.is_filesystem() && !coord.is_none());

    let none = BrokerageConfig::None;
    assert!(none.is_none() && !none.is_filesystem() && !none.is_coordinator());
}
