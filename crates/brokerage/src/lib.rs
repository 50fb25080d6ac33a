// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker brokerage: discovery and availability for a distributed build
//! farm.
//!
//! Clients call [`Brokerage::find_workers`] to learn which workers are
//! currently reachable; workers call [`Brokerage::set_availability`] to
//! advertise or revoke their own reachability. Both route through either
//! a coordinator RPC or a shared-filesystem rendezvous, selected once at
//! construction from [`brokerage_core::BrokerageConfig`].

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod coordinator;
mod facade;
mod filesystem;
mod throttle;

pub use coordinator::CoordinatorError;
pub use facade::Brokerage;

pub use brokerage_core::{BrokerageConfig, Clock, FakeClock, HostIdentity, SystemClock};
