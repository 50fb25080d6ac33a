// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator protocol messages.
//!
//! Two client-initiated messages: `RequestWorkerList` (no payload,
//! answered asynchronously with a worker list) and `SetWorkerStatus`
//! (one-byte boolean payload, no response awaited).

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Fixed TCP port the coordinator listens on.
pub const COORDINATOR_PORT: u16 = brokerage_core::env::COORDINATOR_PORT;

/// A message sent from a brokerage client (worker or build client) to the
/// coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Ask the coordinator for the current list of reachable workers.
    /// Answered with [`ServerMessage::WorkerList`].
    RequestWorkerList,
    /// Advertise or revoke availability. No response is awaited.
    SetWorkerStatus { available: bool },
}

/// A message sent from the coordinator back to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Response to [`ClientMessage::RequestWorkerList`]: packed IPv4
    /// addresses of workers the coordinator currently considers
    /// reachable, unfiltered (self- and loopback-filtering happens in the
    /// brokerage façade, not on the wire).
    WorkerList { addresses: Vec<Ipv4Addr> },
    /// Generic acknowledgement, used by the coordinator for requests that
    /// don't otherwise need a typed response.
    Ack,
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
