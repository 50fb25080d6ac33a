// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn client_message_round_trips_through_json() {
    let msg = ClientMessage::SetWorkerStatus { available: true };
    let json = serde_json::to_string(&msg).expect("serialize");
    let back: ClientMessage = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(msg, back);
}

#[test]
fn server_message_carries_packed_ipv4_addresses() {
    let msg = ServerMessage::WorkerList {
        addresses: vec![Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 0, 7)],
    };
    let json = serde_json::to_string(&msg).expect("serialize");
    let back: ServerMessage = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(msg, back);
}

#[test]
fn request_worker_list_has_no_payload() {
    let msg = ClientMessage::RequestWorkerList;
    let json = serde_json::to_string(&msg).expect("serialize");
    assert!(json.contains("RequestWorkerList"));
}
