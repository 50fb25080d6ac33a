// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator RPC client.
//!
//! Exactly one outstanding exchange at a time per brokerage instance: a
//! connection is opened, a single framed request is sent, and — for
//! `RequestWorkerList` — the caller blocks on a bounded rendezvous for the
//! coordinator's asynchronous reply. The connection is scoped to a single
//! exchange and released on every exit path; the coordinator never sees a
//! long-lived session from a single brokerage instance.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, warn};

use brokerage_core::env::CONNECT_TIMEOUT_MS;
use brokerage_wire::{read_framed, write_framed, ClientMessage, ServerMessage, WireError};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(CONNECT_TIMEOUT_MS);

/// Bound on how long `find_workers` waits for the coordinator's reply to
/// `RequestWorkerList`. The source protocol has no such bound (see
/// DESIGN.md); four times the connect timeout keeps the two knobs
/// correlated while staying comfortably inside a single throttle window.
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(CONNECT_TIMEOUT_MS * 4);

/// Rendezvous slot through which the reading half of a `RequestWorkerList`
/// exchange delivers the coordinator's reply to whatever is waiting in
/// `find_workers`: populated once by the wire layer, consumed once by the
/// current call.
pub(crate) type PendingSlot = Arc<Mutex<Option<oneshot::Sender<Vec<Ipv4Addr>>>>>;

pub(crate) fn new_pending_slot() -> PendingSlot {
    Arc::new(Mutex::new(None))
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("connect to coordinator timed out after 2000ms")]
    ConnectTimeout,
    #[error("failed to connect to coordinator: {0}")]
    Connect(#[source] std::io::Error),
    #[error("wire error: {0}")]
    Wire(#[from] WireError),
    #[error("coordinator did not respond within the bounded wait")]
    ResponseTimeout,
    #[error("response channel closed before a worker list arrived")]
    ResponseChannelClosed,
}

async fn connect(address: &str, port: u16) -> Result<TcpStream, CoordinatorError> {
    match timeout(CONNECT_TIMEOUT, TcpStream::connect((address, port))).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(CoordinatorError::Connect(e)),
        Err(_) => Err(CoordinatorError::ConnectTimeout),
    }
}

/// Send `SetWorkerStatus` and tear down immediately; fire-and-forget,
/// no response is awaited.
pub(crate) async fn set_worker_status(
    address: &str,
    port: u16,
    available: bool,
) -> Result<(), CoordinatorError> {
    let mut stream = connect(address, port).await?;
    write_framed(&mut stream, &ClientMessage::SetWorkerStatus { available }).await?;
    Ok(())
}

/// Send `RequestWorkerList` and block (with a bound) until the reply
/// arrives via `deliver`.
pub(crate) async fn request_worker_list(
    address: &str,
    port: u16,
    pending: &PendingSlot,
) -> Result<Vec<Ipv4Addr>, CoordinatorError> {
    let stream = connect(address, port).await?;
    let (mut reader, mut writer) = stream.into_split();

    let (tx, rx) = oneshot::channel();
    *pending.lock() = Some(tx);

    if let Err(e) = write_framed(&mut writer, &ClientMessage::RequestWorkerList).await {
        pending.lock().take();
        return Err(e.into());
    }

    // The "wire layer": a short-lived reader task that decodes exactly one
    // response and delivers it through the pending slot, independent of
    // the thread blocked below. Its handle is kept so every exit path below
    // can abort it — otherwise a stalled coordinator that never sends and
    // never closes its side would keep this task (and its half of the
    // socket) alive indefinitely past the bounded wait.
    let delivery = Arc::clone(pending);
    let reader_task = tokio::spawn(async move {
        match read_framed::<ServerMessage, _>(&mut reader).await {
            Ok(ServerMessage::WorkerList { addresses }) => deliver(&delivery, addresses),
            Ok(ServerMessage::Ack) => {
                warn!("coordinator replied Ack to RequestWorkerList; expected a worker list");
            }
            Err(e) => {
                debug!("coordinator connection closed before a worker list arrived: {e}");
            }
        }
    });

    match timeout(RESPONSE_TIMEOUT, rx).await {
        Ok(Ok(addresses)) => Ok(addresses),
        Ok(Err(_)) => {
            reader_task.abort();
            Err(CoordinatorError::ResponseChannelClosed)
        }
        Err(_) => {
            pending.lock().take();
            reader_task.abort();
            Err(CoordinatorError::ResponseTimeout)
        }
    }
}

/// Deliver a worker list to whichever call is waiting in
/// `request_worker_list`, if any. Safe to call from any thread.
pub(crate) fn deliver(pending: &PendingSlot, addresses: Vec<Ipv4Addr>) {
    if let Some(tx) = pending.lock().take() {
        let _ = tx.send(addresses);
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
