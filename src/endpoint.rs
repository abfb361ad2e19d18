//! Purpose: HTTP listener for game state integration POST requests.
//! Exports: `StateSlot`, `GsiServer`.
//! Role: Receives each snapshot document over HTTP and hands it to a
//! consumer through a single-slot newest-wins buffer.
//! Invariants: At most one snapshot is buffered; a new POST overwrites the
//! slot under the lock. Readers may atomically clear the slot so a stale
//! snapshot is never read twice.
//! Invariants: The core decode stays out of the listener; the slot stores
//! the raw document.

use crate::core::{Error, ErrorKind};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Single mutable "latest received document" slot. Writers overwrite under
/// the lock on every inbound snapshot; readers poll or block until a
/// snapshot is present.
#[derive(Debug, Default)]
pub struct StateSlot {
    slot: Mutex<Option<Value>>,
    signal: Condvar,
}

impl StateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the newest snapshot, dropping any unread predecessor.
    pub fn store(&self, value: Value) {
        let mut slot = self.slot.lock().unwrap_or_else(|poison| poison.into_inner());
        *slot = Some(value);
        self.signal.notify_all();
    }

    /// Reads the current snapshot. With `reset` the slot is cleared in the
    /// same critical section, so no other reader sees the same document.
    /// With `block` the call waits until a snapshot arrives.
    pub fn read(&self, reset: bool, block: bool) -> Option<Value> {
        let mut slot = self.slot.lock().unwrap_or_else(|poison| poison.into_inner());
        if block {
            while slot.is_none() {
                slot = self
                    .signal
                    .wait(slot)
                    .unwrap_or_else(|poison| poison.into_inner());
            }
        }
        if reset {
            slot.take()
        } else {
            slot.clone()
        }
    }

    /// Like `read(reset, true)` but gives up after `timeout`.
    pub fn read_timeout(&self, reset: bool, timeout: Duration) -> Option<Value> {
        let mut slot = self.slot.lock().unwrap_or_else(|poison| poison.into_inner());
        let (guard, result) = self
            .signal
            .wait_timeout_while(slot, timeout, |slot| slot.is_none())
            .unwrap_or_else(|poison| poison.into_inner());
        slot = guard;
        if result.timed_out() && slot.is_none() {
            return None;
        }
        if reset {
            slot.take()
        } else {
            slot.clone()
        }
    }
}

/// Background HTTP endpoint accepting game state integration POSTs.
pub struct GsiServer {
    slot: Arc<StateSlot>,
    local_addr: SocketAddr,
}

impl GsiServer {
    /// Binds `127.0.0.1:<port>` and serves `POST <path>` on a background
    /// thread. Port 0 picks a free port; see `local_addr`.
    pub fn spawn(path: &str, port: u16) -> Result<Self, Error> {
        let route = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let slot = Arc::new(StateSlot::new());
        let app = Router::new()
            .route(&route, post(receive_snapshot))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&slot));

        let (addr_tx, addr_rx) = std::sync::mpsc::channel::<Result<SocketAddr, std::io::Error>>();
        std::thread::Builder::new()
            .name("csgsi-endpoint".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_io()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = addr_tx.send(Err(err));
                        return;
                    }
                };
                runtime.block_on(async move {
                    let listener =
                        match tokio::net::TcpListener::bind(("127.0.0.1", port)).await {
                            Ok(listener) => listener,
                            Err(err) => {
                                let _ = addr_tx.send(Err(err));
                                return;
                            }
                        };
                    let local_addr = match listener.local_addr() {
                        Ok(addr) => addr,
                        Err(err) => {
                            let _ = addr_tx.send(Err(err));
                            return;
                        }
                    };
                    let _ = addr_tx.send(Ok(local_addr));
                    tracing::info!(%local_addr, "game state endpoint listening");
                    if let Err(err) = axum::serve(listener, app).await {
                        tracing::error!(error = %err, "game state endpoint stopped");
                    }
                });
            })
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to spawn endpoint thread")
                    .with_source(err)
            })?;

        let local_addr = addr_rx
            .recv()
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("endpoint thread exited before binding")
                    .with_source(err)
            })?
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!("failed to bind 127.0.0.1:{port}"))
                    .with_source(err)
            })?;

        Ok(Self { slot, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn slot(&self) -> &Arc<StateSlot> {
        &self.slot
    }

    /// Reads the latest raw snapshot document; see `StateSlot::read`.
    pub fn read(&self, reset: bool, block: bool) -> Option<Value> {
        self.slot.read(reset, block)
    }
}

async fn receive_snapshot(
    State(slot): State<Arc<StateSlot>>,
    body: String,
) -> (StatusCode, &'static str) {
    match serde_json::from_str::<Value>(&body) {
        Ok(document) => {
            tracing::debug!(bytes = body.len(), "snapshot received");
            slot.store(document);
            (StatusCode::OK, "OK")
        }
        Err(err) => {
            // The listener decides to drop-and-log; the core never sees a
            // body that is not JSON.
            tracing::warn!(error = %err, "dropping non-JSON snapshot body");
            (StatusCode::BAD_REQUEST, "invalid JSON body")
        }
    }
}
