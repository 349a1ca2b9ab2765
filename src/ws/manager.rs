//! WebSocket connection manager: hands out client ids and routes events to
//! individual connections or to everyone seated in a room.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

use super::messages::WsEvent;
use crate::lobby::ClientId;

/// Handle for a single WebSocket client. The handler owns the receiving
/// half; the manager keeps the sending half.
pub type ClientSender = mpsc::UnboundedSender<WsEvent>;

/// Tracks every open connection by id.
#[derive(Debug)]
pub struct WsManager {
    clients: RwLock<HashMap<ClientId, ClientSender>>,
    /// Monotonically increasing counter for client IDs.
    next_id: AtomicU64,
}

impl WsManager {
    /// Create a new, empty manager.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a new connection, returning (client_id, receiver).
    pub async fn register(&self) -> (ClientId, mpsc::UnboundedReceiver<WsEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients.write().await.insert(id, tx);
        debug!(client_id = id, "WS client registered");
        (id, rx)
    }

    pub async fn unregister(&self, client_id: ClientId) {
        self.clients.write().await.remove(&client_id);
        debug!(client_id, "WS client unregistered");
    }

    /// Send an event to one client.
    pub async fn send(&self, client_id: ClientId, event: WsEvent) {
        self.send_all(&[client_id], event).await;
    }

    /// Send an event to several clients, dropping any whose receiver is gone.
    pub async fn send_all(&self, client_ids: &[ClientId], event: WsEvent) {
        let clients = self.clients.read().await;
        let mut stale: Vec<ClientId> = Vec::new();
        for cid in client_ids {
            if let Some(tx) = clients.get(cid)
                && tx.send(event.clone()).is_err()
            {
                stale.push(*cid);
            }
        }
        drop(clients); // release read lock before write

        if !stale.is_empty() {
            let mut clients = self.clients.write().await;
            for cid in &stale {
                clients.remove(cid);
                warn!(client_id = cid, "removed stale WS client");
            }
        }
    }

    /// Total number of open connections.
    pub async fn connection_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
