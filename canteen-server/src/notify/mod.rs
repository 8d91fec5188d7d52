//! Order Notifier
//!
//! In-process registry of WebSocket connections keyed by user. A user
//! may hold several connections (phone and kiosk at once); each gets
//! its own outbound channel. Delivery is best-effort: a full channel
//! drops the message, a closed one evicts the connection on the next
//! push.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::db::models::Order;

/// Event pushed to connected clients
///
/// Serializes as `{"type": "orderUpdate", "data": {...}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum WsEvent<'a> {
    /// Order changed (status or kitchen estimate)
    OrderUpdate(&'a Order),
}

/// Connection registry and push fan-out
#[derive(Clone, Debug)]
pub struct OrderNotifier {
    connections: Arc<DashMap<String, HashMap<String, mpsc::Sender<String>>>>,
}

impl OrderNotifier {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Register a connection for `user_id`
    pub fn register(&self, user_id: &str, conn_id: &str, tx: mpsc::Sender<String>) {
        self.connections
            .entry(user_id.to_string())
            .or_default()
            .insert(conn_id.to_string(), tx);
    }

    /// Drop a connection; the user entry goes with its last connection
    pub fn unregister(&self, user_id: &str, conn_id: &str) {
        let now_empty = match self.connections.get_mut(user_id) {
            Some(mut conns) => {
                conns.remove(conn_id);
                conns.is_empty()
            }
            None => false,
        };
        if now_empty {
            // Re-checked under the entry lock; a racing register wins
            self.connections.remove_if(user_id, |_, conns| conns.is_empty());
        }
    }

    /// Push an event to every connection of `user_id`
    ///
    /// Returns the number of connections the event was handed to.
    pub fn notify(&self, user_id: &str, event: &WsEvent<'_>) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to serialize push event: {}", e);
                return 0;
            }
        };

        let Some(mut conns) = self.connections.get_mut(user_id) else {
            return 0;
        };

        let mut delivered = 0;
        conns.retain(|_, tx| match tx.try_send(payload.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
        delivered
    }

    /// Number of live connections for `user_id`
    pub fn connection_count(&self, user_id: &str) -> usize {
        self.connections.get(user_id).map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for OrderNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderStatus};

    fn make_order(user_id: &str, status: OrderStatus) -> Order {
        Order {
            id: None,
            user_id: user_id.to_string(),
            items: vec![OrderItem {
                food_item_id: "food_item:dosa".to_string(),
                name: "Masala Dosa".to_string(),
                price: 6000,
                quantity: 1,
            }],
            total_amount: 6000,
            status,
            payment: None,
            estimated_ready_time: None,
            created_at: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_notify_reaches_registered_connection() {
        let notifier = OrderNotifier::new();
        let (tx, mut rx) = mpsc::channel(8);
        notifier.register("user1", "conn1", tx);

        let order = make_order("user1", OrderStatus::Preparing);
        let delivered = notifier.notify("user1", &WsEvent::OrderUpdate(&order));
        assert_eq!(delivered, 1);

        let payload = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["type"], "orderUpdate");
        assert_eq!(value["data"]["status"], "preparing");
        assert_eq!(value["data"]["userId"], "user1");
    }

    #[tokio::test]
    async fn test_notify_fans_out_to_all_user_connections() {
        let notifier = OrderNotifier::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        notifier.register("user1", "phone", tx1);
        notifier.register("user1", "kiosk", tx2);

        let order = make_order("user1", OrderStatus::Ready);
        assert_eq!(notifier.notify("user1", &WsEvent::OrderUpdate(&order)), 2);
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_notify_unknown_user_is_silent() {
        let notifier = OrderNotifier::new();
        let order = make_order("ghost", OrderStatus::Pending);
        assert_eq!(notifier.notify("ghost", &WsEvent::OrderUpdate(&order)), 0);
    }

    #[tokio::test]
    async fn test_closed_connection_is_evicted() {
        let notifier = OrderNotifier::new();
        let (tx, rx) = mpsc::channel(8);
        notifier.register("user1", "conn1", tx);
        drop(rx);

        let order = make_order("user1", OrderStatus::Ready);
        assert_eq!(notifier.notify("user1", &WsEvent::OrderUpdate(&order)), 0);
        assert_eq!(notifier.connection_count("user1"), 0);
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        let notifier = OrderNotifier::new();
        let (tx, _rx) = mpsc::channel(8);
        notifier.register("user1", "conn1", tx);
        assert_eq!(notifier.connection_count("user1"), 1);

        notifier.unregister("user1", "conn1");
        assert_eq!(notifier.connection_count("user1"), 0);

        let order = make_order("user1", OrderStatus::Completed);
        assert_eq!(notifier.notify("user1", &WsEvent::OrderUpdate(&order)), 0);
    }

    #[tokio::test]
    async fn test_other_users_do_not_receive() {
        let notifier = OrderNotifier::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        notifier.register("user1", "conn1", tx1);
        notifier.register("user2", "conn1", tx2);

        let order = make_order("user1", OrderStatus::Preparing);
        assert_eq!(notifier.notify("user1", &WsEvent::OrderUpdate(&order)), 1);

        assert!(rx1.recv().await.is_some());
        assert!(rx2.try_recv().is_err());
    }
}
