//! Live replay channel: streams the historical dataset row-by-row to each
//! connected client on a fixed schedule.
//!
//! Every subscriber gets its own cursor and timer, so concurrent clients
//! replay the full sequence independently from row zero. There is no
//! resumption and no backpressure; the only cancellation signal is the
//! client going away.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use market_data::{PriceRow, ReplayCursor};

use crate::AppState;

/// Registry entry for one live connection.
#[derive(Debug, Clone)]
pub struct SubscriberInfo {
    pub connected_at: DateTime<Utc>,
}

/// Process-wide set of currently connected replay subscribers. Constructed
/// once at startup and owned by `AppState`.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    subscribers: DashMap<Uuid, SubscriberInfo>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.subscribers.insert(
            id,
            SubscriberInfo {
                connected_at: Utc::now(),
            },
        );
        id
    }

    pub fn unregister(&self, id: &Uuid) {
        self.subscribers.remove(id);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/ws", get(ws_handler))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_replay_socket(socket, state))
}

async fn handle_replay_socket(socket: WebSocket, state: AppState) {
    let id = state.registry.register();
    tracing::info!(subscriber = %id, total = state.registry.len(), "New client connected");

    let (mut sender, mut receiver) = socket.split();

    let cursor = ReplayCursor::new(state.dataset.clone());
    let (tx, mut rx) = mpsc::channel::<PriceRow>(16);
    let replay_task = tokio::spawn(run_replay(cursor, state.config.replay_interval, tx));

    // Forward replayed rows to the client; when the replay ends (dataset
    // exhausted), close the channel from our side.
    let mut send_task = tokio::spawn(async move {
        while let Some(row) = rx.recv().await {
            let json = match serde_json::to_string(&row) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode replay row");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    // Inbound: the only recognized message is a client log; everything
    // else is ignored.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => handle_client_message(&text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    replay_task.abort();

    state.registry.unregister(&id);
    tracing::info!(subscriber = %id, total = state.registry.len(), "Client disconnected");
}

/// Emit one row per tick until the cursor is exhausted or the receiver is
/// gone. Dropping the sender is the exhaustion signal to the forward task.
async fn run_replay(mut cursor: ReplayCursor, interval: Duration, tx: mpsc::Sender<PriceRow>) {
    loop {
        tokio::time::sleep(interval).await;
        match cursor.next_row() {
            Some(row) => {
                if tx.send(row).await.is_err() {
                    break;
                }
            }
            None => break,
        }
    }
}

fn handle_client_message(text: &str) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };
    if value.get("type").and_then(|t| t.as_str()) == Some("log") {
        let content = value
            .get("content")
            .map(|c| c.to_string())
            .unwrap_or_default();
        tracing::info!(%content, "Client log");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data::ReplayDataset;
    use std::sync::Arc;

    fn sample_dataset(n: usize) -> Arc<ReplayDataset> {
        let rows = (0..n)
            .map(|i| PriceRow::from_fields(format!("t{i},{i}.0").split(',')))
            .collect();
        Arc::new(ReplayDataset::from_rows(rows))
    }

    async fn collect_replay(dataset: Arc<ReplayDataset>) -> Vec<PriceRow> {
        let (tx, mut rx) = mpsc::channel(16);
        let task = tokio::spawn(run_replay(
            ReplayCursor::new(dataset),
            Duration::from_secs(1),
            tx,
        ));

        let mut rows = Vec::new();
        while let Some(row) = rx.recv().await {
            rows.push(row);
        }
        task.await.unwrap();
        rows
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_sends_every_row_once_in_order_then_ends() {
        let rows = collect_replay(sample_dataset(5)).await;

        let times: Vec<_> = rows.iter().map(|r| r.datetime.clone().unwrap()).collect();
        assert_eq!(times, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_of_empty_dataset_ends_immediately() {
        let rows = collect_replay(sample_dataset(0)).await;
        assert!(rows.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_subscribers_replay_independently() {
        let dataset = sample_dataset(3);

        let a = tokio::spawn(collect_replay(dataset.clone()));
        // Stagger the second subscriber; it must still start from row zero
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let b = tokio::spawn(collect_replay(dataset));

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        assert_eq!(a[0].datetime.as_deref(), Some("t0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_stops_when_receiver_dropped() {
        let (tx, mut rx) = mpsc::channel(16);
        let task = tokio::spawn(run_replay(
            ReplayCursor::new(sample_dataset(100)),
            Duration::from_secs(1),
            tx,
        ));

        // Simulate a disconnect after two rows
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
        drop(rx);

        task.await.unwrap();
    }

    #[test]
    fn test_registry_register_unregister() {
        let registry = SessionRegistry::new();
        let a = registry.register();
        let b = registry.register();
        assert_eq!(registry.len(), 2);
        assert_ne!(a, b);

        registry.unregister(&a);
        assert_eq!(registry.len(), 1);
        registry.unregister(&b);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_client_log_message_is_recognized() {
        // Only checks these don't panic; the log side effect is tracing output
        handle_client_message(r#"{"type":"log","content":{"Decision":"BUY"}}"#);
        handle_client_message(r#"{"type":"other"}"#);
        handle_client_message("not json at all");
    }
}
