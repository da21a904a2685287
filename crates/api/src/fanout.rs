//! Event-to-WebSocket fan-out.
//!
//! [`EventBroadcaster`] subscribes to the annotation event bus and pushes
//! every committed mutation to all connected sessions, in commit order.
//! Delivery is at-most-once best-effort: there is no replay buffer and no
//! acknowledgment, and sessions that connect after a commit receive nothing
//! retroactively for it — a full reload is the only recovery path.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use geomark_events::AnnotationEvent;

use crate::ws::WsManager;

/// Forwards committed annotation mutations to all WebSocket sessions.
///
/// Events are broadcast unfiltered — every session receives every dataset's
/// mutations; filtering by the active dataset happens client-side.
pub struct EventBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl EventBroadcaster {
    /// Create a new broadcaster pushing through the given connection manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main fan-out loop.
    ///
    /// Consumes events from the broadcast channel until it is closed (i.e.
    /// the [`EventBus`](geomark_events::EventBus) is dropped at shutdown).
    pub async fn run(self, mut receiver: broadcast::Receiver<AnnotationEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let frame = match serde_json::to_string(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode fan-out event");
                            continue;
                        }
                    };
                    self.ws_manager.broadcast(Message::Text(frame.into())).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event broadcaster lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, broadcaster shutting down");
                    break;
                }
            }
        }
    }
}
