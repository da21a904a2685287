//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Every committed annotation mutation is published here exactly once, in
//! commit order, by the request that performed it. Subscribers (the
//! WebSocket broadcaster, tests) each receive every event independently.
//! Delivery is fire-and-forget: there is no backlog for late subscribers
//! and no acknowledgment — a client that misses events recovers with a
//! full reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use geomark_core::annotation::Annotation;
use geomark_core::types::DbId;

// ---------------------------------------------------------------------------
// AnnotationEvent
// ---------------------------------------------------------------------------

/// A committed annotation mutation.
///
/// Serializes to the WebSocket wire format:
///
/// ```json
/// {"type": "new_annotation", "data": { ...full record... }}
/// {"type": "annotation_deleted", "data": 17}
/// ```
///
/// Create events carry the full persisted record for every dataset;
/// filtering by the active dataset happens client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AnnotationEvent {
    NewAnnotation(Annotation),
    AnnotationDeleted(DbId),
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`AnnotationEvent`].
pub struct EventBus {
    sender: broadcast::Sender<AnnotationEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: AnnotationEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus from now on.
    ///
    /// Events published before the subscription are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<AnnotationEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
