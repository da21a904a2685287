//! Geomark fan-out event infrastructure.
//!
//! - [`AnnotationEvent`] — the typed mutation event, also the WebSocket
//!   wire format shared by server and client.
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.

pub mod bus;

pub use bus::{AnnotationEvent, EventBus};
