//! Geomark client library.
//!
//! The client-side half of the annotation sync model: an in-memory mirror
//! of the active dataset's annotations, kept consistent purely from
//! server-confirmed state. Clients never apply optimistic local updates —
//! a mutation is visible only once its fan-out event (or a full reload)
//! arrives, so every connected client converges on the same record set
//! without reconciliation logic.
//!
//! - [`cache`] — the [`AnnotationCache`](cache::AnnotationCache) mirror and
//!   the [`MapSurface`](cache::MapSurface) rendering seam.
//! - [`session`] — the [`SessionState`](session::SessionState) controller
//!   owning cache, surface, and API client.
//! - [`api`] — HTTP client for the annotation service.
//! - [`feed`] — WebSocket event feed with exponential-backoff reconnect.
//! - [`draw`] — the click-by-click shape construction state machine.

pub mod api;
pub mod cache;
pub mod draw;
pub mod feed;
pub mod session;

pub use api::{AnnotationDraft, ApiClient, ClientError};
pub use cache::{AnnotationCache, MapSurface};
pub use draw::{DrawTool, ShapeDraft};
pub use feed::{EventFeed, FeedNotice};
pub use session::SessionState;
