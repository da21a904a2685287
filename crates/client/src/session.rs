//! Session controller.
//!
//! [`SessionState`] is the explicit session-state object owned by the UI:
//! it ties the annotation cache, the rendering surface, and the API client
//! together, and is passed to event/render plumbing instead of living in
//! ambient globals.
//!
//! Mutations follow the server-confirms-then-broadcasts path exclusively:
//! [`create`](SessionState::create) and [`delete`](SessionState::delete)
//! only talk to the server and never touch the cache. Client state changes
//! when the echoed fan-out event arrives (or on a full reload), which is
//! what makes every connected client converge on the same record set.

use geomark_core::annotation::{Annotation, Dataset};
use geomark_core::shape::Shape;
use geomark_core::types::DbId;
use geomark_events::AnnotationEvent;

use crate::api::{AnnotationDraft, ApiClient, ClientError};
use crate::cache::{redraw, AnnotationCache, MapSurface};
use crate::feed::FeedNotice;

/// Per-session client state: cache + surface + service client.
pub struct SessionState<S: MapSurface> {
    api: ApiClient,
    surface: S,
    cache: AnnotationCache,
}

impl<S: MapSurface> SessionState<S> {
    /// Create a session viewing `dataset`, initially empty.
    ///
    /// Call [`reload`](Self::reload) (or wait for the feed's `Connected`
    /// notice) to populate it.
    pub fn new(api: ApiClient, surface: S, dataset: Dataset) -> Self {
        Self {
            api,
            surface,
            cache: AnnotationCache::new(dataset),
        }
    }

    pub fn cache(&self) -> &AnnotationCache {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Fetch the full current set for `dataset` and replace the cache.
    ///
    /// Runs on initial load, dataset switch, and feed reconnect; this is
    /// the sole consistency-repair mechanism against missed fan-out events.
    pub async fn reload(&mut self, dataset: Dataset) -> Result<(), ClientError> {
        let records = self.api.list(Some(dataset)).await?;
        self.apply_reload(dataset, records);
        Ok(())
    }

    /// Switch the active dataset (clears cache and overlays, then reloads).
    pub async fn switch_dataset(&mut self, dataset: Dataset) -> Result<(), ClientError> {
        self.reload(dataset).await
    }

    /// Install a fetched record set without going through the network.
    pub fn apply_reload(&mut self, dataset: Dataset, records: Vec<Annotation>) {
        self.cache.reload(dataset, records);
        redraw(&self.cache, &mut self.surface);
    }

    /// Apply one fan-out event to the session.
    ///
    /// Creates add a single overlay and re-render the list; deletes clear
    /// and redraw every overlay from the updated cache. Duplicate or
    /// out-of-scope events are no-ops.
    pub fn apply_event(&mut self, event: AnnotationEvent) {
        match event {
            AnnotationEvent::NewAnnotation(annotation) => {
                if self.cache.apply_create(annotation.clone()) {
                    self.surface
                        .add_shape(&annotation, Shape::from_annotation(&annotation));
                    self.surface.render_list(&self.cache.ordered());
                }
            }
            AnnotationEvent::AnnotationDeleted(id) => {
                if self.cache.apply_delete(id) {
                    redraw(&self.cache, &mut self.surface);
                }
            }
        }
    }

    /// React to a feed notice.
    ///
    /// A (re)connect triggers a full reload of the active dataset — the
    /// server keeps no backlog for the time we were away.
    pub async fn handle_notice(&mut self, notice: FeedNotice) -> Result<(), ClientError> {
        match notice {
            FeedNotice::Connected => self.reload(self.cache.dataset()).await,
            FeedNotice::Event(event) => {
                self.apply_event(event);
                Ok(())
            }
            FeedNotice::Disconnected => {
                tracing::debug!("Event feed dropped; awaiting reconnect");
                Ok(())
            }
        }
    }

    /// Submit a new annotation.
    ///
    /// Deliberately does NOT insert into the cache: the record becomes
    /// visible when our own echoed `new_annotation` event arrives.
    pub async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, ClientError> {
        self.api.create(draft).await
    }

    /// Request deletion of an annotation. Cache removal happens on the
    /// echoed `annotation_deleted` event.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.api.delete(id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
