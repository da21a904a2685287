//! Client-side annotation mirror.
//!
//! [`AnnotationCache`] holds the annotations of the currently active
//! dataset, keyed by id. It is mutated only from server-confirmed state:
//! a full reload, or a fan-out event applied idempotently.

use std::collections::BTreeMap;

use geomark_core::annotation::{Annotation, Dataset};
use geomark_core::shape::Shape;
use geomark_core::types::DbId;

/// Rendering seam between the cache and whatever draws the map.
///
/// Implementations own the actual overlay/list widgets; the library only
/// tells them what to draw. Injected into rendering functions rather than
/// read from ambient scope.
pub trait MapSurface {
    /// Add one overlay for an annotation's decoded geometry.
    fn add_shape(&mut self, annotation: &Annotation, shape: Shape);

    /// Remove every overlay.
    fn clear_shapes(&mut self);

    /// Re-render the list panel from the given ordering.
    fn render_list(&mut self, ordered: &[&Annotation]);
}

/// In-memory mirror of "annotations for the currently active dataset."
#[derive(Debug)]
pub struct AnnotationCache {
    dataset: Dataset,
    entries: BTreeMap<DbId, Annotation>,
}

impl AnnotationCache {
    /// Create an empty cache for a dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            entries: BTreeMap::new(),
        }
    }

    /// The currently active dataset.
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Number of cached annotations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: DbId) -> Option<&Annotation> {
        self.entries.get(&id)
    }

    /// Replace the entire cache with a freshly fetched record set.
    ///
    /// This is the sole consistency-repair mechanism against missed fan-out
    /// events; it runs on dataset switch, initial load, and feed reconnect.
    /// Records from other datasets are dropped.
    pub fn reload(&mut self, dataset: Dataset, records: Vec<Annotation>) {
        self.dataset = dataset;
        self.entries = records
            .into_iter()
            .filter(|a| a.dataset == dataset)
            .map(|a| (a.id, a))
            .collect();
    }

    /// Apply a committed create event.
    ///
    /// Idempotent (duplicate delivery of the same id is a no-op) and scoped
    /// to the active dataset. Returns true when the cache changed.
    pub fn apply_create(&mut self, annotation: Annotation) -> bool {
        if annotation.dataset != self.dataset || self.entries.contains_key(&annotation.id) {
            return false;
        }
        self.entries.insert(annotation.id, annotation);
        true
    }

    /// Apply a committed delete event. Returns true when the cache changed.
    pub fn apply_delete(&mut self, id: DbId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// The list render order: created_at descending, id breaking ties.
    ///
    /// Recomputed from scratch on every call — a pure function of cache
    /// contents, so out-of-order event delivery can never leave the list
    /// drifted.
    pub fn ordered(&self) -> Vec<&Annotation> {
        let mut ordered: Vec<&Annotation> = self.entries.values().collect();
        ordered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        ordered
    }
}

/// Redraw a surface from scratch: clear all overlays, add one per cached
/// annotation (decoded through the shape codec), and re-render the list.
///
/// Deletes go through here instead of removing a single overlay, which
/// avoids partial-removal bugs from tracking an overlay-to-id mapping
/// separately.
pub fn redraw(cache: &AnnotationCache, surface: &mut dyn MapSurface) {
    surface.clear_shapes();
    for annotation in cache.ordered() {
        surface.add_shape(annotation, Shape::from_annotation(annotation));
    }
    surface.render_list(&cache.ordered());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
