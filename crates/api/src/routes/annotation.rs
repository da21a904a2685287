//! Route definitions for the annotation API.
//!
//! ```text
//! GET    /annotations            list_annotations (?dataset)
//! POST   /annotations            create_annotation
//! GET    /annotations/export     export_annotations (?dataset)
//! DELETE /annotations/{id}       delete_annotation
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Annotation routes, merged into `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/annotations",
            get(annotation::list_annotations).post(annotation::create_annotation),
        )
        .route("/annotations/export", get(annotation::export_annotations))
        .route("/annotations/{id}", delete(annotation::delete_annotation))
}
