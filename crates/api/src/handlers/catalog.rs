//! Handlers for the static imagery-layer and celestial-body catalogs.
//!
//! Presentation support for the map UI; these endpoints never touch the
//! store.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use geomark_core::{celestial, imagery};

/// GET /api/nasa-layers
///
/// The built-in WMTS imagery layer descriptors.
pub async fn nasa_layers() -> Json<&'static [imagery::ImageryLayer]> {
    Json(imagery::GIBS_LAYERS)
}

/// GET /api/celestial-info/{body}
///
/// Descriptive facts for earth, moon, or mars; 404 for anything else.
pub async fn celestial_info(Path(body): Path<String>) -> Response {
    match celestial::lookup(&body) {
        Some(info) => Json(info).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Celestial body not found" })),
        )
            .into_response(),
    }
}
