//! Route definitions for the static catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes, merged into `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nasa-layers", get(catalog::nasa_layers))
        .route("/celestial-info/{body}", get(catalog::celestial_info))
}
