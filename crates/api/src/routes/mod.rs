//! Route definitions.

pub mod annotation;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(annotation::router())
        .merge(catalog::router())
}
