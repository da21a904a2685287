//! Handlers for the annotation API.
//!
//! The only mutation entry point: every create and delete goes through
//! here, is validated, persisted, and then published on the event bus for
//! WebSocket fan-out. There is no update operation — annotations are
//! immutable once created.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use geomark_core::annotation::{Annotation, Dataset};
use geomark_core::error::CoreError;
use geomark_core::types::DbId;
use geomark_db::models::annotation::{CreateAnnotation, NewAnnotation};
use geomark_db::repositories::AnnotationRepo;
use geomark_events::AnnotationEvent;

use crate::error::AppResult;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Query filters
   -------------------------------------------------------------------------- */

/// Optional dataset scope for list and export.
#[derive(Debug, Deserialize)]
pub struct AnnotationListFilters {
    pub dataset: Option<Dataset>,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// GET /api/annotations
///
/// List annotations with `shape_data` parsed to an object, newest first,
/// optionally scoped to one dataset.
pub async fn list_annotations(
    State(state): State<AppState>,
    Query(filters): Query<AnnotationListFilters>,
) -> AppResult<impl IntoResponse> {
    let rows = AnnotationRepo::list(&state.pool, filters.dataset).await?;
    let annotations: Vec<Annotation> = rows.into_iter().map(Annotation::from).collect();
    Ok(Json(annotations))
}

/// POST /api/annotations
///
/// Validate, persist, and fan out a new annotation. The full persisted
/// record — id and created_at assigned server-side — is both the response
/// and the broadcast payload, so every client converges on identical state.
pub async fn create_annotation(
    State(state): State<AppState>,
    Json(input): Json<CreateAnnotation>,
) -> AppResult<impl IntoResponse> {
    let draft = NewAnnotation::from_draft(input)?;

    let row = AnnotationRepo::insert(&state.pool, &draft).await?;
    let annotation = Annotation::from(row);

    tracing::info!(
        annotation_id = annotation.id,
        dataset = %annotation.dataset,
        shape_type = annotation.shape_type.as_str(),
        "Annotation created"
    );

    state
        .event_bus
        .publish(AnnotationEvent::NewAnnotation(annotation.clone()));

    Ok((StatusCode::CREATED, Json(annotation)))
}

/// DELETE /api/annotations/{id}
///
/// Delete an annotation and fan out the removal. A non-integer id is
/// rejected by path extraction before this handler runs.
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AnnotationRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Annotation",
            id,
        }
        .into());
    }

    tracing::info!(annotation_id = id, "Annotation deleted");

    state
        .event_bus
        .publish(AnnotationEvent::AnnotationDeleted(id));

    Ok(Json(DeleteResponse {
        success: true,
        message: "Annotation deleted successfully",
    }))
}

/// GET /api/annotations/export
///
/// Serialize the raw rows (shape_data as stored text) as a downloadable
/// JSON document for backup/migration. Not part of the live sync path.
pub async fn export_annotations(
    State(state): State<AppState>,
    Query(filters): Query<AnnotationListFilters>,
) -> AppResult<impl IntoResponse> {
    let rows = AnnotationRepo::list(&state.pool, filters.dataset).await?;

    let scope = filters.dataset.map(|d| d.as_str()).unwrap_or("all");
    let filename = format!(
        "annotations_{scope}_{}.json",
        Utc::now().format("%Y-%m-%d")
    );

    let body = serde_json::to_string_pretty(&rows)
        .map_err(|e| crate::error::AppError::InternalError(e.to_string()))?;

    tracing::info!(scope, count = rows.len(), "Annotations exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}
