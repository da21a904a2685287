//! Annotation row model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use geomark_core::annotation::{
    normalize_user, validate_coordinate, Annotation, Dataset, ShapeKind,
};
use geomark_core::error::CoreError;
use geomark_core::types::{DbId, Timestamp};

/// A row from the `annotations` table, with `shape_data` as the stored
/// text blob. Serialized as-is by the export endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnnotationRow {
    pub id: DbId,
    pub user: String,
    pub note: String,
    pub lat: f64,
    pub lng: f64,
    pub shape_type: String,
    pub shape_data: String,
    pub dataset: String,
    pub created_at: Timestamp,
}

impl From<AnnotationRow> for Annotation {
    /// Parse a stored row into the wire record.
    ///
    /// Stored discriminators are decoded leniently (unknown shape_type →
    /// marker, unknown dataset → worldview) and a corrupt `shape_data` blob
    /// becomes an empty object, so reads never fail on old data.
    fn from(row: AnnotationRow) -> Self {
        Annotation {
            id: row.id,
            user: row.user,
            note: row.note,
            lat: row.lat,
            lng: row.lng,
            shape_type: ShapeKind::from_str_lossy(&row.shape_type),
            shape_data: serde_json::from_str(&row.shape_data)
                .unwrap_or_else(|_| Value::Object(Default::default())),
            dataset: Dataset::from_str(&row.dataset).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// DTO for a create request, before validation.
///
/// `lat`/`lng` are raw JSON values so a non-numeric payload surfaces as a
/// validation error rather than a deserialization rejection. Unknown
/// fields (including any client-supplied `created_at`) are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotation {
    pub user: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lng: Value,
    pub shape_type: Option<String>,
    pub shape_data: Option<Value>,
    pub dataset: Option<String>,
}

/// A validated draft ready for insertion, with all defaults applied and the
/// creation timestamp stamped server-side.
#[derive(Debug, Clone)]
pub struct NewAnnotation {
    pub user: String,
    pub note: String,
    pub lat: f64,
    pub lng: f64,
    pub shape_type: ShapeKind,
    pub shape_data: String,
    pub dataset: Dataset,
    pub created_at: Timestamp,
}

impl NewAnnotation {
    /// Validate a raw draft and apply the field defaults.
    ///
    /// Fails with `CoreError::Validation` when `lat`/`lng` are not finite
    /// numbers or `dataset` names an unknown partition. The client's clock
    /// is never trusted: `created_at` is stamped here.
    pub fn from_draft(draft: CreateAnnotation) -> Result<Self, CoreError> {
        let lat = validate_coordinate("lat", &draft.lat)?;
        let lng = validate_coordinate("lng", &draft.lng)?;

        let dataset = match draft.dataset.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Dataset::from_str(s)?,
            None => Dataset::Worldview,
        };

        let shape_type = draft
            .shape_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(ShapeKind::from_str_lossy)
            .unwrap_or_default();

        let shape_data = draft
            .shape_data
            .unwrap_or_else(|| Value::Object(Default::default()));
        let shape_data = serde_json::to_string(&shape_data)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize shape_data: {e}")))?;

        Ok(Self {
            user: normalize_user(draft.user),
            note: draft.note.unwrap_or_default(),
            lat,
            lng,
            shape_type,
            shape_data,
            dataset,
            created_at: Utc::now(),
        })
    }
}
