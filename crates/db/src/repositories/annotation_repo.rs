//! Repository for the `annotations` table.

use sqlx::SqlitePool;

use geomark_core::annotation::Dataset;
use geomark_core::types::DbId;

use crate::models::annotation::{AnnotationRow, NewAnnotation};

/// Column list for annotations queries.
const COLUMNS: &str = "id, user, note, lat, lng, shape_type, shape_data, dataset, created_at";

/// The single writer of the annotations table. No update operation exists:
/// annotations are immutable once created.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a validated draft, returning the persisted row with its
    /// store-assigned id.
    pub async fn insert(
        pool: &SqlitePool,
        draft: &NewAnnotation,
    ) -> Result<AnnotationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations
                (user, note, lat, lng, shape_type, shape_data, dataset, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(&draft.user)
            .bind(&draft.note)
            .bind(draft.lat)
            .bind(draft.lng)
            .bind(draft.shape_type.as_str())
            .bind(&draft.shape_data)
            .bind(draft.dataset.as_str())
            .bind(draft.created_at)
            .fetch_one(pool)
            .await
    }

    /// List annotations, newest first; scoped to one dataset when given.
    ///
    /// The id tiebreak keeps the order total when timestamps collide.
    pub async fn list(
        pool: &SqlitePool,
        dataset: Option<Dataset>,
    ) -> Result<Vec<AnnotationRow>, sqlx::Error> {
        match dataset {
            Some(dataset) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM annotations
                     WHERE dataset = $1
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, AnnotationRow>(&query)
                    .bind(dataset.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM annotations
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, AnnotationRow>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Delete an annotation by its id. Returns true if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
