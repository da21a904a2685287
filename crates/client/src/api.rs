//! HTTP client for the annotation service.

use serde::Serialize;
use serde_json::Value;

use geomark_core::annotation::{Annotation, Dataset, ShapeKind};
use geomark_core::shape::Shape;
use geomark_core::types::DbId;

/// Errors surfaced to the UI by client-side service calls.
///
/// None of these are retried automatically; the user re-invokes the action.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network failure reaching the service (or decoding its response).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A client-authored annotation, pre-submission.
///
/// The geometry is a typed [`Shape`]; it is encoded to the generic
/// `{shape_type, shape_data}` pair only at the wire boundary.
#[derive(Debug, Clone)]
pub struct AnnotationDraft {
    pub user: Option<String>,
    pub note: Option<String>,
    pub dataset: Dataset,
    pub shape: Shape,
}

/// Wire form of a create request.
#[derive(Serialize)]
struct CreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    lat: f64,
    lng: f64,
    shape_type: ShapeKind,
    shape_data: Value,
    dataset: Dataset,
}

impl AnnotationDraft {
    fn to_request(&self) -> CreateRequest {
        let (lat, lng) = self.shape.anchor();
        let (shape_type, shape_data) = self.shape.encode();
        CreateRequest {
            user: self.user.clone(),
            note: self.note.clone(),
            lat,
            lng,
            shape_type,
            shape_data,
            dataset: self.dataset,
        }
    }
}

/// Thin HTTP client over the annotation service endpoints.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for a service base URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the current record set, optionally scoped to one dataset.
    pub async fn list(&self, dataset: Option<Dataset>) -> Result<Vec<Annotation>, ClientError> {
        let mut request = self.http.get(format!("{}/api/annotations", self.base_url));
        if let Some(dataset) = dataset {
            request = request.query(&[("dataset", dataset.as_str())]);
        }
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Submit a new annotation; returns the full persisted record.
    ///
    /// The caller must NOT insert the returned record into its cache — the
    /// echoed fan-out event (or a reload) is the only client-state mutation
    /// path.
    pub async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/annotations", self.base_url))
            .json(&draft.to_request())
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Delete an annotation by id.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/api/annotations/{id}", self.base_url))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Probe the service's liveness endpoint.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = Self::check(
            self.http
                .get(format!("{}/health", self.base_url))
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    /// Map non-2xx responses to [`ClientError::Api`], pulling the message
    /// from the service's `{"error": ...}` body when present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
