//! The annotation record and its field contracts.
//!
//! An [`Annotation`] is a user-authored geo-tagged note with an associated
//! point, circle, or rectangle geometry. Records are immutable once created:
//! the only lifecycle operations are create and delete.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Author name applied when the client sends none (or only whitespace).
pub const DEFAULT_USER: &str = "Anonymous";

/// Circle radius in meters applied when `shape_data.radius` is absent.
pub const DEFAULT_CIRCLE_RADIUS_M: f64 = 100_000.0;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Celestial-body view partition scoping annotation queries and real-time
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Worldview,
    Moon,
    Mars,
}

/// All valid dataset strings.
const VALID_DATASET_STRINGS: &[&str] = &["worldview", "moon", "mars"];

impl Dataset {
    /// Return the dataset as its lowercase storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worldview => "worldview",
            Self::Moon => "moon",
            Self::Mars => "mars",
        }
    }

    /// Parse a dataset from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "worldview" => Ok(Self::Worldview),
            "moon" => Ok(Self::Moon),
            "mars" => Ok(Self::Mars),
            _ => Err(CoreError::Validation(format!(
                "Invalid dataset '{s}'. Must be one of: {}",
                VALID_DATASET_STRINGS.join(", ")
            ))),
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::Worldview
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ShapeKind
// ---------------------------------------------------------------------------

/// Discriminator for `shape_data` interpretation.
///
/// Deserialization is lenient: any unrecognized kind becomes [`Marker`],
/// so records from old exports (or hand-edited files) always render as at
/// least a point.
///
/// [`Marker`]: ShapeKind::Marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Marker,
    Circle,
    Rectangle,
}

impl ShapeKind {
    /// Return the kind as its lowercase storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
        }
    }

    /// Parse a kind from a string slice, treating anything unrecognized as
    /// a marker.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "circle" => Self::Circle,
            "rectangle" => Self::Rectangle,
            _ => Self::Marker,
        }
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::Marker
    }
}

impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&s))
    }
}

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// A persisted annotation as it travels over the API and the fan-out
/// channel, with `shape_data` parsed to a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: DbId,
    pub user: String,
    pub note: String,
    pub lat: f64,
    pub lng: f64,
    pub shape_type: ShapeKind,
    #[serde(default)]
    pub shape_data: serde_json::Value,
    pub dataset: Dataset,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a JSON value is a finite number, as required for the `lat`
/// and `lng` fields of a create request.
///
/// `"10"` (a string) fails; so do `null`, a missing field, NaN, and
/// infinities.
pub fn validate_coordinate(field: &'static str, value: &serde_json::Value) -> Result<f64, CoreError> {
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} must be a number"))),
    }
}

/// Apply the author-name default: blank or whitespace-only input becomes
/// [`DEFAULT_USER`].
pub fn normalize_user(user: Option<String>) -> String {
    match user {
        Some(u) if !u.trim().is_empty() => u,
        _ => DEFAULT_USER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
