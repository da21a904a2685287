//! Shape geometry codec.
//!
//! Maps the generic `{shape_type, shape_data}` storage encoding to a
//! renderable [`Shape`] and back, independent of any map-rendering library.
//! Decoding is total: malformed geometry degrades to a point marker at the
//! record's top-level coordinates instead of failing the render.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::annotation::{Annotation, ShapeKind, DEFAULT_CIRCLE_RADIUS_M};

// ---------------------------------------------------------------------------
// LatLngBounds
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl LatLngBounds {
    /// Build a normalized box from two opposite corners given as
    /// `(lat, lng)` pairs, in either order.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            west: a.1.min(b.1),
            south: a.0.min(b.0),
            east: a.1.max(b.1),
            north: a.0.max(b.0),
        }
    }

    /// Parse the `"west,south,east,north"` storage string.
    ///
    /// Returns `None` for anything other than four comma-separated finite
    /// floats.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>().ok())
            .collect::<Option<_>>()?;
        match parts[..] {
            [west, south, east, north]
                if [west, south, east, north].iter().all(|v| v.is_finite()) =>
            {
                Some(Self {
                    west,
                    south,
                    east,
                    north,
                })
            }
            _ => None,
        }
    }

    /// The comma-joined storage encoding.
    pub fn to_storage_string(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }

    /// Center of the box as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// A renderable annotation geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker { lat: f64, lng: f64 },
    Circle { center: (f64, f64), radius_m: f64 },
    Rectangle { bounds: LatLngBounds },
}

impl Shape {
    /// The discriminator stored alongside the encoded geometry.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Marker { .. } => ShapeKind::Marker,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Representative point used for the record's top-level `lat`/`lng`
    /// (popup anchor, and the marker fallback position).
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            Self::Marker { lat, lng } => (*lat, *lng),
            Self::Circle { center, .. } => *center,
            Self::Rectangle { bounds } => bounds.center(),
        }
    }

    /// Encode to the `(shape_type, shape_data)` storage pair.
    pub fn encode(&self) -> (ShapeKind, Value) {
        match self {
            Self::Marker { lat, lng } => (ShapeKind::Marker, json!({ "lat": lat, "lng": lng })),
            Self::Circle { center, radius_m } => (
                ShapeKind::Circle,
                json!({ "center": [center.0, center.1], "radius": radius_m }),
            ),
            Self::Rectangle { bounds } => (
                ShapeKind::Rectangle,
                json!({ "bounds": bounds.to_storage_string() }),
            ),
        }
    }

    /// Decode a stored `(shape_type, shape_data)` pair.
    ///
    /// `lat`/`lng` are the record's top-level coordinates; they are both the
    /// marker position and the fallback for malformed circle or rectangle
    /// geometry. Never fails.
    pub fn decode(kind: ShapeKind, shape_data: &Value, lat: f64, lng: f64) -> Self {
        match kind {
            ShapeKind::Marker => Self::Marker { lat, lng },
            ShapeKind::Circle => {
                let center = decode_center(shape_data).unwrap_or((lat, lng));
                let radius_m = shape_data
                    .get("radius")
                    .and_then(Value::as_f64)
                    .filter(|r| r.is_finite())
                    .unwrap_or(DEFAULT_CIRCLE_RADIUS_M);
                Self::Circle { center, radius_m }
            }
            ShapeKind::Rectangle => match shape_data
                .get("bounds")
                .and_then(Value::as_str)
                .and_then(LatLngBounds::parse)
            {
                Some(bounds) => Self::Rectangle { bounds },
                None => Self::Marker { lat, lng },
            },
        }
    }

    /// Decode the geometry of a full annotation record.
    pub fn from_annotation(annotation: &Annotation) -> Self {
        Self::decode(
            annotation.shape_type,
            &annotation.shape_data,
            annotation.lat,
            annotation.lng,
        )
    }
}

/// Extract a `[lat, lng]` pair from `shape_data.center`.
fn decode_center(shape_data: &Value) -> Option<(f64, f64)> {
    let arr = shape_data.get("center")?.as_array()?;
    match arr[..] {
        [ref lat, ref lng] => {
            let (lat, lng) = (lat.as_f64()?, lng.as_f64()?);
            (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round_trips() {
        let shape = Shape::Marker {
            lat: 48.85,
            lng: 2.35,
        };
        let (kind, data) = shape.encode();
        assert_eq!(kind, ShapeKind::Marker);
        assert_eq!(Shape::decode(kind, &data, 48.85, 2.35), shape);
    }

    #[test]
    fn circle_round_trips_center_and_radius() {
        let shape = Shape::Circle {
            center: (10.5, -20.25),
            radius_m: 42_000.0,
        };
        let (kind, data) = shape.encode();
        assert_eq!(kind, ShapeKind::Circle);

        // Top-level lat/lng deliberately differ from the center; the encoded
        // center must win.
        match Shape::decode(kind, &data, 0.0, 0.0) {
            Shape::Circle { center, radius_m } => {
                assert!((center.0 - 10.5).abs() < 1e-9);
                assert!((center.1 + 20.25).abs() < 1e-9);
                assert!((radius_m - 42_000.0).abs() < 1e-6);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn circle_without_center_falls_back_to_top_level_coords() {
        let data = serde_json::json!({ "radius": 5000.0 });
        assert_eq!(
            Shape::decode(ShapeKind::Circle, &data, 1.0, 2.0),
            Shape::Circle {
                center: (1.0, 2.0),
                radius_m: 5000.0
            }
        );
    }

    #[test]
    fn circle_without_radius_uses_default() {
        let data = serde_json::json!({ "center": [3.0, 4.0] });
        assert_eq!(
            Shape::decode(ShapeKind::Circle, &data, 0.0, 0.0),
            Shape::Circle {
                center: (3.0, 4.0),
                radius_m: DEFAULT_CIRCLE_RADIUS_M
            }
        );
    }

    #[test]
    fn rectangle_bounds_round_trip() {
        let bounds = LatLngBounds {
            west: -10.0,
            south: -5.5,
            east: 10.25,
            north: 5.75,
        };
        let shape = Shape::Rectangle { bounds };
        let (kind, data) = shape.encode();
        assert_eq!(kind, ShapeKind::Rectangle);
        assert_eq!(data["bounds"], "-10,-5.5,10.25,5.75");
        assert_eq!(Shape::decode(kind, &data, 0.0, 0.0), shape);
    }

    #[test]
    fn malformed_rectangle_bounds_decode_as_marker() {
        for bad in [
            serde_json::json!({ "bounds": "1,2,3" }),
            serde_json::json!({ "bounds": "a,b,c,d" }),
            serde_json::json!({ "bounds": "" }),
            serde_json::json!({ "bounds": 7 }),
            serde_json::json!({}),
            serde_json::Value::Null,
        ] {
            assert_eq!(
                Shape::decode(ShapeKind::Rectangle, &bad, 12.0, 34.0),
                Shape::Marker {
                    lat: 12.0,
                    lng: 34.0
                },
                "shape_data {bad} should fall back to a marker"
            );
        }
    }

    #[test]
    fn bounds_parse_tolerates_whitespace() {
        let bounds = LatLngBounds::parse(" -1.0, -2.0 , 3.0, 4.0 ").unwrap();
        assert_eq!(bounds.west, -1.0);
        assert_eq!(bounds.north, 4.0);
    }

    #[test]
    fn bounds_from_corners_normalizes_order() {
        let bounds = LatLngBounds::from_corners((5.0, 10.0), (-5.0, -10.0));
        assert_eq!(bounds.west, -10.0);
        assert_eq!(bounds.south, -5.0);
        assert_eq!(bounds.east, 10.0);
        assert_eq!(bounds.north, 5.0);
    }

    #[test]
    fn rectangle_anchor_is_bounds_center() {
        let shape = Shape::Rectangle {
            bounds: LatLngBounds {
                west: 0.0,
                south: 0.0,
                east: 10.0,
                north: 20.0,
            },
        };
        assert_eq!(shape.anchor(), (10.0, 5.0));
    }
}
