//! Click-by-click shape construction.
//!
//! [`ShapeDraft`] is the state machine behind the drawing tools: markers
//! commit on the first press; circles and rectangles anchor on the first
//! press, preview while the cursor moves, and commit on the second press.

use geomark_core::geo::haversine_distance_m;
use geomark_core::shape::{LatLngBounds, Shape};

/// The active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    Marker,
    Circle,
    Rectangle,
}

/// In-progress shape construction for one tool.
#[derive(Debug)]
pub struct ShapeDraft {
    tool: DrawTool,
    /// First click of a two-state shape: circle center or rectangle corner.
    anchor: Option<(f64, f64)>,
}

impl ShapeDraft {
    /// Start drafting with a tool.
    pub fn new(tool: DrawTool) -> Self {
        Self { tool, anchor: None }
    }

    pub fn tool(&self) -> DrawTool {
        self.tool
    }

    /// Whether a two-state shape is waiting for its second click.
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Handle a press at `(lat, lng)`.
    ///
    /// Returns the committed shape when the press completes one: immediately
    /// for markers, on the second press for circles and rectangles.
    pub fn press(&mut self, lat: f64, lng: f64) -> Option<Shape> {
        match self.tool {
            DrawTool::Marker => Some(Shape::Marker { lat, lng }),
            DrawTool::Circle => match self.anchor.take() {
                Some(center) => Some(Shape::Circle {
                    center,
                    radius_m: haversine_distance_m(center, (lat, lng)),
                }),
                None => {
                    self.anchor = Some((lat, lng));
                    None
                }
            },
            DrawTool::Rectangle => match self.anchor.take() {
                Some(corner) => Some(Shape::Rectangle {
                    bounds: LatLngBounds::from_corners(corner, (lat, lng)),
                }),
                None => {
                    self.anchor = Some((lat, lng));
                    None
                }
            },
        }
    }

    /// Preview the shape for the current cursor position without committing.
    ///
    /// `None` for two-state shapes that have not been anchored yet.
    pub fn preview(&self, lat: f64, lng: f64) -> Option<Shape> {
        match (self.tool, self.anchor) {
            (DrawTool::Marker, _) => Some(Shape::Marker { lat, lng }),
            (DrawTool::Circle, Some(center)) => Some(Shape::Circle {
                center,
                radius_m: haversine_distance_m(center, (lat, lng)),
            }),
            (DrawTool::Rectangle, Some(corner)) => Some(Shape::Rectangle {
                bounds: LatLngBounds::from_corners(corner, (lat, lng)),
            }),
            _ => None,
        }
    }

    /// Abandon the in-progress shape.
    pub fn cancel(&mut self) {
        self.anchor = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
