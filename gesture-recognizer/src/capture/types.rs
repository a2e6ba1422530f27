//! Core types for stroke capture
//!
//! Defines the fundamental data structures used throughout the capture and
//! recognition pipeline.

use serde::{Deserialize, Serialize};

/// A single sampled point of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Stroke this point belongs to within its gesture
    pub stroke_id: i32,
}

impl Point {
    pub fn new(x: f64, y: f64, stroke_id: i32) -> Self {
        Self { x, y, stroke_id }
    }

    /// Calculate Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check that both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One or more strokes treated as a single shape
///
/// A gesture always holds at least one point. Point order matters for
/// resampling only; matching treats the normalized result as an unordered
/// cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Gesture {
    points: Vec<Point>,
}

impl Gesture {
    /// Create a gesture from an ordered point sequence.
    ///
    /// Fails with [`crate::Error::InvalidGesture`] if `points` is empty.
    pub fn new(points: Vec<Point>) -> crate::Result<Self> {
        if points.is_empty() {
            return Err(crate::Error::InvalidGesture(
                "a gesture needs at least one point".to_string(),
            ));
        }
        Ok(Self { points })
    }

    /// Build a single-stroke gesture from raw coordinates
    pub fn from_coords(coords: &[(f64, f64)]) -> crate::Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y, 0)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed gesture; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct stroke ids in order of first appearance
    pub fn stroke_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = Vec::new();
        for p in &self.points {
            if !ids.contains(&p.stroke_id) {
                ids.push(p.stroke_id);
            }
        }
        ids
    }

    /// Number of distinct strokes
    pub fn stroke_count(&self) -> usize {
        self.stroke_ids().len()
    }

    /// Copy of this gesture shifted by (dx, dy)
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy, p.stroke_id))
                .collect(),
        }
    }

    /// Copy of this gesture scaled uniformly about the origin
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x * factor, p.y * factor, p.stroke_id))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Point>> for Gesture {
    type Error = crate::Error;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Gesture::new(points)
    }
}

impl From<Gesture> for Vec<Point> {
    fn from(gesture: Gesture) -> Self {
        gesture.points
    }
}

/// Pointer state sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Primary button / touch held
    pub pointer_down: bool,
    /// Screen-space position (y grows upward, as reported by the host)
    pub position: (f64, f64),
    /// Host is paused; the whole tick is ignored
    #[serde(default)]
    pub paused: bool,
}

impl PointerSample {
    /// Pointer held at (x, y)
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            pointer_down: true,
            position: (x, y),
            paused: false,
        }
    }

    /// Pointer released at (x, y)
    pub fn up(x: f64, y: f64) -> Self {
        Self {
            pointer_down: false,
            position: (x, y),
            paused: false,
        }
    }

    /// Same sample, but flagged as paused
    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }
}

/// Screen rectangle in which strokes may start and points are recorded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CaptureRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Region that accepts every finite position
    pub fn unbounded() -> Self {
        Self {
            x: f64::MIN / 2.0,
            y: f64::MIN / 2.0,
            width: f64::MAX,
            height: f64::MAX,
        }
    }

    /// Half-open containment: left/bottom edges inclusive, right/top exclusive
    pub fn contains(&self, position: (f64, f64)) -> bool {
        let (px, py) = position;
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 150.0,
            width: 5760.0,
            height: 4320.0,
        }
    }
}
