//! Stroke Capture State Machine
//!
//! Turns a per-tick stream of pointer samples into completed gestures.
//! Each pointer-down inside the capture region opens a new stroke; the
//! finalize policy decides whether a pointer-up completes the gesture or
//! only closes the current stroke of a multi-stroke shape.

use super::types::{CaptureRegion, Gesture, Point, PointerSample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stroke id of a freshly reset session; the first stroke gets id 0
pub const INITIAL_STROKE_ID: i32 = -1;

/// Default number of idle ticks before a multi-stroke gesture completes
pub const DEFAULT_IDLE_TIMEOUT_TICKS: u32 = 20;

/// Capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No stroke in progress
    Idle,
    /// Pointer held, points being recorded
    Drawing,
}

/// When buffered strokes are turned into a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FinalizePolicy {
    /// Every pointer-up completes the gesture
    #[default]
    SingleStroke,
    /// Pointer-up closes the stroke; the gesture completes after `ticks`
    /// unpaused ticks without a new press
    IdleTimeout { ticks: u32 },
}

/// Per-tick stroke capture
///
/// Owns the in-progress point buffer exclusively. Points are stored in
/// classification space, i.e. with the vertical axis flipped.
#[derive(Debug, Clone)]
pub struct StrokeCapture {
    region: CaptureRegion,
    policy: FinalizePolicy,
    state: CaptureState,
    points: Vec<Point>,
    stroke_id: i32,
    pointer_was_down: bool,
    idle_ticks: u32,
}

impl StrokeCapture {
    /// Create a capture pipeline with the default single-stroke policy
    pub fn new(region: CaptureRegion) -> Self {
        Self::with_policy(region, FinalizePolicy::default())
    }

    pub fn with_policy(region: CaptureRegion, policy: FinalizePolicy) -> Self {
        Self {
            region,
            policy,
            state: CaptureState::Idle,
            points: Vec::new(),
            stroke_id: INITIAL_STROKE_ID,
            pointer_was_down: false,
            idle_ticks: 0,
        }
    }

    /// Advance one tick.
    ///
    /// Returns `Some` only on the tick that finalized a gesture. An empty
    /// buffer at finalization yields `Err(InvalidGesture)`; the session is
    /// reset either way.
    pub fn tick(&mut self, sample: PointerSample) -> Option<crate::Result<Gesture>> {
        if sample.paused {
            return None;
        }

        let pressed = sample.pointer_down && !self.pointer_was_down;
        self.pointer_was_down = sample.pointer_down;

        match self.state {
            CaptureState::Idle => {
                if pressed && self.region.contains(sample.position) {
                    self.begin_stroke(sample.position);
                    return None;
                }
                self.tick_idle()
            }
            CaptureState::Drawing => {
                if sample.pointer_down {
                    if self.region.contains(sample.position) {
                        self.push_point(sample.position);
                    }
                    None
                } else {
                    self.end_stroke()
                }
            }
        }
    }

    /// Finalize whatever has been buffered, ending an in-progress stroke.
    pub fn complete_gesture(&mut self) -> crate::Result<Gesture> {
        if self.state == CaptureState::Drawing {
            debug!(stroke_id = self.stroke_id, "Stroke closed by explicit completion");
        }
        self.finalize()
    }

    /// Drop all buffered points without producing a gesture
    pub fn clear(&mut self) {
        self.points.clear();
        self.stroke_id = INITIAL_STROKE_ID;
        self.state = CaptureState::Idle;
        self.idle_ticks = 0;
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Points buffered since the last finalized gesture
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn current_stroke_id(&self) -> i32 {
        self.stroke_id
    }

    pub fn region(&self) -> CaptureRegion {
        self.region
    }

    pub fn policy(&self) -> FinalizePolicy {
        self.policy
    }

    fn begin_stroke(&mut self, position: (f64, f64)) {
        self.state = CaptureState::Drawing;
        self.stroke_id += 1;
        self.idle_ticks = 0;
        debug!(stroke_id = self.stroke_id, x = position.0, y = position.1, "Stroke started");
        self.push_point(position);
    }

    fn push_point(&mut self, position: (f64, f64)) {
        self.points
            .push(Point::new(position.0, -position.1, self.stroke_id));
    }

    fn end_stroke(&mut self) -> Option<crate::Result<Gesture>> {
        self.state = CaptureState::Idle;
        self.idle_ticks = 0;
        debug!(
            stroke_id = self.stroke_id,
            buffered = self.points.len(),
            "Stroke ended"
        );

        match self.policy {
            FinalizePolicy::SingleStroke => Some(self.finalize()),
            FinalizePolicy::IdleTimeout { ticks: 0 } => Some(self.finalize()),
            FinalizePolicy::IdleTimeout { .. } => None,
        }
    }

    fn tick_idle(&mut self) -> Option<crate::Result<Gesture>> {
        let FinalizePolicy::IdleTimeout { ticks } = self.policy else {
            return None;
        };
        if self.points.is_empty() {
            return None;
        }

        self.idle_ticks += 1;
        if self.idle_ticks >= ticks {
            debug!(idle_ticks = self.idle_ticks, "Idle timeout reached");
            Some(self.finalize())
        } else {
            None
        }
    }

    fn finalize(&mut self) -> crate::Result<Gesture> {
        let points = std::mem::take(&mut self.points);
        let strokes = self.stroke_id + 1;
        self.clear();

        debug!(points = points.len(), strokes, "Gesture finalized");
        Gesture::new(points)
    }
}
