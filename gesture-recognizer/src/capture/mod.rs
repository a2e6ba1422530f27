//! Stroke capture module
//!
//! This module turns a per-tick pointer sample stream into completed
//! multi-stroke gestures. All work happens synchronously inside the tick.

pub mod types;
pub mod stroke_capture;

pub use types::*;
pub use stroke_capture::{CaptureState, FinalizePolicy, StrokeCapture};
