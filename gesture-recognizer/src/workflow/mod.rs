//! Workflow Module
//!
//! Drives the full pipeline one tick at a time, from pointer samples to
//! gated recognition results, and replays recorded input.

pub mod session;
pub mod replay;

pub use session::{GestureSession, SessionStats, TickOutcome};
pub use replay::InputScript;
