//! Targeting Module
//!
//! Decides whether a classified gesture hits the current target and keeps
//! the queue of upcoming targets.

pub mod decision_gate;
pub mod gesture_queue;

pub use decision_gate::{decide, Decision, DecisionGate, RejectReason};
pub use gesture_queue::{GestureQueue, ScaleTag, SlotView};
