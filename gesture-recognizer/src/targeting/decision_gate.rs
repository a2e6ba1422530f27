//! Decision Gate
//!
//! A classification only counts when it is confident enough AND names the
//! gesture currently expected at the front of the queue.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::ClassificationResult;

/// Default minimum score (exclusive) for acceptance
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Why a classification was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Score at or below the threshold (also reported when the label is wrong too)
    LowConfidence,
    /// Confident, but not the expected gesture
    WrongGesture,
}

/// Outcome of gating a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Accept iff `score > threshold` and the label equals `expected_label`
pub fn decide(result: &ClassificationResult, expected_label: &str, threshold: f64) -> Decision {
    if result.score <= threshold {
        Decision::Rejected(RejectReason::LowConfidence)
    } else if result.label != expected_label {
        Decision::Rejected(RejectReason::WrongGesture)
    } else {
        Decision::Accepted
    }
}

/// Decision gate with a configured threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionGate {
    threshold: f64,
}

impl DecisionGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn decide(&self, result: &ClassificationResult, expected_label: &str) -> Decision {
        decide(result, expected_label, self.threshold)
    }
}

impl Default for DecisionGate {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
