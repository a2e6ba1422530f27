//! # Gesture Recognizer
//!
//! Captures free-form pointer strokes, assembles them into multi-stroke
//! gestures, and classifies each gesture against a library of labeled
//! templates with a point-cloud matcher that is invariant to translation
//! and scale and tolerant of rotation and stroke order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gesture_recognizer::templates::io::load_library;
//! use gesture_recognizer::workflow::{GestureSession, TickOutcome};
//! use gesture_recognizer::app::config::Config;
//! use gesture_recognizer::capture::types::PointerSample;
//!
//! let config = Config::default();
//! let library = load_library(&config.templates.path).expect("templates");
//! let mut session = GestureSession::from_config(&config, library).expect("session");
//!
//! // Once per frame, feed the current pointer state
//! let outcome = session.tick(PointerSample::down(320.0, 480.0));
//! if let TickOutcome::Recognized { result, decision, .. } = outcome {
//!     println!("{} ({:.2}) -> {:?}", result.label, result.score, decision);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`capture`]: Point/gesture model and the per-tick stroke capture state machine
//! - [`analysis`]: Resampling, normalization and greedy point-cloud matching
//! - [`templates`]: Immutable template library and its JSON storage format
//! - [`targeting`]: Confidence/label decision gate and the upcoming-gestures ring
//! - [`workflow`]: Tick-driven session that wires everything together, plus replayable input scripts
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer   │───▶│   Stroke    │───▶│ Point-Cloud │───▶│  Decision   │
//! │   samples   │    │   Capture   │    │ Classifier  │    │    Gate     │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                              ▲                  │
//!                                       ┌─────────────┐    ┌─────────────┐
//!                                       │  Template   │    │   Gesture   │
//!                                       │   Library   │    │    Queue    │
//!                                       └─────────────┘    └─────────────┘
//! ```

pub mod capture;
pub mod analysis;
pub mod templates;
pub mod targeting;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use analysis::classifier::{ClassificationResult, PointCloudClassifier};
pub use capture::types::{Gesture, Point, PointerSample};
pub use capture::stroke_capture::{FinalizePolicy, StrokeCapture};
pub use targeting::decision_gate::{Decision, DecisionGate};
pub use targeting::gesture_queue::GestureQueue;
pub use templates::library::{Template, TemplateLibrary};
pub use workflow::{GestureSession, TickOutcome};

/// Result type alias for the gesture recognizer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gesture recognizer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid gesture: {0}")]
    InvalidGesture(String),

    #[error("Insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("No templates available for classification")]
    NoTemplates,

    #[error("Template load error: {0}")]
    TemplateLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
