//! Gesture Session
//!
//! Wires capture, classification, gating and the target queue together
//! behind a single `tick` call. The session is the only owner of the
//! capture buffer and the queue.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::classifier::{ClassificationResult, PointCloudClassifier, PreparedTemplate};
use crate::app::config::Config;
use crate::capture::stroke_capture::StrokeCapture;
use crate::capture::types::{Gesture, PointerSample};
use crate::targeting::decision_gate::{Decision, DecisionGate};
use crate::targeting::gesture_queue::GestureQueue;
use crate::templates::library::TemplateLibrary;
use crate::{Error, Result};

/// What a single tick produced
#[derive(Debug)]
pub enum TickOutcome {
    /// The host was paused; nothing happened
    Paused,
    /// No gesture finished this tick
    Pending,
    /// A gesture was classified and gated against the front of the queue
    Recognized {
        result: ClassificationResult,
        /// Label that was expected at the front of the queue
        expected: String,
        decision: Decision,
    },
    /// A finished gesture could not be classified and was dropped
    Discarded(Error),
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Gestures finalized by capture
    pub gestures: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub discarded: usize,
}

/// Tick-driven recognition session
#[derive(Debug)]
pub struct GestureSession {
    capture: StrokeCapture,
    classifier: PointCloudClassifier,
    library: TemplateLibrary,
    /// Library clouds, normalized once at construction
    prepared: Vec<PreparedTemplate>,
    gate: DecisionGate,
    queue: GestureQueue<StdRng>,
    stats: SessionStats,
}

impl GestureSession {
    /// Assemble a session from its parts.
    ///
    /// Every template index the queue can draw must exist in `library`.
    pub fn new(
        capture: StrokeCapture,
        classifier: PointCloudClassifier,
        library: TemplateLibrary,
        gate: DecisionGate,
        queue: GestureQueue<StdRng>,
    ) -> Result<Self> {
        if library.is_empty() {
            return Err(Error::NoTemplates);
        }
        if queue.template_count() != library.len() {
            return Err(Error::Config(format!(
                "queue draws from {} templates but the library has {}",
                queue.template_count(),
                library.len()
            )));
        }

        let prepared = classifier.prepare(library.all());

        Ok(Self {
            capture,
            classifier,
            library,
            prepared,
            gate,
            queue,
            stats: SessionStats::default(),
        })
    }

    /// Build a session from configuration and a loaded library
    pub fn from_config(config: &Config, library: TemplateLibrary) -> Result<Self> {
        config.validate()?;

        let capture = StrokeCapture::with_policy(config.capture.region, config.capture.policy());
        let classifier = PointCloudClassifier::with_resample_points(config.recognition.resample_points);
        let gate = DecisionGate::new(config.gate.threshold);
        let queue = match config.queue.seed {
            Some(seed) => GestureQueue::seeded(config.queue.depth, library.len(), seed)?,
            None => GestureQueue::from_entropy(config.queue.depth, library.len())?,
        };

        info!(
            templates = library.len(),
            depth = config.queue.depth,
            threshold = config.gate.threshold,
            "Gesture session ready"
        );

        Self::new(capture, classifier, library, gate, queue)
    }

    /// Advance one tick with the current pointer state
    pub fn tick(&mut self, sample: PointerSample) -> TickOutcome {
        if sample.paused {
            return TickOutcome::Paused;
        }

        match self.capture.tick(sample) {
            None => TickOutcome::Pending,
            Some(finalized) => self.handle(finalized),
        }
    }

    /// Finish the buffered gesture now, regardless of the finalize policy
    pub fn complete_gesture(&mut self) -> TickOutcome {
        let finalized = self.capture.complete_gesture();
        self.handle(finalized)
    }

    /// Classify and gate a gesture that did not come from the capture pipeline
    pub fn submit(&mut self, gesture: &Gesture) -> TickOutcome {
        self.stats.gestures += 1;
        self.evaluate(gesture)
    }

    /// Redraw every queue slot
    pub fn reset_queue(&mut self) {
        self.queue.reset();
    }

    /// Name of the template expected next
    pub fn expected_label(&self) -> Option<&str> {
        self.queue
            .expected()
            .and_then(|index| self.library.get(index))
            .map(|t| t.name.as_str())
    }

    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub fn queue(&self) -> &GestureQueue<StdRng> {
        &self.queue
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    pub fn gate(&self) -> &DecisionGate {
        &self.gate
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    fn handle(&mut self, finalized: Result<Gesture>) -> TickOutcome {
        self.stats.gestures += 1;
        match finalized {
            Ok(gesture) => self.evaluate(&gesture),
            Err(e) => self.discard(e),
        }
    }

    fn evaluate(&mut self, gesture: &Gesture) -> TickOutcome {
        let result = match self.classifier.classify_prepared(gesture, &self.prepared) {
            Ok(result) => result,
            Err(e) => return self.discard(e),
        };

        let expected = self.expected_label().unwrap_or_default().to_string();
        let decision = self.gate.decide(&result, &expected);

        if decision.is_accepted() {
            self.stats.accepted += 1;
            info!(label = %result.label, score = result.score, "Gesture accepted");
            self.queue.advance();
        } else {
            self.stats.rejected += 1;
            debug!(
                label = %result.label,
                score = result.score,
                expected = %expected,
                ?decision,
                "Gesture rejected"
            );
        }

        TickOutcome::Recognized {
            result,
            expected,
            decision,
        }
    }

    fn discard(&mut self, error: Error) -> TickOutcome {
        self.stats.discarded += 1;
        warn!(error = %error, "Gesture discarded");
        TickOutcome::Discarded(error)
    }
}
