//! Input Scripts
//!
//! A recorded (or synthesized) stream of per-tick pointer samples that can
//! be replayed through a [`GestureSession`] deterministically.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::session::{GestureSession, TickOutcome};
use crate::capture::types::{Gesture, PointerSample};

/// Current input script format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Pointer samples, one per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    pub samples: Vec<PointerSample>,
}

fn default_format_version() -> String {
    CURRENT_FORMAT_VERSION.to_string()
}

impl InputScript {
    pub fn new(samples: Vec<PointerSample>) -> Self {
        Self {
            format_version: default_format_version(),
            samples,
        }
    }

    /// Synthesize the tick stream that draws `gesture`.
    ///
    /// Gesture points are in classification space, so the vertical flip
    /// applied by capture is undone here. Each stroke is pressed, dragged
    /// and released; `idle_ticks` further release ticks follow the last
    /// stroke so idle-timeout capture can finish the gesture.
    pub fn from_gesture(gesture: &Gesture, idle_ticks: u32) -> Self {
        let mut samples = Vec::with_capacity(gesture.len() + gesture.stroke_count() + idle_ticks as usize);

        let points = gesture.points();
        let mut start = 0;
        while start < points.len() {
            let stroke_id = points[start].stroke_id;
            let end = points[start..]
                .iter()
                .position(|p| p.stroke_id != stroke_id)
                .map(|offset| start + offset)
                .unwrap_or(points.len());

            for p in &points[start..end] {
                samples.push(PointerSample::down(p.x, -p.y));
            }
            let last = points[end - 1];
            samples.push(PointerSample::up(last.x, -last.y));

            start = end;
        }

        if let Some(&last) = samples.last() {
            for _ in 0..idle_ticks {
                samples.push(last);
            }
        }

        Self::new(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feed every sample to `session`, returning the outcomes that were
    /// neither `Pending` nor `Paused`
    pub fn play(&self, session: &mut GestureSession) -> Vec<TickOutcome> {
        self.samples
            .iter()
            .map(|&sample| session.tick(sample))
            .filter(|outcome| !matches!(outcome, TickOutcome::Pending | TickOutcome::Paused))
            .collect()
    }

    /// Save script to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load script from a file.
    ///
    /// Logs a warning if the script was saved with an unknown format version.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script: InputScript = serde_json::from_str(&content)?;
        if script.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                path = %path.display(),
                found = %script.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Input script has different format version"
            );
        }
        Ok(script)
    }
}
