//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::point_cloud::DEFAULT_RESAMPLE_POINTS;
use crate::capture::stroke_capture::{FinalizePolicy, DEFAULT_IDLE_TIMEOUT_TICKS};
use crate::capture::types::CaptureRegion;
use crate::targeting::decision_gate::DEFAULT_THRESHOLD;
use crate::targeting::gesture_queue::DEFAULT_DEPTH;

/// Largest accepted resample count
const MAX_RESAMPLE_POINTS: usize = 1024;

/// Largest accepted queue depth
const MAX_QUEUE_DEPTH: usize = 64;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Stroke capture settings
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Classifier settings
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// Decision gate settings
    #[serde(default)]
    pub gate: GateConfig,
    /// Upcoming-gesture queue settings
    #[serde(default)]
    pub queue: QueueConfig,
    /// Template source
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// How a pointer-up is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeMode {
    /// Each stroke is its own gesture
    SingleStroke,
    /// Strokes are grouped until the pointer stays up for `idle_timeout_ticks`
    IdleTimeout,
}

/// Capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Finalize mode
    pub finalize: FinalizeMode,
    /// Idle ticks before a multi-stroke gesture completes (idle_timeout mode only)
    pub idle_timeout_ticks: u32,
    /// Rectangle in which strokes may start
    pub region: CaptureRegion,
}

impl CaptureConfig {
    /// Finalize policy for the capture pipeline
    pub fn policy(&self) -> FinalizePolicy {
        match self.finalize {
            FinalizeMode::SingleStroke => FinalizePolicy::SingleStroke,
            FinalizeMode::IdleTimeout => FinalizePolicy::IdleTimeout {
                ticks: self.idle_timeout_ticks,
            },
        }
    }
}

/// Recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Points every gesture is resampled to
    pub resample_points: usize,
}

/// Decision gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum score (exclusive) for acceptance
    pub threshold: f64,
}

/// Gesture queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of upcoming gestures
    pub depth: usize,
    /// Fixed seed for reproducible draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Template source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Template file or directory of template files
    pub path: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            finalize: FinalizeMode::SingleStroke,
            idle_timeout_ticks: DEFAULT_IDLE_TIMEOUT_TICKS,
            region: CaptureRegion::default(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            resample_points: DEFAULT_RESAMPLE_POINTS,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("templates"),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let region = &self.capture.region;
        if !(region.x.is_finite() && region.y.is_finite()) {
            return Err(crate::Error::Config(format!(
                "capture region origin must be finite, got ({}, {})", region.x, region.y
            )));
        }
        if !(region.width > 0.0 && region.height > 0.0) {
            return Err(crate::Error::Config(format!(
                "capture region must have positive size, got {}x{}", region.width, region.height
            )));
        }
        if self.recognition.resample_points < 2 || self.recognition.resample_points > MAX_RESAMPLE_POINTS {
            return Err(crate::Error::Config(format!(
                "resample_points must be in [2, {}], got {}", MAX_RESAMPLE_POINTS, self.recognition.resample_points
            )));
        }
        if !(0.0..=1.0).contains(&self.gate.threshold) {
            return Err(crate::Error::Config(format!(
                "threshold must be in [0, 1], got {}", self.gate.threshold
            )));
        }
        if self.queue.depth == 0 || self.queue.depth > MAX_QUEUE_DEPTH {
            return Err(crate::Error::Config(format!(
                "queue depth must be in [1, {}], got {}", MAX_QUEUE_DEPTH, self.queue.depth
            )));
        }
        if self.templates.path.as_os_str().is_empty() {
            return Err(crate::Error::Config("templates path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_recognizer").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
