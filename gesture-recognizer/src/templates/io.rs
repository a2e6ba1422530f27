//! Template Storage
//!
//! JSON format for template sets. Each point is stored as a
//! `[stroke_id, x, y]` tuple:
//!
//! ```json
//! { "format_version": "1.0",
//!   "gestures": [ { "name": "line", "points": [[0, 0.0, 0.0], [0, 1.0, 0.0]] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::library::{Template, TemplateLibrary};
use crate::capture::types::{Gesture, Point};
use crate::{Error, Result};

/// Current template file format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// File extension picked up when loading a template directory
pub const TEMPLATE_EXTENSION: &str = "json";

/// One stored template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    /// `(stroke_id, x, y)` tuples in drawing order
    pub points: Vec<(i32, f64, f64)>,
}

impl TemplateRecord {
    pub fn from_gesture(name: impl Into<String>, gesture: &Gesture) -> Self {
        Self {
            name: name.into(),
            points: gesture
                .points()
                .iter()
                .map(|p| (p.stroke_id, p.x, p.y))
                .collect(),
        }
    }

    /// Validate and convert into a [`Template`]
    pub fn to_template(&self) -> Result<Template> {
        if self.name.trim().is_empty() {
            return Err(Error::TemplateLoad("template with empty name".to_string()));
        }

        let points: Vec<Point> = self
            .points
            .iter()
            .map(|&(stroke_id, x, y)| Point::new(x, y, stroke_id))
            .collect();

        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::TemplateLoad(format!(
                "template '{}': point {} has a non-finite coordinate",
                self.name, bad
            )));
        }

        let gesture = Gesture::new(points)
            .map_err(|_| Error::TemplateLoad(format!("template '{}' has no points", self.name)))?;

        Ok(Template::new(self.name.clone(), gesture))
    }
}

/// A stored set of templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    #[serde(default)]
    pub gestures: Vec<TemplateRecord>,
}

fn default_format_version() -> String {
    CURRENT_FORMAT_VERSION.to_string()
}

impl TemplateFile {
    /// Create an empty template file
    pub fn new() -> Self {
        Self {
            format_version: default_format_version(),
            gestures: Vec::new(),
        }
    }

    /// A file holding a single gesture
    pub fn from_gesture(name: impl Into<String>, gesture: &Gesture) -> Self {
        let mut file = Self::new();
        file.append(name, gesture);
        file
    }

    /// Add a gesture as a new template record
    pub fn append(&mut self, name: impl Into<String>, gesture: &Gesture) {
        self.gestures.push(TemplateRecord::from_gesture(name, gesture));
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Load a template file.
    ///
    /// Logs a warning if the file was saved with a different format version
    /// but still attempts to read it. Any read or parse failure is reported
    /// as [`Error::TemplateLoad`] naming the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::TemplateLoad(format!("{}: {}", path.display(), e)))?;
        let file: TemplateFile = serde_json::from_str(&content)
            .map_err(|e| Error::TemplateLoad(format!("{}: {}", path.display(), e)))?;

        if file.format_version != CURRENT_FORMAT_VERSION {
            warn!(
                path = %path.display(),
                found = %file.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Template file has different format version"
            );
        }

        Ok(file)
    }

    /// Save to a file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate every record and convert to templates, keeping file order
    pub fn to_templates(&self) -> Result<Vec<Template>> {
        self.gestures
            .iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .to_template()
                    .map_err(|e| Error::TemplateLoad(format!("record {}: {}", i, strip_prefix(&e))))
            })
            .collect()
    }
}

impl Default for TemplateFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Message of a `TemplateLoad` error without its display prefix
fn strip_prefix(error: &Error) -> String {
    match error {
        Error::TemplateLoad(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Load a template library from a file or a directory of `*.json` files.
///
/// Directory entries are read in file-name order so that tie-breaking
/// between templates is reproducible. An empty result is an error.
pub fn load_library(path: impl AsRef<Path>) -> Result<TemplateLibrary> {
    let path = path.as_ref();

    let files = if path.is_dir() {
        template_files_in(path)?
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(Error::TemplateLoad(format!(
            "{}: no such file or directory",
            path.display()
        )));
    };

    let mut templates = Vec::new();
    for file_path in &files {
        let file = TemplateFile::load(file_path)?;
        let loaded = file
            .to_templates()
            .map_err(|e| Error::TemplateLoad(format!("{}: {}", file_path.display(), strip_prefix(&e))))?;
        debug!(path = %file_path.display(), count = loaded.len(), "Loaded template file");
        templates.extend(loaded);
    }

    if templates.is_empty() {
        return Err(Error::TemplateLoad(format!(
            "{}: no templates found",
            path.display()
        )));
    }

    info!(path = %path.display(), files = files.len(), templates = templates.len(), "Loaded template library");
    Ok(TemplateLibrary::new(templates))
}

fn is_template_file(path: &Path) -> bool {
    path.is_file() && path.extension().map(|e| e == TEMPLATE_EXTENSION).unwrap_or(false)
}

/// `*.json` files directly inside `dir`, sorted by file name.
///
/// An entry that cannot be read fails the whole load.
fn template_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::TemplateLoad(format!("{}: {}", dir.display(), e)))?;

    select_template_files(dir, entries.map(|entry| entry.map(|e| e.path())))
}

fn select_template_files(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::TemplateLoad(format!("{}: {}", dir.display(), e)))?;
        if is_template_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
