//! Template Module
//!
//! Holds the labeled reference gestures the classifier matches against and
//! the JSON format they are stored in.

pub mod library;
pub mod io;

pub use library::{Template, TemplateLibrary};
pub use io::{load_library, TemplateFile, TemplateRecord};
