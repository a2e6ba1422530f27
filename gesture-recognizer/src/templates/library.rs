//! Template Library
//!
//! An immutable, ordered collection of labeled gestures. Order is the load
//! order and decides ties during classification.

use crate::capture::types::Gesture;

/// A labeled reference gesture
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub gesture: Gesture,
}

impl Template {
    pub fn new(name: impl Into<String>, gesture: Gesture) -> Self {
        Self {
            name: name.into(),
            gesture,
        }
    }
}

/// Read-only set of templates
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// All templates in load order
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// First template with the given name
    pub fn find(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template names in load order (duplicates kept)
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }
}

impl From<Vec<Template>> for TemplateLibrary {
    fn from(templates: Vec<Template>) -> Self {
        Self::new(templates)
    }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
