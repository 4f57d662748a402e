//! In-memory model representation
//!
//! A model is split over several JSON documents (usage model, allocation,
//! repository, ...). Each document is a flat list of identified elements
//! whose tunable parameters live in an ordered string property map.
//!
//! ## Structure
//!
//! ```text
//! ResolutionContext (1) ──< Resource (N) [one per model file]
//!                               │
//!                               └──< ModelElement (N)
//! ```

mod context;

pub use context::{ElementHandle, Resource, ResolutionContext};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a model element, used by strategies to reject wrong targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// Loop action in a behaviour specification
    Loop,
    /// Closed workload of a usage scenario
    ClosedWorkload,
    /// Open workload of a usage scenario
    OpenWorkload,
    /// Processing resource of a resource container
    ProcessingResource,
    /// Resource container (server node)
    ResourceContainer,
    /// Any other element; not targetable by the built-in strategies
    Other(String),
}

impl ElementKind {
    /// Tag as written in model documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Loop => "loop",
            Self::ClosedWorkload => "closed_workload",
            Self::OpenWorkload => "open_workload",
            Self::ProcessingResource => "processing_resource",
            Self::ResourceContainer => "resource_container",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "loop" => Self::Loop,
            "closed_workload" => Self::ClosedWorkload,
            "open_workload" => Self::OpenWorkload,
            "processing_resource" => Self::ProcessingResource,
            "resource_container" => Self::ResourceContainer,
            _ => Self::Other(tag),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One identified element of a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelElement {
    /// Identifier, unique across all documents of a model
    pub id: String,
    /// Human-readable entity name
    #[serde(default)]
    pub name: String,
    /// Element kind
    pub kind: ElementKind,
    /// Tunable parameters
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ModelElement {
    /// Create an element without properties.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            properties: BTreeMap::new(),
        }
    }

    /// Set a property, returning the element (construction helper).
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// One-line rendering used in variation descriptions,
    /// e.g. `loop[loop-1] 'Retry' {iterations=3}`.
    #[must_use]
    pub fn summary(&self) -> String {
        let props = self
            .properties
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}[{}] '{}' {{{props}}}", self.kind, self.id, self.name)
    }
}

/// Contents of one model file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Elements in file order
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

impl ModelDocument {
    /// Create a document from elements.
    #[must_use]
    pub fn new(elements: Vec<ModelElement>) -> Self {
        Self { elements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_tags() {
        assert_eq!(ElementKind::from("loop".to_string()), ElementKind::Loop);
        assert_eq!(
            ElementKind::from("branch".to_string()),
            ElementKind::Other("branch".to_string())
        );
        assert_eq!(String::from(ElementKind::OpenWorkload), "open_workload");
    }

    #[test]
    fn test_summary() {
        let element = ModelElement::new("loop-1", "Retry", ElementKind::Loop)
            .with_property("iterations", "3")
            .with_property("body", "call");
        assert_eq!(element.summary(), "loop[loop-1] 'Retry' {body=call, iterations=3}");
    }

    #[test]
    fn test_document_deserialize() {
        let json = r#"{"elements":[{"id":"w","kind":"closed_workload","properties":{"population":"10"}}]}"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].kind, ElementKind::ClosedWorkload);
        assert_eq!(doc.elements[0].property("population"), Some("10"));
        assert_eq!(doc.elements[0].name, "");
    }
}
