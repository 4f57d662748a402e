//! Resolution context: the loaded, mutable view of one model copy

use super::{ModelDocument, ModelElement};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A model document together with the file it was loaded from.
#[derive(Debug, Clone)]
pub struct Resource {
    path: PathBuf,
    document: ModelDocument,
    dirty: bool,
}

impl Resource {
    /// File backing this resource.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded document.
    #[must_use]
    pub const fn document(&self) -> &ModelDocument {
        &self.document
    }

    /// Whether an element of this resource was handed out for mutation
    /// since the last save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Location of a bound element inside a [`ResolutionContext`].
///
/// Only valid for the context that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    id: String,
    resource: usize,
    element: usize,
}

impl ElementHandle {
    /// Identifier of the bound element.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Isolated set of loaded model resources with id-based element lookup.
///
/// One context is created per combination and never shared, so mutations
/// cannot leak between branches of the search.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    resources: Vec<Resource>,
    index: HashMap<String, (usize, usize)>,
}

impl ResolutionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loaded resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Loaded resources in load order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Add an already parsed document backed by `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if `path` is already loaded or an element id
    /// is already defined by a loaded resource.
    pub fn add_resource(&mut self, path: impl Into<PathBuf>, document: ModelDocument) -> Result<()> {
        let path = path.into();
        if self.resources.iter().any(|r| r.path == path) {
            return Err(Error::Load(format!(
                "resource {} is already loaded",
                path.display()
            )));
        }

        let resource_idx = self.resources.len();
        let mut new_ids = HashMap::with_capacity(document.elements.len());
        for (element_idx, element) in document.elements.iter().enumerate() {
            if self.index.contains_key(&element.id)
                || new_ids
                    .insert(element.id.clone(), (resource_idx, element_idx))
                    .is_some()
            {
                return Err(Error::Load(format!(
                    "duplicate element id '{}' in {}",
                    element.id,
                    path.display()
                )));
            }
        }

        self.index.extend(new_ids);
        self.resources.push(Resource {
            path,
            document,
            dirty: false,
        });
        Ok(())
    }

    /// Read and parse a model file into this context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be read or parsed, or if
    /// it clashes with already loaded resources.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Load(format!("Failed to read {}: {e}", path.display())))?;
        let document: ModelDocument = serde_json::from_str(&contents)
            .map_err(|e| Error::Load(format!("Failed to parse {}: {e}", path.display())))?;
        self.add_resource(path, document)
    }

    /// Look up an element by id across all resources.
    #[must_use]
    pub fn find_element(&self, id: &str) -> Option<&ModelElement> {
        self.index
            .get(id)
            .map(|&(r, e)| &self.resources[r].document.elements[e])
    }

    /// Mutable lookup by id; marks the owning resource dirty.
    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut ModelElement> {
        let handle = self.locate(id)?;
        self.element_mut(&handle)
    }

    /// Resolve `id` to a handle usable with [`Self::element_mut`].
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<ElementHandle> {
        self.index.get(id).map(|&(resource, element)| ElementHandle {
            id: id.to_string(),
            resource,
            element,
        })
    }

    /// Element behind `handle`.
    #[must_use]
    pub fn element(&self, handle: &ElementHandle) -> Option<&ModelElement> {
        self.resources
            .get(handle.resource)
            .and_then(|r| r.document.elements.get(handle.element))
            .filter(|e| e.id == handle.id)
    }

    /// Mutable access to the element behind `handle`; marks its resource dirty.
    pub fn element_mut(&mut self, handle: &ElementHandle) -> Option<&mut ModelElement> {
        let resource = self.resources.get_mut(handle.resource)?;
        let element = resource
            .document
            .elements
            .get_mut(handle.element)
            .filter(|e| e.id == handle.id)?;
        resource.dirty = true;
        Some(element)
    }

    /// Paths of resources with pending modifications.
    #[must_use]
    pub fn dirty_paths(&self) -> Vec<&Path> {
        self.resources
            .iter()
            .filter(|r| r.dirty)
            .map(|r| r.path.as_path())
            .collect()
    }

    /// Write every dirty resource back to its file and mark it clean.
    ///
    /// Returns the paths that were written, in load order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] on the first resource that cannot be
    /// serialized or written. Resources saved before the failure stay clean.
    pub fn save_dirty(&mut self) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::new();
        for resource in self.resources.iter_mut().filter(|r| r.dirty) {
            let json = serde_json::to_string_pretty(&resource.document).map_err(|e| {
                Error::Persist(format!(
                    "Failed to serialize {}: {e}",
                    resource.path.display()
                ))
            })?;
            std::fs::write(&resource.path, json).map_err(|e| {
                Error::Persist(format!("Failed to write {}: {e}", resource.path.display()))
            })?;
            tracing::info!(path = %resource.path.display(), "Saved resource");
            resource.dirty = false;
            saved.push(resource.path.clone());
        }
        Ok(saved)
    }
}
