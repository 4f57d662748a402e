//! Model workspaces: isolated per-combination copies of the base model
//!
//! The runner never mutates the base model. For every combination it asks a
//! [`ModelWorkspace`] for a fresh copy rooted at the combination folder,
//! loads that copy into a new [`ResolutionContext`], mutates it, and writes
//! it back through the returned [`WorkspaceHandle`].
//!
//! # Example
//!
//! ```rust,no_run
//! use expauto::model::ResolutionContext;
//! use expauto::workspace::{FsWorkspace, ModelFiles, ModelWorkspace};
//!
//! let base = ModelFiles::new("models/usage.json", "models/allocation.json");
//! let handle = FsWorkspace::new().copy_to_folder(&base, "runs/exp-1/loops=3".as_ref())?;
//!
//! let mut ctx = ResolutionContext::new();
//! handle.load_into(&mut ctx)?;
//! // ... mutate ...
//! handle.persist(&mut ctx)?;
//! # Ok::<(), expauto::Error>(())
//! ```

mod fs;

pub use fs::FsWorkspace;

use crate::model::ResolutionContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of the files that make up one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFiles {
    /// Usage model (workloads, behaviour)
    pub usage_model: PathBuf,
    /// Allocation model (deployment onto resource containers)
    pub allocation: PathBuf,
    /// Further model files (repository, system, resource environment, ...)
    #[serde(default)]
    pub auxiliary: Vec<PathBuf>,
}

impl ModelFiles {
    /// Model consisting of a usage model and an allocation only.
    #[must_use]
    pub fn new(usage_model: impl Into<PathBuf>, allocation: impl Into<PathBuf>) -> Self {
        Self {
            usage_model: usage_model.into(),
            allocation: allocation.into(),
            auxiliary: Vec::new(),
        }
    }

    /// Add an auxiliary model file.
    #[must_use]
    pub fn with_auxiliary(mut self, path: impl Into<PathBuf>) -> Self {
        self.auxiliary.push(path.into());
        self
    }

    /// All files, usage model first, then allocation, then auxiliaries.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        [self.usage_model.as_path(), self.allocation.as_path()]
            .into_iter()
            .chain(self.auxiliary.iter().map(PathBuf::as_path))
    }

    /// Resolve relative paths against `base`; absolute paths are kept.
    #[must_use]
    pub fn resolved_against(&self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        Self {
            usage_model: resolve(&self.usage_model),
            allocation: resolve(&self.allocation),
            auxiliary: self.auxiliary.iter().map(resolve).collect(),
        }
    }
}

/// Source of isolated model copies.
pub trait ModelWorkspace {
    /// Copy the model `base` into `destination`, creating the folder.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Workspace`] if the copy cannot be made.
    fn copy_to_folder(&self, base: &ModelFiles, destination: &Path) -> Result<WorkspaceHandle>;

    /// Write the mutated resources of `ctx` back into `handle`'s copy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persist`] if a resource cannot be written.
    fn persist(
        &self,
        handle: &WorkspaceHandle,
        ctx: &mut ResolutionContext,
    ) -> Result<Vec<PathBuf>> {
        handle.persist(ctx)
    }
}

/// A prepared model copy owned by exactly one combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceHandle {
    root: PathBuf,
    files: ModelFiles,
}

impl WorkspaceHandle {
    /// Create a handle for a copy rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, files: ModelFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Combination folder holding the copy and tool artifacts.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locations of the copied model files.
    #[must_use]
    pub const fn files(&self) -> &ModelFiles {
        &self.files
    }

    /// Load every copied model file into `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Load`] if a file is unreadable, malformed, or
    /// redefines an element id.
    pub fn load_into(&self, ctx: &mut ResolutionContext) -> Result<()> {
        for path in self.files.all() {
            ctx.load_file(path)?;
        }
        Ok(())
    }

    /// Write every mutated resource of `ctx` back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persist`] on the first failed write.
    pub fn persist(&self, ctx: &mut ResolutionContext) -> Result<Vec<PathBuf>> {
        ctx.save_dirty()
    }
}
