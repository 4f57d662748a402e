//! Filesystem-backed workspace

use super::{ModelFiles, ModelWorkspace, WorkspaceHandle};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Copies model files into the combination folder, keeping file names.
///
/// With `copy_auxiliary` disabled only the usage model and allocation are
/// copied and the returned handle lists no auxiliary files, so elements
/// defined in auxiliary files are not resolvable in that workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsWorkspace {
    copy_auxiliary: bool,
}

impl Default for FsWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl FsWorkspace {
    /// Workspace copying all model files.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            copy_auxiliary: true,
        }
    }

    /// Choose whether auxiliary model files are copied.
    #[must_use]
    pub const fn copy_auxiliary(mut self, copy: bool) -> Self {
        self.copy_auxiliary = copy;
        self
    }

    fn copy_file(source: &Path, destination: &Path, seen: &mut HashSet<PathBuf>) -> Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| {
            Error::Workspace(format!("model path {} has no file name", source.display()))
        })?;
        let target = destination.join(file_name);
        if !seen.insert(target.clone()) {
            return Err(Error::Workspace(format!(
                "two model files map to {}",
                target.display()
            )));
        }
        std::fs::copy(source, &target).map_err(|e| {
            Error::Workspace(format!(
                "Failed to copy {} to {}: {e}",
                source.display(),
                target.display()
            ))
        })?;
        Ok(target)
    }
}

impl ModelWorkspace for FsWorkspace {
    fn copy_to_folder(&self, base: &ModelFiles, destination: &Path) -> Result<WorkspaceHandle> {
        std::fs::create_dir_all(destination).map_err(|e| {
            Error::Workspace(format!(
                "Failed to create folder {}: {e}",
                destination.display()
            ))
        })?;

        let mut seen = HashSet::new();
        let usage_model = Self::copy_file(&base.usage_model, destination, &mut seen)?;
        let allocation = Self::copy_file(&base.allocation, destination, &mut seen)?;
        let auxiliary = if self.copy_auxiliary {
            base.auxiliary
                .iter()
                .map(|p| Self::copy_file(p, destination, &mut seen))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        tracing::debug!(folder = %destination.display(), "Copied model into workspace");
        Ok(WorkspaceHandle::new(
            destination,
            ModelFiles {
                usage_model,
                allocation,
                auxiliary,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, ModelDocument, ModelElement, ResolutionContext};

    fn write_model(dir: &Path) -> ModelFiles {
        let usage = ModelDocument::new(vec![ModelElement::new("loop-1", "L", ElementKind::Loop)
            .with_property("iterations", "1")]);
        let alloc = ModelDocument::new(vec![]);
        let repo = ModelDocument::new(vec![ModelElement::new(
            "cpu",
            "CPU",
            ElementKind::ProcessingResource,
        )]);
        std::fs::write(dir.join("u.json"), serde_json::to_string(&usage).unwrap()).unwrap();
        std::fs::write(dir.join("a.json"), serde_json::to_string(&alloc).unwrap()).unwrap();
        std::fs::write(dir.join("r.json"), serde_json::to_string(&repo).unwrap()).unwrap();
        ModelFiles::new(dir.join("u.json"), dir.join("a.json")).with_auxiliary(dir.join("r.json"))
    }

    #[test]
    fn test_copy_creates_isolated_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_model(dir.path());
        let dest = dir.path().join("run").join("loops=1");

        let handle = FsWorkspace::new().copy_to_folder(&base, &dest).unwrap();
        assert_eq!(handle.root(), dest.as_path());
        assert_eq!(handle.files().usage_model, dest.join("u.json"));
        assert_eq!(handle.files().auxiliary, vec![dest.join("r.json")]);

        let mut ctx = ResolutionContext::new();
        handle.load_into(&mut ctx).unwrap();
        assert_eq!(ctx.resource_count(), 3);

        let h = ctx.locate("loop-1").unwrap();
        ctx.element_mut(&h)
            .unwrap()
            .properties
            .insert("iterations".to_string(), "9".to_string());
        handle.persist(&mut ctx).unwrap();

        // base copy untouched
        let mut base_ctx = ResolutionContext::new();
        base_ctx.load_file(&base.usage_model).unwrap();
        assert_eq!(
            base_ctx.find_element("loop-1").unwrap().property("iterations"),
            Some("1")
        );
    }

    #[test]
    fn test_skip_auxiliary() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_model(dir.path());
        let dest = dir.path().join("out");

        let handle = FsWorkspace::new()
            .copy_auxiliary(false)
            .copy_to_folder(&base, &dest)
            .unwrap();
        assert!(handle.files().auxiliary.is_empty());
        assert!(!dest.join("r.json").exists());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let base = ModelFiles::new(dir.path().join("nope.json"), dir.path().join("a.json"));
        let err = FsWorkspace::new()
            .copy_to_folder(&base, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, Error::Workspace(_)));
    }

    #[test]
    fn test_colliding_file_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("x")).unwrap();
        std::fs::write(dir.path().join("m.json"), "{}").unwrap();
        std::fs::write(dir.path().join("x").join("m.json"), "{}").unwrap();
        let base = ModelFiles::new(dir.path().join("m.json"), dir.path().join("x").join("m.json"));
        let err = FsWorkspace::new()
            .copy_to_folder(&base, &dir.path().join("out"))
            .unwrap_err();
        assert!(err.to_string().contains("two model files"));
    }
}
