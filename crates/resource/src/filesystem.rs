//! Loads assets from a directory on disk. Paths are resolved relative to the
//! base directory and may not escape it.

use crate::provider::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// `None` while the base directory does not exist yet.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        let canonical_base = base_path.canonicalize().ok();
        Self {
            base_path,
            canonical_base,
        }
    }

    /// Splits an arbitrary file path into a provider rooted at its parent
    /// directory and the file name to load from it.
    pub fn for_file<P: AsRef<Path>>(file: P) -> Option<(Self, String)> {
        let file = file.as_ref();
        let name = file.file_name()?.to_str()?.to_string();
        let parent = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        Some((Self::new(parent), name))
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` for absolute paths and for anything that resolves
    /// outside the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(base) = &self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // Nothing to canonicalize against, so refuse any parent hop outright.
        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside {})", path, self.base_path.display())))?;

        log::debug!("Loading resource from {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path).is_some_and(|p| p.exists())
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
