//! Destinations for finished reports.

use crate::assembler::AssembledReport;
use crate::error::ExportError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Stores the report and returns where it ended up.
    async fn export(&self, report: &AssembledReport) -> Result<PathBuf, ExportError>;
}

/// Writes `<dir>/<filename>`, creating the directory when needed.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    overwrite: bool,
}

impl FileExporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            overwrite: true,
        }
    }

    /// With `false`, an existing file is left alone and the export fails.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ReportExporter for FileExporter {
    async fn export(&self, report: &AssembledReport) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::Io { path: self.dir.clone(), source })?;

        let path = self.dir.join(&report.filename);
        if !self.overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ExportError::Rejected(format!("'{}' already exists", path.display())));
        }

        tokio::fs::write(&path, &report.pdf)
            .await
            .map_err(|source| ExportError::Io { path: path.clone(), source })?;
        log::debug!("Wrote {} bytes to {}", report.pdf.len(), path.display());
        Ok(path)
    }
}

/// Keeps exported files in memory, in export order.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl ReportExporter for MemoryExporter {
    async fn export(&self, report: &AssembledReport) -> Result<PathBuf, ExportError> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((report.filename.clone(), report.pdf.clone()));
        Ok(PathBuf::from(&report.filename))
    }
}
