use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::path::ensure_dir;
use crate::CoreError;

/// Local directory that remote proto files are materialized into.
///
/// Either a caller-chosen path, cleared on `prepare`, or a fresh temporary
/// directory that is removed when the value is dropped.
#[derive(Debug)]
pub struct ScratchDir {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl ScratchDir {
    /// Use `root` as the scratch directory, creating it if needed and
    /// removing anything a previous run left behind.
    pub fn prepare(root: &Path) -> Result<Self, CoreError> {
        ensure_dir(root)?;
        clear_dir(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            temp: None,
        })
    }

    pub fn temporary() -> Result<Self, CoreError> {
        let temp = tempfile::Builder::new().prefix("protoport-").tempdir()?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            temp: Some(temp),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(std::fs::read_dir(&self.root)?.next().is_none())
    }

    /// Keep the directory on disk after this value is dropped.
    pub fn persist(mut self) -> PathBuf {
        if let Some(temp) = self.temp.take() {
            return temp.keep();
        }
        self.root
    }
}

/// Remove every entry inside `dir`, leaving `dir` itself in place.
pub fn clear_dir(dir: &Path) -> Result<(), CoreError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        tracing::debug!(path = %path.display(), "removed stale scratch entry");
    }
    Ok(())
}
