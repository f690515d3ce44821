use std::path::{Path, PathBuf};

use protoport_core::path::{remote_parent, remote_to_local, strip_remote_base};
use protoport_core::{ensure_dir, CoreError, ScratchDir};

use crate::source::ContentsSource;
use crate::types::{ContentEntry, ContentType};
use crate::GithubError;

/// Result of a materialization pass.
#[derive(Debug, Clone)]
pub struct Materialized {
    /// Local directory mirroring the requested remote subpath.
    pub root: PathBuf,
    /// Every file written, in fetch order.
    pub files: Vec<PathBuf>,
}

/// Mirrors the `.proto` files of a remote tree into a scratch directory.
pub struct Materializer<S> {
    source: S,
}

impl<S: ContentsSource> Materializer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walk the remote tree below `sub_path` and write each `.proto` file to
    /// the same relative location under the scratch root.
    ///
    /// The scratch directory must be empty; files from an earlier run are
    /// never mixed into this one. The first error aborts the whole pass.
    pub async fn materialize(
        &self,
        sub_path: &str,
        scratch: &ScratchDir,
    ) -> Result<Materialized, GithubError> {
        let root = scratch.root();
        if !scratch.is_empty()? {
            return Err(GithubError::ScratchNotEmpty(root.to_path_buf()));
        }

        let base = sub_path.trim_matches('/').to_string();
        let mut pending = vec![base.clone()];
        let mut files = Vec::new();

        while let Some(dir) = pending.pop() {
            let entries = self.source.list(&dir).await?;
            tracing::debug!(path = %dir, entries = entries.len(), "listed remote directory");

            let mut subdirs = Vec::new();
            for entry in entries {
                match entry.kind {
                    ContentType::Dir => subdirs.push(entry.path),
                    ContentType::File if entry.is_proto_file() => {
                        files.push(self.write_entry(&entry, &base, root).await?);
                    }
                    _ => {}
                }
            }
            // Reversed so directories are visited in listing order.
            pending.extend(subdirs.into_iter().rev());
        }

        tracing::info!(
            files = files.len(),
            root = %root.display(),
            "materialized remote proto files"
        );
        Ok(Materialized {
            root: root.to_path_buf(),
            files,
        })
    }

    async fn write_entry(
        &self,
        entry: &ContentEntry,
        base: &str,
        root: &Path,
    ) -> Result<PathBuf, GithubError> {
        let relative = strip_remote_base(&entry.path, base)
            .ok_or_else(|| CoreError::UnsafePath(entry.path.clone()))?;
        if entry.name.is_empty() || entry.name.contains('/') {
            return Err(CoreError::UnsafePath(entry.name.clone()).into());
        }
        let name = remote_to_local(&entry.name)?;
        // A subpath naming a single file strips down to nothing.
        let parent = if relative.is_empty() {
            PathBuf::new()
        } else {
            remote_to_local(remote_parent(relative))?
        };

        let bytes = self.source.fetch_raw(entry).await?;

        let dir = root.join(parent);
        ensure_dir(&dir)?;
        let target = dir.join(name);
        std::fs::write(&target, &bytes)?;
        tracing::debug!(path = %target.display(), bytes = bytes.len(), "wrote proto file");
        Ok(target)
    }
}
