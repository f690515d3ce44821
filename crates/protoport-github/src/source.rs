use async_trait::async_trait;

use crate::types::ContentEntry;
use crate::GithubError;

/// Where remote directory listings and file bytes come from.
#[async_trait]
pub trait ContentsSource: Send + Sync {
    /// List the entries of the remote directory at `path` (`""` = root).
    async fn list(&self, path: &str) -> Result<Vec<ContentEntry>, GithubError>;

    /// Fetch the raw bytes of a file entry.
    async fn fetch_raw(&self, entry: &ContentEntry) -> Result<Vec<u8>, GithubError>;
}
