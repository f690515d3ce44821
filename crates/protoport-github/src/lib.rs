pub mod client;
pub mod error;
pub mod materialize;
pub mod repo;
pub mod source;
pub mod types;

pub use client::{ClientOptions, GithubClient, DEFAULT_API_BASE};
pub use error::GithubError;
pub use materialize::{Materialized, Materializer};
pub use repo::RepoRef;
pub use source::ContentsSource;
pub use types::{ContentEntry, ContentType};

use protoport_core::ScratchDir;

/// Fetch every `.proto` file under `sub_path` of `repo` into `scratch`.
///
/// `sub_path` overrides any path embedded in the repository URL;
/// `options.token` switches between public and authenticated access.
pub async fn materialize(
    repo: RepoRef,
    sub_path: Option<&str>,
    options: ClientOptions,
    scratch: &ScratchDir,
) -> Result<Materialized, GithubError> {
    let start = sub_path
        .map(str::to_string)
        .unwrap_or_else(|| repo.path.clone());
    let client = GithubClient::new(repo, options)?;
    Materializer::new(client).materialize(&start, scratch).await
}
