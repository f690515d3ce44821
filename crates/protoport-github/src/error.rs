use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("invalid repository url: {0}")]
    InvalidRepoUrl(String),
    #[error("request to {url} failed: {status} body={body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry has no content url: {0}")]
    MissingUrl(String),
    #[error("scratch directory is not empty: {0}")]
    ScratchNotEmpty(PathBuf),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("core error: {0}")]
    Core(#[from] protoport_core::CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
