use serde::Deserialize;

use protoport_core::is_proto_file;

/// `type` of a Contents API entry. Symlinks and submodules land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// One entry of a `GET /repos/{owner}/{repo}/contents/{path}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl ContentEntry {
    pub fn file(path: &str, url: &str) -> Self {
        Self::new(ContentType::File, path, Some(url.to_string()))
    }

    pub fn dir(path: &str) -> Self {
        Self::new(ContentType::Dir, path, None)
    }

    fn new(kind: ContentType, path: &str, url: Option<String>) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            kind,
            name,
            path: path.to_string(),
            url,
            download_url: None,
            sha: None,
            size: None,
        }
    }

    pub fn is_proto_file(&self) -> bool {
        self.kind == ContentType::File && is_proto_file(&self.name)
    }

    /// URL to fetch the raw bytes from.
    pub fn content_url(&self) -> Option<&str> {
        self.url.as_deref().or(self.download_url.as_deref())
    }
}

/// The endpoint answers with an array for directories and a single object
/// when the path names a file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl ContentsResponse {
    pub(crate) fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            ContentsResponse::Listing(entries) => entries,
            ContentsResponse::Single(entry) => vec![entry],
        }
    }
}
