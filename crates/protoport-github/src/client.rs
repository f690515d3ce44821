use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::repo::RepoRef;
use crate::source::ContentsSource;
use crate::types::{ContentEntry, ContentsResponse};
use crate::GithubError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("protoport/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_base: String,
    /// Personal access token. `None` means the repository is public.
    pub token: Option<String>,
    /// Upper bound for each request, connect through body.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Contents API client for a single repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    repo: RepoRef,
    api_base: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl GithubClient {
    pub fn new(repo: RepoRef, options: ClientOptions) -> Result<Self, GithubError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            repo,
            api_base: options.api_base.trim_end_matches('/').to_string(),
            token: options.token.filter(|t| !t.is_empty()),
            client,
        })
    }

    pub fn is_public(&self) -> bool {
        self.token.is_none()
    }

    fn request(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .header(API_VERSION_HEADER, API_VERSION);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    async fn get_checked(&self, url: &str, accept: &str) -> Result<reqwest::Response, GithubError> {
        let resp = self.request(url, accept).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl ContentsSource for GithubClient {
    async fn list(&self, path: &str) -> Result<Vec<ContentEntry>, GithubError> {
        let url = self.repo.contents_url(&self.api_base, path);
        tracing::debug!(%url, public = self.is_public(), "listing remote directory");

        let body = self.get_checked(&url, ACCEPT_JSON).await?.bytes().await?;
        let parsed: ContentsResponse =
            serde_json::from_slice(&body).map_err(|source| GithubError::Decode {
                url: url.clone(),
                source,
            })?;
        Ok(parsed.into_entries())
    }

    async fn fetch_raw(&self, entry: &ContentEntry) -> Result<Vec<u8>, GithubError> {
        let url = entry
            .content_url()
            .ok_or_else(|| GithubError::MissingUrl(entry.path.clone()))?;
        tracing::debug!(%url, path = %entry.path, "fetching raw content");

        let bytes = self.get_checked(url, ACCEPT_RAW).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
