use crate::GithubError;

/// A GitHub repository plus the optional ref and subpath named by its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub git_ref: Option<String>,
    /// Path inside the repository, without leading or trailing `/`.
    pub path: String,
}

impl RepoRef {
    /// Accepts `https://github.com/owner/repo`, `github.com/owner/repo`,
    /// `owner/repo` and `.../tree/<ref>/<path>` browser URLs.
    ///
    /// Refs containing `/` cannot be told apart from the path in a browser
    /// URL; the first segment after `tree/` is taken as the ref.
    pub fn parse(url: &str) -> Result<Self, GithubError> {
        let invalid = || GithubError::InvalidRepoUrl(url.to_string());

        let mut rest = url.trim();
        for scheme in ["https://", "http://"] {
            if let Some(stripped) = rest.strip_prefix(scheme) {
                rest = stripped;
                break;
            }
        }
        rest = rest.strip_prefix("www.").unwrap_or(rest);
        if let Some(stripped) = rest.strip_prefix("github.com/") {
            rest = stripped;
        } else if rest.contains("://") || rest.starts_with("github.com") {
            return Err(invalid());
        }

        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments.next().ok_or_else(invalid)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() || owner.contains(['.', ':']) {
            return Err(invalid());
        }

        let (git_ref, path) = match segments.next() {
            None => (None, String::new()),
            Some("tree") | Some("blob") => {
                let git_ref = segments.next().ok_or_else(invalid)?;
                let path = segments.collect::<Vec<_>>().join("/");
                (Some(git_ref.to_string()), path)
            }
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            git_ref,
            path,
        })
    }

    /// Contents API endpoint for `path` (empty path = repository root).
    pub fn contents_url(&self, api_base: &str, path: &str) -> String {
        let mut url = format!(
            "{}/repos/{}/{}/contents",
            api_base.trim_end_matches('/'),
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo)
        );
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        if let Some(git_ref) = &self.git_ref {
            url.push_str("?ref=");
            url.push_str(&urlencoding::encode(git_ref));
        }
        url
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        if let Some(git_ref) = &self.git_ref {
            write!(f, "@{git_ref}")?;
        }
        Ok(())
    }
}
