//! GitHub REST release source.
//!
//! Implements scribe-core's `ReleaseSource` over the GitHub releases API:
//! `GET /repos/{owner}/{repo}/releases` for listing (newest first, as
//! GitHub orders them) and `PATCH /repos/{owner}/{repo}/releases/{id}` for
//! the write-back.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;

use scribe_core::{
    ReleaseRecord, ReleaseSource, ReleaseUpdate, RepoSlug, SourceError, SourceResult,
};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL. Override for GitHub Enterprise or tests.
    pub base_url: String,
    /// Personal access / workflow token.
    pub token: String,
}

impl GitHubConfig {
    /// Config for api.github.com with the given token.
    pub fn new(token: &str) -> Self {
        GitHubConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.to_string(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Release source backed by the GitHub REST API.
pub struct GitHubReleaseSource {
    config: GitHubConfig,
    http: reqwest::Client,
}

impl GitHubReleaseSource {
    /// Create a new client.
    pub fn new(config: GitHubConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("release-scribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        GitHubReleaseSource { config, http }
    }

    fn releases_url(&self, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.config.base_url,
            repo.owner(),
            repo.name()
        )
    }

    fn release_url(&self, repo: &RepoSlug, release_id: u64) -> String {
        format!("{}/{}", self.releases_url(repo), release_id)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION)
    }
}

/// Map a non-success response to `SourceError::Api`, preserving the body.
async fn api_error(status: StatusCode, response: reqwest::Response) -> SourceError {
    let message = response
        .text()
        .await
        .unwrap_or_default()
        .trim()
        .to_string();
    SourceError::Api {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn list_releases(&self, repo: &RepoSlug) -> SourceResult<Vec<ReleaseRecord>> {
        let url = self.releases_url(repo);
        debug!(url = %url, "listing releases");

        let response = self
            .request(self.http.get(&url))
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        response
            .json::<Vec<ReleaseRecord>>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    async fn update_release(
        &self,
        repo: &RepoSlug,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> SourceResult<ReleaseRecord> {
        let url = self.release_url(repo, release_id);
        debug!(url = %url, release_id, "updating release");

        let response = self
            .request(self.http.patch(&url))
            .json(update)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        response
            .json::<ReleaseRecord>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}
