//! GitHub repository contents API over blocking `reqwest`.
//!
//! | Call | Request |
//! |---|---|
//! | `list_root` | `GET {api_base}/{owner}/{repo}/contents` |
//! | `put_contents` | `PUT {api_base}/{owner}/{repo}/contents/{path}` with a JSON [`CommitRequest`] |
//!
//! Every request carries `Accept: application/vnd.github+json`, the pinned
//! `X-GitHub-Api-Version`, a `User-Agent` (GitHub refuses requests without
//! one) and the bearer token when configured. No retries and no timeout
//! beyond the client default.

use super::api::{CommitRequest, CommitResponse, ContentApi, ContentEntry, PublishError};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

pub const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("asset-manifest/", env!("CARGO_PKG_VERSION"));

pub struct GithubContentApi {
    client: Client,
    repo_url: String,
}

impl GithubContentApi {
    /// Build a client for one repository.
    ///
    /// `api_base` is the prefix up to and including `/repos`
    /// (e.g. `https://api.github.com/repos`); a trailing slash is ignored.
    pub fn new(
        api_base: &str,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<Self, PublishError> {
        let client = client_builder(token)?.build()?;
        Ok(Self::with_client(client, api_base, owner, repo))
    }

    /// Use an already-configured client (headers included).
    pub fn with_client(client: Client, api_base: &str, owner: &str, repo: &str) -> Self {
        Self {
            client,
            repo_url: format!("{}/{owner}/{repo}", api_base.trim_end_matches('/')),
        }
    }

    fn root_url(&self) -> String {
        format!("{}/contents", self.repo_url)
    }

    fn file_url(&self, path: &str) -> String {
        format!("{}/contents/{path}", self.repo_url)
    }
}

/// Client builder with the API's required headers set as defaults.
pub fn client_builder(token: Option<&str>) -> Result<ClientBuilder, PublishError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        HeaderName::from_static("x-github-api-version"),
        HeaderValue::from_static(API_VERSION),
    );
    if let Some(token) = token {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| PublishError::InvalidHeader("Authorization"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
    }

    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers))
}

impl ContentApi for GithubContentApi {
    fn list_root(&self) -> Result<Vec<ContentEntry>, PublishError> {
        let url = self.root_url();
        debug!(%url, "listing repository root");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }

    fn put_contents(
        &self,
        path: &str,
        request: &CommitRequest,
    ) -> Result<CommitResponse, PublishError> {
        let url = self.file_url(path);
        debug!(%url, sha = %request.sha, "updating file");

        let response = self.client.put(&url).json(request).send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
        Ok(CommitResponse { status, body })
    }
}
