//! GitHub REST client implementing [`IssueHost`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::sync::{
    domain::{Comment, RepositoryFullName, TicketNumber},
    ports::{IssueHost, IssueHostError, IssueHostResult},
};

/// Public GitHub REST API root.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const PAGE_SIZE: usize = 100;
const API_VERSION: &str = "2022-11-28";

/// Connection settings for [`GitHubClient`].
#[derive(Debug)]
pub struct GitHubConfig {
    /// Token sent as a bearer credential.
    pub token: SecretString,
    /// API root, e.g. [`DEFAULT_GITHUB_API_URL`].
    pub base_url: Url,
}

impl GitHubConfig {
    /// Creates a config for the given token and API root.
    #[must_use]
    pub const fn new(token: SecretString, base_url: Url) -> Self {
        Self { token, base_url }
    }
}

/// GitHub issue host.
#[derive(Debug)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct CommentRecord {
    body: Option<String>,
}

impl GitHubClient {
    /// Builds a client whose requests carry the GitHub API headers.
    ///
    /// # Errors
    ///
    /// Returns [`IssueHostError::Transport`] when the token is not a valid
    /// header value or the HTTP client cannot be built.
    pub fn new(config: GitHubConfig) -> IssueHostResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("tasklink"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.token.expose_secret().trim()
        ))
        .map_err(IssueHostError::transport)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(IssueHostError::transport)?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn comments_url(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
    ) -> IssueHostResult<Url> {
        let mut url = self.base_url.clone();
        let issue = number.to_string();
        url.path_segments_mut()
            .map_err(|()| {
                IssueHostError::Decode(format!(
                    "GitHub base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "repos",
                repository.owner(),
                repository.name(),
                "issues",
                issue.as_str(),
                "comments",
            ]);
        Ok(url)
    }

    async fn send(request: RequestBuilder) -> IssueHostResult<Response> {
        let response = request.send().await.map_err(IssueHostError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IssueHostError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl IssueHost for GitHubClient {
    async fn list_comments(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
    ) -> IssueHostResult<Vec<Comment>> {
        let url = self.comments_url(repository, number)?;
        let per_page = PAGE_SIZE.to_string();
        let mut comments = Vec::new();
        let mut page = 1_u32;
        loop {
            let page_param = page.to_string();
            let request = self.http.get(url.clone()).query(&[
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ]);
            let chunk: Vec<CommentRecord> = Self::send(request)
                .await?
                .json()
                .await
                .map_err(|err| IssueHostError::Decode(err.to_string()))?;
            let chunk_len = chunk.len();
            comments.extend(chunk.into_iter().map(|record| {
                record.body.map_or_else(Comment::without_body, Comment::new)
            }));
            if chunk_len < PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        debug!(%repository, %number, count = comments.len(), "fetched comment history");
        Ok(comments)
    }

    async fn create_comment(
        &self,
        repository: &RepositoryFullName,
        number: TicketNumber,
        body: &str,
    ) -> IssueHostResult<()> {
        let url = self.comments_url(repository, number)?;
        let request = self.http.post(url).json(&json!({ "body": body }));
        Self::send(request).await?;
        debug!(%repository, %number, "posted comment");
        Ok(())
    }
}
