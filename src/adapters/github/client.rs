//! GitHub HTTP client.
//!
//! Wraps the GitHub REST API v3 listing endpoints behind the
//! [`RemoteRepoSource`] port. Rate-limit responses are mapped to
//! [`RemoteError::RateLimited`] so callers can tell quota exhaustion
//! apart from other transport failures; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::domain::errors::RemoteError;
use crate::domain::models::GitHubConfig;
use crate::domain::ports::{RemoteRepoSource, RepoDescriptor};

use super::models::GitHubRepo;

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client, carrying the request timeout.
    http: Client,
    /// API base URL; overridable for tests.
    base_url: String,
    /// Optional personal access token.
    token: Option<String>,
    /// Page size for repository listings.
    per_page: u32,
}

impl GitHubClient {
    /// Create a client from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            per_page: config.per_page,
        })
    }

    /// Build a request with the standard GitHub headers.
    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "repocache");

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        req
    }

    /// Map a non-success response to the remote error taxonomy.
    ///
    /// GitHub signals quota exhaustion either as 429 or as 403 with the
    /// `x-ratelimit-remaining` header at zero.
    async fn classify_failure(resp: Response) -> RemoteError {
        let status = resp.status();

        let remaining_zero = resp
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0");

        if status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN && remaining_zero)
        {
            let retry_after_secs = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return RemoteError::RateLimited { retry_after_secs };
        }

        let body = resp.text().await.unwrap_or_default();
        RemoteError::Status {
            status: status.as_u16(),
            body,
        }
    }

    async fn send(&self, url: &str) -> Result<Response, RemoteError> {
        let resp = self
            .request(url)
            .send()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::classify_failure(resp).await)
        }
    }
}

#[async_trait]
impl RemoteRepoSource for GitHubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoDescriptor>, RemoteError> {
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.base_url, username, self.per_page
        );

        tracing::debug!(username, "fetching repository list from GitHub");

        let resp = self.send(&url).await?;
        let repos: Vec<GitHubRepo> = resp
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;

        Ok(repos
            .into_iter()
            .map(|r| RepoDescriptor {
                name: r.name,
                url: r.html_url,
            })
            .collect())
    }

    async fn get_repo(
        &self,
        username: &str,
        repo_name: &str,
    ) -> Result<Option<RepoDescriptor>, RemoteError> {
        let url = format!("{}/repos/{}/{}", self.base_url, username, repo_name);

        tracing::debug!(username, repo_name, "fetching single repository from GitHub");

        let resp = self
            .request(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            return Err(Self::classify_failure(resp).await);
        }

        let repo: GitHubRepo = resp
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;

        Ok(Some(RepoDescriptor {
            name: repo.name,
            url: repo.html_url,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> GitHubConfig {
        GitHubConfig {
            base_url: base_url.to_string(),
            ..GitHubConfig::default()
        }
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = GitHubClient::new(&test_config("https://api.github.com/")).unwrap();
        assert_eq!(client.base_url, "https://api.github.com");
    }

    #[tokio::test]
    async fn test_list_repos_maps_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_body(
                r#"[{ "name": "Hello-World", "html_url": "https://github.com/octocat/Hello-World" }]"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let repos = client.list_repos("octocat").await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "Hello-World");
        assert_eq!(repos[0].url, "https://github.com/octocat/Hello-World");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_429_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let err = client.list_repos("octocat").await.unwrap_err();

        assert!(matches!(
            err,
            RemoteError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
    }

    #[tokio::test]
    async fn test_403_with_exhausted_quota_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let err = client.list_repos("octocat").await.unwrap_err();

        assert!(matches!(err, RemoteError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_plain_403_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let err = client.list_repos("octocat").await.unwrap_err();

        assert!(matches!(err, RemoteError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_get_repo_404_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/No-Such-Repo")
            .with_status(404)
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let found = client.get_repo("octocat", "No-Such-Repo").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_repo_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/Hello-World")
            .with_status(200)
            .with_body(
                r#"{ "name": "Hello-World", "html_url": "https://github.com/octocat/Hello-World" }"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let found = client.get_repo("octocat", "Hello-World").await.unwrap().unwrap();

        assert_eq!(found.name, "Hello-World");
    }

    #[tokio::test]
    async fn test_token_is_sent_as_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let mut config = test_config(&server.url());
        config.token = Some("ghp_test".to_string());

        let client = GitHubClient::new(&config).unwrap();
        client.list_repos("octocat").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/octocat/repos?per_page=100")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = GitHubClient::new(&test_config(&server.url())).unwrap();
        let err = client.list_repos("octocat").await.unwrap_err();

        assert!(matches!(err, RemoteError::Malformed(_)));
    }
}
