// GitHub API HTTP client.
// Handles headers, status mapping, and cancellation-aware request processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, RosterError};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client scoped to read-only queries.
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client. A token is optional; without one the
    /// client issues unauthenticated requests.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| RosterError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("roster"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(RosterError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
        })
    }

    /// Create a client from the GITHUB_TOKEN environment variable,
    /// falling back to an unauthenticated client when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) => Self::new(Some(&token)),
            Err(_) => Self::new(None),
        }
    }

    /// Override the API host. Used by tests to point at a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make a GET request and decode the JSON response body.
    ///
    /// The request is abandoned as soon as `cancel` fires; the caller gets
    /// `RosterError::Cancelled` rather than a partial result.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        if cancel.is_cancelled() {
            return Err(RosterError::Cancelled);
        }

        let url = format!("{}{}", self.base_url, path);
        tokio::select! {
            result = self.request_json(&url) => result,
            _ = cancel.cancelled() => Err(RosterError::Cancelled),
        }
    }

    /// Issue the request, check the status, and decode the body.
    async fn request_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(RosterError::Api)?;
        let response = self.check_response(response).await?;
        let decoded = response.json().await.map_err(RosterError::Api)?;
        Ok(decoded)
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED => Err(RosterError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(RosterError::NotFound(url))
            }
            status => Err(RosterError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
