//! TaskHub HTTP Client
//!
//! A type-safe client for the TaskHub REST backend: bearer-token auth,
//! paginated JSON collections and CRUD endpoints for departments, managers,
//! employees and tasks.
//!
//! Each endpoint group is exposed as a trait ([`AuthApi`], [`DepartmentApi`], ...)
//! implemented by [`TaskHubClient`], so the sync layer can be exercised against
//! in-process fakes.
//!
//! # Example
//!
//! ```no_run
//! use taskhub_client::{AuthApi, DepartmentApi, TaskHubClient};
//! use taskhub_core::dto::PageRequest;
//! use taskhub_core::dto::auth::LoginRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TaskHubClient::new("https://api.taskhub.example");
//!
//!     client.login(&LoginRequest {
//!         email: "admin@corp.io".to_string(),
//!         password: "secret".to_string(),
//!     }).await?;
//!
//!     let page = client.list_departments(&PageRequest::default()).await?;
//!     println!("{} of {} departments", page.len(), page.meta.total);
//!     Ok(())
//! }
//! ```

mod admin;
mod api;
mod auth;
mod departments;
mod employees;
pub mod error;
mod managers;
mod tasks;

#[cfg(test)]
mod test_server;

pub use api::{AdminApi, AuthApi, DepartmentApi, EmployeeApi, ManagerApi, TaskApi, TaskHubApi};
pub use error::{ClientError, Result};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, PercentEncode, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use taskhub_core::dto::{ApiResponse, ErrorBody, Page, PagedResponse};
use tracing::debug;
use uuid::Uuid;

/// Characters escaped in a path segment: everything but unreserved ones
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// `id` escaped for use as one path segment
pub(crate) fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, PATH_SEGMENT)
}

/// HTTP client for the TaskHub REST API
///
/// Cloning is cheap and clones share the bearer token, so a login performed
/// through one handle authenticates all of them.
#[derive(Debug, Clone)]
pub struct TaskHubClient {
    /// Base URL of the API (e.g., "https://api.taskhub.example")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request once set
    token: Arc<RwLock<Option<String>>>,
}

impl TaskHubClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use taskhub_client::TaskHubClient;
    ///
    /// let client = TaskHubClient::new("http://localhost:5000/api");
    /// assert_eq!(client.base_url(), "http://localhost:5000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use taskhub_client::TaskHubClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TaskHubClient::with_client("http://localhost:5000/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install or clear the bearer token
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    /// The bearer token currently in use
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Start a request against `path`, tagged with a fresh request id
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();
        debug!(%method, %url, %request_id, "Sending request");

        let builder = self
            .client
            .request(method, &url)
            .header("x-request-id", request_id.to_string());

        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and unwrap the `data` of an [`ApiResponse`]
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = self.success_body(response).await?;
        let envelope: ApiResponse<T> = decode(&body)?;
        Ok(envelope.data)
    }

    /// Check the status code and unwrap a [`PagedResponse`] into a [`Page`]
    async fn handle_paged<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<Page<T>> {
        let body = self.success_body(response).await?;
        let envelope: PagedResponse<T> = decode(&body)?;
        Ok(envelope.into())
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.success_body(response).await.map(|_| ())
    }

    /// Body of a 2xx response whose envelope does not report a failure
    async fn success_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        if let Ok(outcome) = serde_json::from_str::<Outcome>(&body) {
            if !outcome.success {
                return Err(ClientError::Rejected(outcome.message.unwrap_or_default()));
            }
        }

        Ok(body)
    }
}

/// The `success`/`message` pair every envelope carries
#[derive(Deserialize)]
struct Outcome {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    debug!(status = status.as_u16(), %message, "Request failed");
    ClientError::api_error(status.as_u16(), message)
}

/// Pull the human-readable message out of an error body
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Some(parsed.message),
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TaskHubClient::new("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TaskHubClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = TaskHubClient::with_client("http://localhost:5000", http_client);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_clones_share_token() {
        let client = TaskHubClient::new("http://localhost:5000");
        let other = client.clone();
        client.set_token(Some("jwt".to_string()));
        assert_eq!(other.token().as_deref(), Some("jwt"));
        other.set_token(None);
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn test_segment_escapes_path_delimiters() {
        assert_eq!(segment("65f0a1b2c3d4e5f6a7b8c9d0").to_string(), "65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(segment("a/b?c#d").to_string(), "a%2Fb%3Fc%23d");
        assert_eq!(segment("x-y_z.1~").to_string(), "x-y_z.1~");
    }
}
