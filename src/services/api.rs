use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiSettings;
use crate::services::{Evaluations, Hackathons, Submissions};

/// Errors surfaced by the EvalAI API client
///
/// Failures are passed through as the transport reports them: no retries and
/// no translation of backend error bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    StatusError { status: StatusCode, body: String },
}

impl ApiError {
    /// HTTP status of the failed exchange, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestError(e) => e.status(),
            ApiError::StatusError { status, .. } => Some(*status),
        }
    }
}

/// EvalAI REST API client
///
/// Owns the base URL and a pooled HTTP client. Cloning is cheap and clones
/// share the pool. Resource operations live on the group handles returned by
/// [`hackathons`](Self::hackathons), [`submissions`](Self::submissions) and
/// [`evaluations`](Self::evaluations).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the given API root with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Some(Duration::from_secs(30)))
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        let timeout = match settings.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::with_timeout(settings.base_url.clone(), timeout)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path such as `/hackathon/42`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn hackathons(&self) -> Hackathons<'_> {
        Hackathons::new(self)
    }

    pub fn submissions(&self) -> Submissions<'_> {
        Submissions::new(self)
    }

    pub fn evaluations(&self) -> Evaluations<'_> {
        Evaluations::new(self)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST without a request body
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path).multipart(form)).await?;
        Ok(response.json().await?)
    }

    /// DELETE, discarding whatever body the server sends back
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Sending API request");
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let url = response.url().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::debug!(%status, %url, "API request failed");
            return Err(ApiError::StatusError { status, body });
        }

        Ok(response)
    }
}
