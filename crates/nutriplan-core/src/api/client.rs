//! API client for communicating with the NutriPlan REST backend.
//!
//! Every request goes through the same pipeline: the current access token
//! is read from the session store and attached as a bearer credential, the
//! enveloped response is unwrapped, and an expired-token 401 is recovered
//! exactly once by refreshing the token pair and re-issuing the request.
//!
//! The refresh path bypasses the pipeline itself (no bearer header, no
//! interception), so a 401 from the refresh endpoint is terminal and forces
//! a logout. Concurrent 401s coalesce on a single in-flight refresh.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionStore;

use super::auth::TokenPair;
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// Long enough for a cold backend, short enough to fail visibly.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Path of the token refresh endpoint, called outside the pipeline.
const REFRESH_PATH: &str = "/api/auth/refresh";

/// Response envelope used by every backend route.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// An immutable description of one request attempt. The retry marker lives
/// here, never on a shared request object: the retried attempt is a new
/// record, and nothing downstream of it consults the 401 path again.
#[derive(Debug, Clone)]
struct Attempt {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl Attempt {
    fn new(method: Method, path: &str, body: Option<serde_json::Value>) -> Self {
        Self {
            method,
            path: path.to_string(),
            body,
            retried: false,
        }
    }

    fn into_retried(self) -> Self {
        Self {
            retried: true,
            ..self
        }
    }
}

/// API client for the NutriPlan backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
    refresh_lock: Arc<tokio::sync::Mutex<()>>,
}

impl ApiClient {
    /// Create a new API client against the given base URL, reading and
    /// mutating the given session store.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            refresh_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Request helpers =====

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        self.execute(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// POST for endpoints whose envelope carries no data payload.
    pub(crate) async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        self.execute_empty(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn delete_empty(&self, path: &str) -> Result<()> {
        self.execute_empty(Method::DELETE, path, None).await
    }

    // ===== Pipeline =====

    /// Run one attempt through the pipeline and unwrap the envelope's data.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.run(Attempt::new(method, path, body)).await?;
        Self::parse_data(response).await
    }

    /// Run one attempt, requiring only a successful envelope.
    async fn execute_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let response = self.run(Attempt::new(method, path, body)).await?;
        // Drain the body so the connection can be reused; the envelope
        // content is irrelevant on these routes.
        let _ = response.text().await;
        Ok(())
    }

    /// Send an attempt, recovering an expired-token 401 exactly once.
    async fn run(&self, attempt: Attempt) -> Result<reqwest::Response> {
        let sent_token = self.session.snapshot().access_token;
        let response = self
            .send(&attempt, sent_token.as_deref())
            .await
            .with_context(|| format!("Failed to send {} {}", attempt.method, attempt.path))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let original = ApiError::from_status(status, &body);

        if status == StatusCode::UNAUTHORIZED && !attempt.retried {
            debug!(path = %attempt.path, "Request unauthorized, attempting token refresh");
            return self
                .refresh_and_retry(attempt.into_retried(), sent_token, original)
                .await;
        }

        Err(original.into())
    }

    /// The 401 recovery path. Refreshes the token pair (coalescing with any
    /// concurrent refresh) and re-issues the attempt once. Any failure to
    /// refresh clears the session.
    async fn refresh_and_retry(
        &self,
        attempt: Attempt,
        sent_token: Option<String>,
        original: ApiError,
    ) -> Result<reqwest::Response> {
        {
            let _guard = self.refresh_lock.lock().await;
            let current = self.session.snapshot();

            // Another request may have rotated the tokens while this one
            // waited on the lock; in that case retry with the fresh token
            // instead of refreshing again.
            let already_rotated =
                current.access_token.is_some() && current.access_token != sent_token;

            if !already_rotated {
                let Some(refresh_token) = current.refresh_token else {
                    debug!("No refresh token available, forcing logout");
                    self.session.logout();
                    return Err(original.into());
                };

                match self.refresh_session(&refresh_token).await {
                    Ok(pair) => {
                        self.session.set_tokens(pair.access_token, pair.refresh_token);
                        debug!("Token refresh succeeded");
                    }
                    Err(e) => {
                        warn!(error = %e, "Token refresh failed, forcing logout");
                        self.session.logout();
                        return Err(e);
                    }
                }
            }
        }

        let token = self.session.snapshot().access_token;
        let response = self
            .send(&attempt, token.as_deref())
            .await
            .with_context(|| format!("Failed to resend {} {}", attempt.method, attempt.path))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body).into())
    }

    /// Exchange the refresh token for a new token pair. Deliberately built
    /// on the bare HTTP client: no bearer header is attached (the endpoint
    /// must accept the call without the expired access token) and a 401
    /// here is terminal rather than another refresh trigger.
    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .context("Failed to send token refresh request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        Self::parse_data(response).await
    }

    fn attach_bearer(
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        attempt: &Attempt,
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, attempt.path);
        let mut request = self.client.request(attempt.method.clone(), &url);
        request = Self::attach_bearer(request, token);
        if let Some(body) = &attempt.body {
            request = request.json(body);
        }
        request.send().await
    }

    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let envelope: Envelope<T> = response
            .json()
            .await
            .context("Failed to parse API response")?;

        if !envelope.success {
            if let Some(message) = envelope.message {
                return Err(ApiError::InvalidResponse(message).into());
            }
        }

        envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse("response envelope carried no data".to_string()).into()
        })
    }
}
