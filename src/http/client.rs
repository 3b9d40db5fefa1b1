//! Low-level HTTP client, `ApiHttp`.
//!
//! Builds URLs, injects the bearer token, applies the request timeout,
//! refreshes credentials once on `401`, and normalizes every failure into an
//! [`ApiError`]. Domain sub-clients call the verb helpers here.

use crate::auth::{RefreshResponse, SessionStore, TokenStore};
use crate::error::ApiError;
use crate::http::refresh::RefreshGate;
use crate::http::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::network::API_PREFIX;

use futures_util::future::{select, Either};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Endpoint that issues fresh access tokens.
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

const AUTH_PREFIX: &str = "/auth/";

/// Retries allowed after a successful refresh.
const MAX_AUTH_RETRIES: u32 = 1;

/// Per-request options.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Attach the bearer token and, outside `/auth/`, refresh on `401`.
    /// Defaults to `true`.
    pub requires_auth: bool,
    /// Overrides the client's default timeout.
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Options for unauthenticated endpoints (login, register, ...).
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Low-level HTTP client for the trading journal REST API.
#[derive(Clone)]
pub struct ApiHttp {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    session: Arc<SessionStore>,
    refresh: Arc<RefreshGate>,
}

impl std::fmt::Debug for ApiHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHttp")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiHttp {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            transport,
            tokens,
            session,
            refresh: Arc::new(RefreshGate::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an endpoint under the versioned prefix.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    // ── Verb helpers ─────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Get, endpoint, None, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.request(Method::Post, endpoint, Some(body), options)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.request(Method::Put, endpoint, Some(body), options).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.request(Method::Patch, endpoint, Some(body), options)
            .await
    }

    /// `DELETE`, discarding any response body.
    pub async fn delete(&self, endpoint: &str, options: &RequestOptions) -> Result<(), ApiError> {
        self.request::<IgnoredAny>(Method::Delete, endpoint, None, options)
            .await
            .map(|_| ())
    }

    /// `POST`, discarding any response body.
    pub async fn post_empty<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<(), ApiError> {
        self.post::<IgnoredAny, B>(endpoint, body, options)
            .await
            .map(|_| ())
    }

    /// Send raw bytes (file import). Auth header and timeout apply; no
    /// refresh-and-retry, since the payload is not replayed.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), content_type.to_string())];
        if options.requires_auth {
            headers.extend(self.bearer_header());
        }
        let request = HttpRequest {
            method: Method::Post,
            url: self.url(endpoint),
            headers,
            body: Some(bytes),
        };
        tracing::debug!(endpoint, "API upload");
        let response = self
            .send_with_timeout(request, options.timeout.unwrap_or(self.timeout))
            .await?;
        decode_response(response)
    }

    // ── Core request loop ────────────────────────────────────────────────

    /// Perform a request. An empty or `204` success body decodes as JSON
    /// `null`, so `T` may be `Option<_>`, `()` or [`IgnoredAny`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let timeout = options.timeout.unwrap_or(self.timeout);
        let can_refresh = options.requires_auth && !is_auth_endpoint(endpoint);

        let mut attempt = 0;
        loop {
            let epoch = self.refresh.epoch();
            let request = self.build_request(method, &url, body.clone(), options.requires_auth);

            tracing::debug!(%method, endpoint, attempt, "API request");
            let response = self.send_with_timeout(request, timeout).await?;

            if response.status == 401 && can_refresh && attempt < MAX_AUTH_RETRIES {
                tracing::debug!(endpoint, "Unauthorized; refreshing access token");
                self.refresh
                    .run(epoch, || self.refresh_tokens(timeout))
                    .await?;
                attempt += 1;
                continue;
            }

            return decode_response(response);
        }
    }

    /// Refresh the access token now, sharing any refresh already in flight.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let epoch = self.refresh.epoch();
        self.refresh
            .run(epoch, || self.refresh_tokens(self.timeout))
            .await
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        with_auth: bool,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if with_auth {
            headers.extend(self.bearer_header());
        }
        HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        }
    }

    fn bearer_header(&self) -> Option<(String, String)> {
        self.tokens
            .access_token()
            .map(|token| ("Authorization".to_string(), format!("Bearer {}", token)))
    }

    async fn send_with_timeout(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ApiError> {
        let send = self.transport.send(request);
        let deadline = futures_timer::Delay::new(timeout);

        match select(send, deadline).await {
            Either::Left((result, _)) => result.map_err(|e| match e {
                TransportError::Timeout => ApiError::timeout(),
                TransportError::Network(cause) => {
                    tracing::debug!(%cause, "Transport failure");
                    ApiError::network(cause)
                }
            }),
            Either::Right(((), _)) => {
                tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Request timed out");
                Err(ApiError::timeout())
            }
        }
    }

    /// Call the refresh endpoint and store the new tokens. On any failure the
    /// stored credentials are cleared and the session is expired.
    async fn refresh_tokens(&self, timeout: Duration) -> Result<(), ApiError> {
        let body = match self.tokens.refresh_token() {
            Some(refresh_token) => serde_json::json!({ "refresh_token": refresh_token }),
            None => serde_json::json!({}),
        };
        let request = self.build_request(
            Method::Post,
            &self.url(REFRESH_ENDPOINT),
            Some(encode_body(&body)?),
            false,
        );

        let outcome = match self.send_with_timeout(request, timeout).await {
            Ok(response) => decode_response::<RefreshResponse>(response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(refreshed) => {
                let refresh_token = refreshed
                    .refresh_token
                    .or_else(|| self.tokens.refresh_token());
                self.tokens.set_tokens(refreshed.access_token, refresh_token);
                if let Some(user) = refreshed.user {
                    self.session.set_user(Some(user));
                }
                tracing::info!("Access token refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(status = e.status, kind = %e.kind, "Token refresh failed; ending session");
                self.tokens.clear();
                self.session.expire();
                Err(ApiError::session_expired())
            }
        }
    }
}

/// Endpoints under `/auth/` answer `401` for bad credentials themselves and
/// never enter the refresh flow.
fn is_auth_endpoint(endpoint: &str) -> bool {
    endpoint.starts_with(AUTH_PREFIX)
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(ApiError::encode)
}

fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let status = response.status;
    if !response.is_success() {
        return Err(ApiError::from_response(status, &response.body));
    }

    if status == 204 || response.body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ApiError::decode(status, e));
    }

    serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(status, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_auth_endpoint_detection() {
        assert!(is_auth_endpoint("/auth/refresh"));
        assert!(is_auth_endpoint("/auth/me"));
        assert!(is_auth_endpoint("/auth/logout"));
        assert!(!is_auth_endpoint("/trades"));
        assert!(!is_auth_endpoint("/trades/abc/tags/auth"));
    }

    #[test]
    fn test_decode_no_content() {
        let unit: Option<serde_json::Value> =
            decode_response(HttpResponse::new(204, Vec::new())).unwrap();
        assert!(unit.is_none());

        let ignored: Result<IgnoredAny, _> = decode_response(HttpResponse::new(200, "  "));
        assert!(ignored.is_ok());
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode_response::<serde_json::Value>(HttpResponse::new(
            429,
            r#"{"message":"Slow down"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.message, "Slow down");
    }

    #[test]
    fn test_decode_bad_json_on_success() {
        let err = decode_response::<Vec<u32>>(HttpResponse::new(200, "{not json")).unwrap_err();
        assert_eq!(err.status, 200);
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_request_options() {
        let opts = RequestOptions::default();
        assert!(opts.requires_auth);
        assert!(opts.timeout.is_none());

        let opts = RequestOptions::public().with_timeout(Duration::from_secs(5));
        assert!(!opts.requires_auth);
        assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
    }
}
