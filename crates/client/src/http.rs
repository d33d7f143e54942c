//! HTTP client wrapper shared by every API module.
//!
//! One configured `reqwest` client per [`HttpClient`]: fixed timeout, JSON
//! content type and a cookie store. Each request reads the access token from
//! storage at send time. Failures are classified here once, surfaced through
//! the [`Notifier`], and then returned to the caller.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorBody};
use crate::messages::{Locale, Message};
use crate::notify::Notifier;
use crate::router::{LOGIN_PATH, Navigator};
use crate::storage::TokenStorage;

/// Maximum number of body characters written to the log.
const LOG_BODY_LIMIT: usize = 500;

/// Shared HTTP client. Cloning is cheap; clones share one connection pool,
/// cookie store and set of capabilities.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

struct HttpClientInner {
    client: reqwest::Client,
    config: ClientConfig,
    tokens: TokenStorage,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.config.base_url)
            .field("timeout", &self.inner.config.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestSetup` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        config: ClientConfig,
        tokens: TokenStorage,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::RequestSetup(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                client,
                config,
                tokens,
                notifier,
                navigator,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStorage {
        &self.inner.tokens
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    /// Notify the user with a catalog message in the configured locale.
    pub(crate) fn notify_error(&self, message: Message) {
        self.inner.notifier.error(message.text(self.locale()));
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, |req| req).await?;
        decode(&body)
    }

    /// GET with query parameters serialized from `query`; `None` fields are omitted.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.send(Method::GET, path, |req| req.query(query)).await?;
        decode(&body)
    }

    /// GET whose response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get_discard(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::GET, path, |req| req).await.map(drop)
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::POST, path, |req| req.json(body)).await?;
        decode(&body)
    }

    /// POST whose response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_discard<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, |req| req.json(body))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::PUT, path, |req| req.json(body)).await?;
        decode(&body)
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::PATCH, path, |req| req.json(body)).await?;
        decode(&body)
    }

    /// PATCH without a request body; the response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn patch_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::PATCH, path, |req| req).await.map(drop)
    }

    /// DELETE; the response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, |req| req).await.map(drop)
    }

    // =========================================================================
    // Request pipeline
    // =========================================================================

    /// Build, authorize and send one request; return the body of a
    /// successful response.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn send<F>(&self, method: Method, path: &str, build: F) -> Result<String, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.inner.config.endpoint(path);
        let mut builder = self.inner.client.request(method, url);

        if let Some(token) = self.inner.tokens.access_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let request = build(builder)
            .build()
            .map_err(|e| self.fail_setup(&e))?;

        let response = match self.inner.client.execute(request).await {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(self.fail_setup(&e)),
            Err(e) => return Err(self.fail_transport(e)),
        };

        let status = response.status();
        let body = response.text().await.map_err(|e| self.fail_transport(e))?;

        if !status.is_success() {
            return Err(self.fail_status(status, &body));
        }

        debug!(status = %status, "request succeeded");
        Ok(body)
    }

    fn fail_setup(&self, e: &reqwest::Error) -> ApiError {
        error!(error = %e, "failed to build request");
        self.notify_error(Message::RequestSetupError);
        ApiError::RequestSetup(e.to_string())
    }

    fn fail_transport(&self, e: reqwest::Error) -> ApiError {
        warn!(error = %e, timeout = e.is_timeout(), "no response from backend");
        self.notify_error(Message::NetworkError);
        ApiError::Network(e)
    }

    fn fail_status(&self, status: StatusCode, body: &str) -> ApiError {
        let parsed = ErrorBody::parse(body);
        let detail = parsed.detail_text();

        warn!(
            status = %status,
            body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
            "backend returned error status"
        );

        match status {
            StatusCode::UNAUTHORIZED => {
                self.notify_error(Message::Unauthorized);
                if let Err(e) = self.inner.tokens.clear() {
                    error!(error = %e, "failed to clear stored tokens");
                }
                self.inner.navigator.navigate(LOGIN_PATH);
            }
            StatusCode::FORBIDDEN => self.notify_error(Message::Forbidden),
            StatusCode::NOT_FOUND => self.notify_error(Message::NotFound),
            StatusCode::INTERNAL_SERVER_ERROR => self.notify_error(Message::ServerError),
            _ => {
                let text = parsed
                    .message
                    .as_deref()
                    .or(detail.as_deref())
                    .unwrap_or_else(|| Message::RequestFailed.text(self.locale()));
                self.inner.notifier.error(text);
            }
        }

        ApiError::Status {
            status: status.as_u16(),
            message: parsed.message,
            detail,
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        error!(
            error = %e,
            body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
            "failed to decode response body"
        );
        ApiError::Decode(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use shopfront_core::TokenPair;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::notify::{Level, MemoryNotifier};
    use crate::router::MemoryNavigator;
    use crate::storage::MemoryStore;

    struct Harness {
        server: MockServer,
        http: HttpClient,
        tokens: TokenStorage,
        notifier: MemoryNotifier,
        navigator: MemoryNavigator,
    }

    async fn harness() -> Harness {
        let server = MockServer::start().await;
        let config = ClientConfig::new(&format!("{}/api", server.uri()))
            .unwrap()
            .with_timeout(Duration::from_millis(500));
        let tokens = TokenStorage::new(Arc::new(MemoryStore::new()));
        let notifier = MemoryNotifier::new();
        let navigator = MemoryNavigator::new();
        let http = HttpClient::new(
            config,
            tokens.clone(),
            Arc::new(notifier.clone()),
            Arc::new(navigator.clone()),
        )
        .unwrap();

        Harness {
            server,
            http,
            tokens,
            notifier,
            navigator,
        }
    }

    fn login(tokens: &TokenStorage) {
        tokens
            .save(&TokenPair {
                access_token: "tok-123".to_string(),
                refresh_token: "ref-456".to_string(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_when_stored() {
        let h = harness().await;
        login(&h.tokens);

        Mock::given(method("GET"))
            .and(path("/api/orders/"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&h.server)
            .await;

        let orders: Vec<serde_json::Value> = h.http.get("/orders/").await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_no_auth_header_without_token() {
        let h = harness().await;

        Mock::given(method("GET"))
            .and(path("/api/products/1"))
            .respond_with(|req: &Request| {
                let status = if req.headers.contains_key("authorization") {
                    418
                } else {
                    200
                };
                ResponseTemplate::new(status).set_body_json(json!({}))
            })
            .mount(&h.server)
            .await;

        let _: serde_json::Value = h.http.get("/products/1").await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_clears_tokens_and_redirects_once() {
        let h = harness().await;
        login(&h.tokens);

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
            )
            .mount(&h.server)
            .await;

        let err = h.http.get::<serde_json::Value>("/users/me").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(h.tokens.access_token().is_none());
        assert!(h.tokens.refresh_token().is_none());
        assert_eq!(h.navigator.requested(), vec![LOGIN_PATH.to_string()]);
        assert_eq!(
            h.notifier.messages(Level::Error),
            vec![Message::Unauthorized.text(Locale::En).to_string()]
        );
    }

    #[tokio::test]
    async fn test_fixed_messages_for_known_statuses() {
        let h = harness().await;
        for (code, expected) in [
            (403, Message::Forbidden),
            (404, Message::NotFound),
            (500, Message::ServerError),
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/api/status/{code}")))
                .respond_with(ResponseTemplate::new(code).set_body_json(json!({"detail": "x"})))
                .mount(&h.server)
                .await;

            let err = h
                .http
                .get_discard(&format!("/status/{code}"))
                .await
                .unwrap_err();
            assert_eq!(err.status(), Some(code));

            let last = h.notifier.take().pop().unwrap();
            assert_eq!(last.level, Level::Error);
            assert_eq!(last.message, expected.text(Locale::En));
        }
        assert!(h.navigator.requested().is_empty());
    }

    #[tokio::test]
    async fn test_other_status_prefers_message_then_detail() {
        let h = harness().await;

        Mock::given(method("POST"))
            .and(path("/api/with-message"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Bad things", "detail": "ignored"})),
            )
            .mount(&h.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/with-detail"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"detail": "Stock exhausted"})),
            )
            .mount(&h.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/bare"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&h.server)
            .await;

        for p in ["/with-message", "/with-detail", "/bare"] {
            let _ = h.http.post_discard(p, &json!({})).await.unwrap_err();
        }

        assert_eq!(
            h.notifier.messages(Level::Error),
            vec![
                "Bad things".to_string(),
                "Stock exhausted".to_string(),
                Message::RequestFailed.text(Locale::En).to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_distinguished() {
        // Reserve a port, then release it so nothing listens there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let notifier = MemoryNotifier::new();
        let navigator = MemoryNavigator::new();
        let config = ClientConfig::new(&format!("http://127.0.0.1:{port}/api")).unwrap();
        let http = HttpClient::new(
            config,
            TokenStorage::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier.clone()),
            Arc::new(navigator.clone()),
        )
        .unwrap();

        let err = http.get_discard("/products/").await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(
            notifier.messages(Level::Error),
            vec![Message::NetworkError.text(Locale::En).to_string()]
        );
        assert!(navigator.requested().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_is_not_notified() {
        let h = harness().await;
        Mock::given(method("GET"))
            .and(path("/api/cart_items/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&h.server)
            .await;

        let err = h
            .http
            .get::<Vec<serde_json::Value>>("/cart_items/")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(h.notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_unencodable_query_is_a_setup_error() {
        let h = harness().await;
        Mock::given(method("GET"))
            .and(path("/api/products/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&h.server)
            .await;

        // Nested maps have no urlencoded form
        let query = json!({"price": {"min": 1}});
        let err = h
            .http
            .get_with_query::<serde_json::Value, _>("/products/", &query)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::RequestSetup(_)));
        assert_eq!(
            h.notifier.messages(Level::Error),
            vec![Message::RequestSetupError.text(Locale::En).to_string()]
        );
        assert!(h.navigator.requested().is_empty());
    }
}
