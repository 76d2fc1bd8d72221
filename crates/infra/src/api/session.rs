//! Session controller for folder-scoped data access
//!
//! Owns the credential state, lazily derives the authorized header set from
//! the access token, and drives the refresh-and-retry protocol around every
//! data request.

use std::sync::Arc;

use folio_core::retry::{advance, Attempt, AttemptOutcome, Next};
use folio_core::{SessionState, TokenExchanger};
use folio_domain::{ApiConfig, FolioError, Result, TokenPair};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::auth::AuthClient;
use crate::http::HttpClient;

/// Header set derived from the current access token.
///
/// Present only while a token pair is installed; rebuilt after every
/// successful refresh so the retried request always carries the new token.
#[derive(Debug, Clone)]
struct AuthorizedHeaders {
    headers: HeaderMap,
}

impl AuthorizedHeaders {
    fn for_access_token(access_token: &str) -> Result<Self> {
        let bearer = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|err| {
            FolioError::Config(format!("access token is not a valid header value: {err}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(Self { headers })
    }
}

/// One logical session against the accounting API.
///
/// Credential state and the derived headers live behind locks, and the
/// refresh flow swaps both under a single write section, so concurrent
/// readers never observe a half-updated session. A session is still one
/// logical sequence of operations: nothing here dispatches in parallel.
pub struct Session {
    config: ApiConfig,
    http: HttpClient,
    exchanger: Arc<dyn TokenExchanger>,
    state: RwLock<SessionState>,
    authorized: RwLock<Option<AuthorizedHeaders>>,
}

impl Session {
    /// Create a builder for fluent configuration
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Create an unauthenticated session wired to the real token endpoint.
    ///
    /// `authenticate` must run before data operations.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a session pre-seeded with a previously persisted token pair.
    pub fn with_tokens(
        config: ApiConfig,
        email: impl Into<String>,
        tokens: TokenPair,
    ) -> Result<Self> {
        Self::builder().config(config).tokens(email, tokens).build()
    }

    /// Exchange a one-time exchange token for a token pair and sign the
    /// session in.
    ///
    /// Returns the pair so the caller can persist it; the library keeps no
    /// storage of its own.
    pub async fn authenticate(&self, email: &str, exchange_token: &str) -> Result<TokenPair> {
        info!(email, "authenticating with exchange token");
        let tokens = self.exchanger.exchange_token(email, exchange_token).await?;

        let mut state = self.state.write().await;
        let mut authorized = self.authorized.write().await;
        state.sign_in(email, tokens.clone());
        // Rebuilt lazily from the new pair on the next ensure_ready
        *authorized = None;

        Ok(tokens)
    }

    /// True iff a token pair is installed
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Select the folder scoping every data request. Fluent.
    pub async fn set_folder(&self, folder: &str) -> &Self {
        self.state.write().await.set_folder(folder);
        self
    }

    /// Override the access token without touching the refresh token.
    ///
    /// Escape hatch for test and recovery scenarios. A later refresh
    /// supersedes the override because it replaces the whole pair.
    pub async fn set_access_token(&self, token: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let mut authorized = self.authorized.write().await;
        state.set_access_token(token)?;
        *authorized = None;
        Ok(())
    }

    /// Drop credentials and the derived headers. The folder survives.
    pub async fn sign_out(&self) {
        let mut state = self.state.write().await;
        let mut authorized = self.authorized.write().await;
        state.clear();
        *authorized = None;
        info!("session signed out");
    }

    /// Get the authenticating email
    pub async fn email(&self) -> Option<String> {
        self.state.read().await.email().map(str::to_string)
    }

    /// Get the selected folder
    pub async fn folder(&self) -> Option<String> {
        self.state.read().await.folder().map(str::to_string)
    }

    /// Get the current token pair
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.state.read().await.tokens().cloned()
    }

    /// Validate that the session can issue data requests and make sure the
    /// authorized header set exists.
    ///
    /// Both checks run on every call; building the headers is idempotent
    /// and skipped when they are already present.
    pub async fn ensure_ready(&self) -> Result<()> {
        let state = self.state.read().await;
        let tokens = state.ensure_tokens()?;
        state.ensure_folder()?;

        let mut authorized = self.authorized.write().await;
        if authorized.is_none() {
            *authorized = Some(AuthorizedHeaders::for_access_token(&tokens.access_token)?);
            debug!("authorized transport configuration built");
        }
        Ok(())
    }

    /// Fetch every object of a model namespace in the selected folder.
    ///
    /// Returns `None` for any surviving non-200 status (see `fetch_json`).
    pub async fn all(&self, namespace: &str) -> Result<Option<serde_json::Value>> {
        self.ensure_ready().await?;
        let folder = self.folder().await.ok_or(FolioError::UndefinedFolder)?;
        let url = self.config.collection_url(namespace, &folder);
        self.fetch_json(&url).await
    }

    /// Fetch a single object by model and code in the selected folder.
    pub async fn get(&self, model: &str, code: &str) -> Result<Option<serde_json::Value>> {
        self.ensure_ready().await?;
        let folder = self.folder().await.ok_or(FolioError::UndefinedFolder)?;
        let url = self.config.object_url(model, code, &folder);
        self.fetch_json(&url).await
    }

    /// Drive one GET through the refresh-and-retry protocol and apply the
    /// body policy: 200 parses, any other surviving status is an absent
    /// result. Compatibility with the upstream API contract; 5xx never gets
    /// this far (classified as a transport failure in `issue`).
    async fn fetch_json(&self, url: &str) -> Result<Option<serde_json::Value>> {
        let response = self.execute_with_refresh(url).await?;
        let status = response.status();

        if status == StatusCode::OK {
            let value = response
                .json()
                .await
                .map_err(|err| FolioError::Parse(format!("invalid response body: {err}")))?;
            Ok(Some(value))
        } else {
            debug!(%status, url, "non-200 response treated as absent result");
            Ok(None)
        }
    }

    /// The retry driver: classify each transport call and walk the decision
    /// table. At most one refresh, at most one retry.
    async fn execute_with_refresh(&self, url: &str) -> Result<Response> {
        let mut attempt = Attempt::Initial;
        loop {
            let outcome = self.issue(url).await;
            match advance(attempt, outcome) {
                Next::Return(result) => return result,
                Next::RefreshAndRetry => {
                    warn!(url, "access token rejected, refreshing credentials");
                    self.refresh_credentials().await?;
                    attempt = Attempt::Refreshed;
                }
            }
        }
    }

    /// Execute one GET and classify the result immediately.
    async fn issue(&self, url: &str) -> AttemptOutcome<Response> {
        let headers = {
            let authorized = self.authorized.read().await;
            match authorized.as_ref() {
                Some(authorized) => authorized.headers.clone(),
                None => return AttemptOutcome::Failed(FolioError::Unauthenticated),
            }
        };

        let request = self.http.request(Method::GET, url).headers(headers);
        match self.http.send(request).await {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::UNAUTHORIZED {
                    AttemptOutcome::Unauthorized
                } else if status.is_server_error() {
                    AttemptOutcome::Failed(FolioError::Network(format!(
                        "{url} returned status {status}"
                    )))
                } else {
                    AttemptOutcome::Success(response)
                }
            }
            Err(err) => AttemptOutcome::Failed(err),
        }
    }

    /// Swap the token pair for a fresh one and rebuild the authorized
    /// headers. Install and rebuild happen under the write locks, so the
    /// swap is atomic from the caller's perspective and any earlier
    /// `set_access_token` override is superseded.
    async fn refresh_credentials(&self) -> Result<()> {
        let (email, refresh_token) = {
            let state = self.state.read().await;
            let email = state.ensure_email()?.to_string();
            let refresh_token = state.ensure_tokens()?.refresh_token.clone();
            (email, refresh_token)
        };

        let tokens = self.exchanger.refresh_token(&email, &refresh_token).await?;

        let mut state = self.state.write().await;
        let mut authorized = self.authorized.write().await;
        *authorized = Some(AuthorizedHeaders::for_access_token(&tokens.access_token)?);
        state.install_tokens(tokens);
        info!("token pair refreshed");
        Ok(())
    }
}

/// Builder for [`Session`]
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<ApiConfig>,
    exchanger: Option<Arc<dyn TokenExchanger>>,
    seed: Option<(String, TokenPair)>,
}

impl SessionBuilder {
    /// Set the API configuration (required)
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Inject a token endpoint implementation (defaults to [`AuthClient`])
    pub fn exchanger(mut self, exchanger: Arc<dyn TokenExchanger>) -> Self {
        self.exchanger = Some(exchanger);
        self
    }

    /// Seed the session with a previously persisted token pair
    pub fn tokens(mut self, email: impl Into<String>, tokens: TokenPair) -> Self {
        self.seed = Some((email.into(), tokens));
        self
    }

    /// Build the session
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing or the HTTP client
    /// cannot be constructed
    pub fn build(self) -> Result<Session> {
        let config =
            self.config.ok_or_else(|| FolioError::Config("API configuration not set".into()))?;

        let http = HttpClient::builder().timeout(config.timeout).build()?;

        let exchanger: Arc<dyn TokenExchanger> = match self.exchanger {
            Some(exchanger) => exchanger,
            None => Arc::new(AuthClient::new(config.clone(), http.clone())),
        };

        let state = match self.seed {
            Some((email, tokens)) => SessionState::with_tokens(email, tokens),
            None => SessionState::new(),
        };

        Ok(Session {
            config,
            http,
            exchanger,
            state: RwLock::new(state),
            authorized: RwLock::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn builder_requires_a_config() {
        let result = Session::builder().build();
        assert!(matches!(result, Err(FolioError::Config(_))));
    }

    #[test]
    fn authorized_headers_carry_bearer_and_accept() {
        let authorized = AuthorizedHeaders::for_access_token("A1").unwrap();

        assert_eq!(authorized.headers.get(AUTHORIZATION).unwrap(), "Bearer A1");
        assert_eq!(authorized.headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn seeded_session_sends_its_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/app/Sale/Folder/ACME"))
            .and(header("Authorization", "Bearer A1"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::with_tokens(
            ApiConfig::new(server.uri()),
            "user@example.com",
            TokenPair::new("A1", "R1"),
        )
        .unwrap();
        session.set_folder("ACME").await;

        let result = session.all("Sale").await.unwrap();
        assert_eq!(result, Some(serde_json::json!([])));
    }

    #[tokio::test]
    async fn not_found_yields_an_absent_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/app/Invoice/MISSING/Folder/ACME"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::with_tokens(
            ApiConfig::new(server.uri()),
            "user@example.com",
            TokenPair::new("A1", "R1"),
        )
        .unwrap();
        session.set_folder("ACME").await;

        let result = session.get("Invoice", "MISSING").await.unwrap();
        assert!(result.is_none());
    }
}
