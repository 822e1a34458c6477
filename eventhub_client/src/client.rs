use std::sync::Mutex;

use eventhub_core::{QueryParams, RefreshedAccess, TokenPair, UserProfile};
use reqwest::{
    Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tokio::sync::Mutex as AsyncMutex;
use url::Url;

use crate::{
    ClientError, ClientResult,
    auth::{AuthEvent, AuthState},
    config::ClientConfig,
    endpoints,
    session_store::{KeyringSessionStore, SessionKey, SessionStore},
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
};

#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    /// Attach the stored access token.
    pub auth: bool,
    /// Allow one refresh-and-retry after a 401.
    pub retry: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: QueryParams::new(),
            body: None,
            headers: HeaderMap::new(),
            auth: true,
            retry: true,
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.auth = false;
        self
    }

    pub fn without_retry(mut self) -> Self {
        self.retry = false;
        self
    }
}

struct Attempt {
    response: HttpResponse,
    bearer: Option<String>,
}

/// Session-aware JSON client for the EventHub API.
///
/// Every request goes through [`ApiClient::request`], which attaches the
/// stored bearer token, enforces the configured timeout and recovers from an
/// expired access token with a single refresh-and-retry.
pub struct ApiClient<T = ReqwestTransport, S = KeyringSessionStore> {
    config: ClientConfig,
    base_url: String,
    transport: T,
    store: S,
    state: Mutex<AuthState>,
    refresh_gate: AsyncMutex<()>,
}

impl ApiClient {
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        let store = KeyringSessionStore::for_config(&config)?;
        Self::with_parts(config, transport, store)
    }
}

impl<S: SessionStore> ApiClient<ReqwestTransport, S> {
    pub fn with_store(config: ClientConfig, store: S) -> ClientResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_parts(config, transport, store)
    }
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn with_parts(config: ClientConfig, transport: T, store: S) -> ClientResult<Self> {
        config.validate()?;
        let state = AuthState::initial(store.is_authenticated());
        Ok(Self {
            base_url: config.normalized_base_url(),
            config,
            transport,
            store,
            state: Mutex::new(state),
            refresh_gate: AsyncMutex::new(()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn auth_state(&self) -> AuthState {
        self.current_state()
    }

    pub async fn get(&self, endpoint: &str, query: &QueryParams) -> ClientResult<Value> {
        let options = RequestOptions::new(Method::GET).with_query(query.clone());
        self.request(endpoint, options).await
    }

    pub async fn post<B>(&self, endpoint: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, endpoint, body).await
    }

    pub async fn put<B>(&self, endpoint: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, endpoint, body).await
    }

    pub async fn patch<B>(&self, endpoint: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<Value> {
        self.request(endpoint, RequestOptions::new(Method::DELETE))
            .await
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Value> {
        let first = self.attempt(endpoint, &options).await?;

        if first.response.status == 401 && options.retry {
            if let Some(rejected) = first.bearer.as_deref() {
                log::debug!("{} {endpoint} returned 401, refreshing session", options.method);
                if self.recover_rejected_access(rejected).await {
                    let options = RequestOptions {
                        retry: false,
                        ..options
                    };
                    let second = self.attempt(endpoint, &options).await?;
                    return into_payload(second.response);
                }
            }
        }

        into_payload(first.response)
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// A failed refresh signs the session out, the same way an expired
    /// session does during a regular request.
    pub async fn refresh_session(&self) -> ClientResult<()> {
        let _gate = self.refresh_gate.lock().await;
        if !self.store.is_authenticated() {
            return Err(ClientError::MissingAccessToken);
        }

        self.apply(AuthEvent::RefreshRequested);
        match self.exchange_refresh_token().await {
            Ok(()) => {
                self.apply(AuthEvent::RefreshSucceeded);
                Ok(())
            }
            Err(err) => {
                self.expire_session(&err);
                Err(err)
            }
        }
    }

    pub(crate) fn establish_session(
        &self,
        tokens: &TokenPair,
        profile: Option<&UserProfile>,
    ) -> ClientResult<()> {
        self.store.set(SessionKey::AccessToken, &tokens.access)?;
        self.store.set(SessionKey::RefreshToken, &tokens.refresh)?;
        match profile {
            Some(profile) => self.cache_profile(profile)?,
            None => self.store.remove(SessionKey::UserProfile)?,
        }
        self.apply(AuthEvent::SignedIn);
        Ok(())
    }

    pub(crate) fn cache_profile(&self, profile: &UserProfile) -> ClientResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(SessionKey::UserProfile, &raw)
    }

    pub(crate) fn sign_out(&self) -> ClientResult<()> {
        self.apply(AuthEvent::SignedOut);
        self.store.clear_all()
    }

    async fn send_json<B>(&self, method: Method, endpoint: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(endpoint, RequestOptions::new(method).with_body(body))
            .await
    }

    async fn attempt(&self, endpoint: &str, options: &RequestOptions) -> ClientResult<Attempt> {
        let bearer = if options.auth {
            self.store.get(SessionKey::AccessToken)
        } else {
            None
        };

        let request = self.build_request(endpoint, options, bearer.as_deref())?;
        log::debug!("{} {}", request.method, request.url);
        let response = self.dispatch(request).await?;
        log::trace!(
            "{} {endpoint} -> {}: {}",
            options.method,
            response.status,
            String::from_utf8_lossy(&response.body)
        );

        Ok(Attempt { response, bearer })
    }

    async fn dispatch(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let limit = self.config.timeout;
        match tokio::time::timeout(limit, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("request abandoned after {limit:?}");
                Err(ClientError::Timeout(limit))
            }
        }
    }

    fn build_request(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        bearer: Option<&str>,
    ) -> ClientResult<HttpRequest> {
        let mut url = Url::parse(&self.endpoint_url(endpoint))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(options.query.iter());
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::InvalidHeader {
                    name: header::AUTHORIZATION.to_string(),
                }
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        let body = options.body.as_ref().map(serde_json::to_vec).transpose()?;

        Ok(HttpRequest {
            method: options.method.clone(),
            url,
            headers,
            body,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    /// Returns true when the caller should retry with the stored token.
    async fn recover_rejected_access(&self, rejected: &str) -> bool {
        let _gate = self.refresh_gate.lock().await;

        match self.store.get(SessionKey::AccessToken) {
            None => {
                log::debug!("session was cleared while waiting for refresh");
                return false;
            }
            Some(current) if current != rejected => {
                log::debug!("access token already rotated by a concurrent request");
                return true;
            }
            Some(_) => {}
        }

        self.apply(AuthEvent::AccessRejected);
        match self.exchange_refresh_token().await {
            Ok(()) => {
                self.apply(AuthEvent::RefreshSucceeded);
                true
            }
            Err(err) => {
                self.expire_session(&err);
                false
            }
        }
    }

    async fn exchange_refresh_token(&self) -> ClientResult<()> {
        let refresh = self
            .store
            .get(SessionKey::RefreshToken)
            .ok_or(ClientError::MissingRefreshToken)?;

        let options = RequestOptions::new(Method::POST)
            .with_body(json!({ "refresh": refresh }))
            .without_auth()
            .without_retry();
        let attempt = self.attempt(endpoints::TOKEN_REFRESH, &options).await?;
        let payload = into_payload(attempt.response)?;
        let refreshed: RefreshedAccess = serde_json::from_value(payload)?;

        self.store.set(SessionKey::AccessToken, &refreshed.access)?;
        if let Some(rotated) = refreshed.refresh.as_deref() {
            self.store.set(SessionKey::RefreshToken, rotated)?;
        }
        log::info!("access token refreshed");
        Ok(())
    }

    fn expire_session(&self, cause: &ClientError) {
        log::warn!(
            "token refresh failed, signing out: {:?}",
            cause.display_chain()
        );
        self.apply(AuthEvent::RefreshFailed);
        if let Err(err) = self.store.clear_all() {
            log::error!("failed to clear session: {:?}", err.display_chain());
        }
    }

    fn current_state(&self) -> AuthState {
        let tracked = *self.lock_state();
        match (tracked, self.store.is_authenticated()) {
            (_, false) => AuthState::Anonymous,
            (AuthState::Anonymous, true) => AuthState::Authenticated,
            (state, true) => state,
        }
    }

    fn apply(&self, event: AuthEvent) {
        let current = self.current_state();
        let mut tracked = self.lock_state();
        match current.on(event) {
            Some(next) => {
                if next != current {
                    log::debug!("auth state {current:?} -> {next:?} on {event:?}");
                }
                *tracked = next;
            }
            None => log::trace!("ignoring {event:?} while {current:?}"),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AuthState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn into_payload(response: HttpResponse) -> ClientResult<Value> {
    let body = parse_body(&response.body);
    if response.is_success() {
        return Ok(body);
    }

    let message = error_message(&body, response.status);
    if response.status == 401 {
        Err(ClientError::Unauthorized { message })
    } else {
        Err(ClientError::Api {
            status: response.status,
            message,
        })
    }
}

fn parse_body(raw: &[u8]) -> Value {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }

    match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("response body is not json ({err}), using an empty object");
            Value::Object(Map::new())
        }
    }
}

fn error_message(body: &Value, status: u16) -> String {
    let detail = body.get("detail").and_then(Value::as_str);
    let error = body.get("error").and_then(|error| {
        error
            .as_str()
            .or_else(|| error.get("message").and_then(Value::as_str))
    });

    detail
        .or(error)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("Error {status}"))
}
