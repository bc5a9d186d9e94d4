//! Public client surface + builder.
//! Internals are split into `auth` (credentials), `retry` (backoff policy) and
//! `constants` (UA + defaults).

mod auth;
mod constants;
mod retry;

pub use auth::Credentials;
pub use retry::RetryConfig;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::core::error::EeError;
use crate::core::net::{self, RawResponse};
use constants::{
    DEFAULT_API_BASE_URL, DEFAULT_TILE_BASE_URL, PROFILE_HEADER, PROFILING_PARAM, USER_AGENT,
};

/// The HTTP method of an API call. The service accepts nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Callback invoked with each computation-profile ID extracted from a response
/// header while profiling is enabled. See [`EeClient::with_profiling`].
pub type ProfileHook = Arc<dyn Fn(&str) + Send + Sync>;

/// The mutable part of a session. Shared by all clones of one client, never
/// between distinct clients.
#[derive(Default)]
struct SessionState {
    credentials: Option<Credentials>,
    api_base: Option<Url>,
    tile_base: Option<Url>,
    deadline: Option<Duration>,
    profile_hook: Option<ProfileHook>,
    initialized: bool,
}

fn default_url(input: &str) -> Url {
    Url::parse(input).expect("default base URL")
}

/// A session with the API: base URLs, deadline, credentials, profiling hook, and
/// the dispatch logic that uses them.
///
/// Cloning is cheap and clones share session state; use separate instances (or the
/// per-thread sessions in [`crate::session`]) for isolated configuration.
#[derive(Clone)]
pub struct EeClient {
    http: Client,
    state: Arc<RwLock<SessionState>>,
    retry: RetryConfig,
}

impl Default for EeClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl EeClient {
    /// Create a new builder.
    pub fn builder() -> EeClientBuilder {
        EeClientBuilder::default()
    }

    fn state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialize the session, setting credentials and base URLs.
    ///
    /// Arguments left as `None` keep their old values; on the first call, unset
    /// base URLs take the service defaults.
    pub fn initialize(
        &self,
        credentials: Option<Credentials>,
        api_base: Option<Url>,
        tile_base: Option<Url>,
    ) {
        let mut st = self.state_mut();
        if let Some(c) = credentials {
            st.credentials = Some(c);
        }
        if let Some(u) = api_base {
            st.api_base = Some(u);
        } else if !st.initialized {
            st.api_base = Some(default_url(DEFAULT_API_BASE_URL));
        }
        if let Some(u) = tile_base {
            st.tile_base = Some(u);
        } else if !st.initialized {
            st.tile_base = Some(default_url(DEFAULT_TILE_BASE_URL));
        }
        st.initialized = true;
    }

    /// Reset the session, clearing credentials, custom base URLs and the deadline.
    pub fn reset(&self) {
        *self.state_mut() = SessionState::default();
    }

    /// Set the timeout for API requests, in milliseconds. `0` means no limit.
    pub fn set_deadline(&self, milliseconds: u64) {
        self.state_mut().deadline = (milliseconds > 0).then(|| Duration::from_millis(milliseconds));
    }

    /// Run `f` with profiling enabled (or disabled, when `hook` is `None`),
    /// restoring the previous hook afterwards.
    ///
    /// While a hook is set, every request carries a profiling parameter and the
    /// hook is called with each profile ID the server returns, before the response
    /// body is interpreted, so profiles are reported even for error responses.
    pub fn with_profiling<R>(&self, hook: Option<ProfileHook>, f: impl FnOnce() -> R) -> R {
        struct Restore<'a> {
            client: &'a EeClient,
            prev: Option<Option<ProfileHook>>,
        }
        impl Drop for Restore<'_> {
            fn drop(&mut self) {
                if let Some(prev) = self.prev.take() {
                    self.client.state_mut().profile_hook = prev;
                }
            }
        }

        let prev = std::mem::replace(&mut self.state_mut().profile_hook, hook);
        let _restore = Restore {
            client: self,
            prev: Some(prev),
        };
        f()
    }

    /// The base URL for API calls.
    pub fn api_base(&self) -> Url {
        self.ensure_initialized();
        self.state()
            .api_base
            .clone()
            .unwrap_or_else(|| default_url(DEFAULT_API_BASE_URL))
    }

    /// The base URL for media and tile calls.
    pub fn tile_base(&self) -> Url {
        self.ensure_initialized();
        self.state()
            .tile_base
            .clone()
            .unwrap_or_else(|| default_url(DEFAULT_TILE_BASE_URL))
    }

    /// The request deadline, if one is set.
    pub fn deadline(&self) -> Option<Duration> {
        self.state().deadline
    }

    pub(crate) fn credentials(&self) -> Option<Credentials> {
        self.state().credentials.clone()
    }

    /// Send an API call and decode the JSON `data` payload.
    ///
    /// `path` is appended to the session's API base URL and must start with `/`.
    /// For `Get` the parameters become the query string; for `Post` they are sent
    /// as an urlencoded form body.
    ///
    /// # Errors
    ///
    /// Returns `EeError` for transport failures, server-reported errors, responses
    /// that are not the expected JSON envelope, and unsuccessful HTTP statuses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, params), err, fields(path = %path))
    )]
    pub fn send(
        &self,
        path: &str,
        params: &[(&str, &str)],
        method: HttpMethod,
    ) -> Result<Value, EeError> {
        let resp = self.dispatch(path, params, method)?;
        net::decode_json(&resp)
    }

    /// Send an API call and return the response body without decoding it.
    ///
    /// # Errors
    ///
    /// Returns `EeError` for transport failures and unsuccessful HTTP statuses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, params), err, fields(path = %path))
    )]
    pub fn send_raw(
        &self,
        path: &str,
        params: &[(&str, &str)],
        method: HttpMethod,
    ) -> Result<Vec<u8>, EeError> {
        let resp = self.dispatch(path, params, method)?;
        net::decode_raw(resp)
    }

    /// API calls must never run against an uninitialized session.
    fn ensure_initialized(&self) {
        if !self.state().initialized {
            self.initialize(None, None, None);
        }
    }

    fn dispatch(
        &self,
        path: &str,
        params: &[(&str, &str)],
        method: HttpMethod,
    ) -> Result<RawResponse, EeError> {
        self.ensure_initialized();

        let (url, deadline, credentials, hook) = {
            let st = self.state();
            let base = st
                .api_base
                .clone()
                .unwrap_or_else(|| default_url(DEFAULT_API_BASE_URL));
            let mut target = base.as_str().trim_end_matches('/').to_string();
            target.push_str(path);
            (
                Url::parse(&target)?,
                st.deadline,
                st.credentials.clone(),
                st.profile_hook.clone(),
            )
        };

        let mut params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        if hook.is_some() {
            params.push((PROFILING_PARAM.to_string(), "1".to_string()));
        }

        let resp = self.execute_with_retry(|| {
            let mut req = match method {
                HttpMethod::Get => self.http.get(url.clone()).query(&params),
                HttpMethod::Post => self.http.post(url.clone()).form(&params),
            };
            if let Some(d) = deadline {
                req = req.timeout(d);
            }
            if let Some(c) = &credentials {
                req = c.authorize(req);
            }
            req
        })?;

        let profile_id = resp
            .headers()
            .get(PROFILE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let content_type = net::effective_content_type(
            resp.headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let body = resp.bytes()?.to_vec();

        // Reported before the body is interpreted, error responses included.
        if let (Some(hook), Some(id)) = (hook, profile_id) {
            hook(&id);
        }

        Ok(RawResponse {
            status,
            url: final_url,
            content_type,
            body,
        })
    }

    /// Perform the request, retrying rate-limited responses on the bounded
    /// exponential-backoff schedule. The last response is returned as-is once the
    /// schedule is exhausted.
    fn execute_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, EeError> {
        let mut attempt = 0u32;
        loop {
            let resp = build().send()?;
            if resp.status() == StatusCode::TOO_MANY_REQUESTS
                && self.retry.enabled
                && attempt < self.retry.max_retries
            {
                let wait = self.retry.delay_for(attempt);
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt, ?wait, "rate limited, backing off");
                thread::sleep(wait);
                attempt += 1;
                continue;
            }
            return Ok(resp);
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct EeClientBuilder {
    user_agent: Option<String>,
    api_base: Option<Url>,
    tile_base: Option<Url>,
    credentials: Option<Credentials>,
    deadline_ms: Option<u64>,
    retry: Option<RetryConfig>,
    retry_enabled: Option<bool>,
    connect_timeout: Option<Duration>,
}

impl EeClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base URL (e.g., `https://earthengine.googleapis.com/api`).
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the tile/media base URL (e.g., `https://earthengine.googleapis.com`).
    pub fn tile_base(mut self, url: Url) -> Self {
        self.tile_base = Some(url);
        self
    }

    /// Set the session credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the request deadline in milliseconds. `0` means no limit (the default).
    pub fn deadline_ms(mut self, milliseconds: u64) -> Self {
        self.deadline_ms = Some(milliseconds);
        self
    }

    /// Override the retry policy for rate-limited requests.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Enable or disable retries without replacing the whole policy.
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        self.retry_enabled = Some(enabled);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `EeError::Http` if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<EeClient, EeError> {
        let mut httpb = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            // The session deadline is the only timeout; the transport itself must
            // not impose one of its own.
            .timeout(None);

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let mut retry = self.retry.unwrap_or_default();
        if let Some(enabled) = self.retry_enabled {
            retry.enabled = enabled;
        }

        let client = EeClient {
            http,
            state: Arc::new(RwLock::new(SessionState::default())),
            retry,
        };
        client.initialize(self.credentials, self.api_base, self.tile_base);
        if let Some(ms) = self.deadline_ms {
            client.set_deadline(ms);
        }
        Ok(client)
    }
}
