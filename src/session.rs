//! Process-wide and per-thread session management.
//!
//! Most programs talk to the API through one shared session: the functions here
//! forward to a lazily-created process-wide [`EeClient`]. A thread that needs its
//! own credentials calls [`set_thread_credentials`]; from then on that thread
//! resolves to a private session instance, so concurrent callers never observe or
//! mutate each other's credentials, base URLs, deadlines, or profiling hooks.

use std::cell::RefCell;
use std::sync::LazyLock;

use serde_json::Value;
use url::Url;

use crate::core::{Credentials, EeClient, EeError, HttpMethod, ProfileHook};

static GLOBAL: LazyLock<EeClient> = LazyLock::new(|| {
    EeClient::builder().build().expect("default client")
});

thread_local! {
    static THREAD: RefCell<ThreadSession> = RefCell::new(ThreadSession::default());
}

#[derive(Default)]
struct ThreadSession {
    credentials: Option<Credentials>,
    client: Option<EeClient>,
}

/// Sets the credentials for the current thread.
///
/// Returns `false` if the same credentials are already set, `true` otherwise.
/// Passing `None` clears the override; the thread then shares the process-wide
/// session again.
pub fn set_thread_credentials(credentials: Option<Credentials>) -> bool {
    THREAD.with_borrow_mut(|t| {
        if t.credentials == credentials {
            false
        } else {
            t.credentials = credentials;
            true
        }
    })
}

/// The session for the calling thread.
///
/// With no thread credentials set this is the process-wide instance. Otherwise it
/// is a thread-private instance carrying exactly the thread's credentials; it is
/// created on first use (starting from default configuration, not from the global
/// session's) and re-created whenever the thread's credentials change.
pub fn current() -> EeClient {
    THREAD.with_borrow_mut(|t| {
        let Some(creds) = t.credentials.clone() else {
            return GLOBAL.clone();
        };
        if let Some(client) = &t.client
            && client.credentials().as_ref() == Some(&creds)
        {
            return client.clone();
        }
        let client = EeClient::builder()
            .credentials(creds)
            .build()
            .expect("thread session client");
        t.client = Some(client.clone());
        client
    })
}

/// Initialize the current session, setting credentials and base URLs.
///
/// Arguments left as `None` keep their old values; on the first call, unset base
/// URLs take the service defaults.
pub fn initialize(
    credentials: Option<Credentials>,
    api_base: Option<Url>,
    tile_base: Option<Url>,
) {
    current().initialize(credentials, api_base, tile_base);
}

/// Reset the current session, clearing credentials and custom base URLs.
pub fn reset() {
    current().reset();
}

/// Set the timeout for API requests on the current session, in milliseconds.
/// `0` means no limit.
pub fn set_deadline(milliseconds: u64) {
    current().set_deadline(milliseconds);
}

/// Run `f` with profiling enabled (or disabled, when `hook` is `None`) on the
/// current session, restoring the previous hook afterwards.
pub fn with_profiling<R>(hook: Option<ProfileHook>, f: impl FnOnce() -> R) -> R {
    current().with_profiling(hook, f)
}

/// Send an API call on the current session and decode the JSON `data` payload.
///
/// # Errors
///
/// Returns `EeError` for transport failures, server-reported errors, responses
/// that are not the expected JSON envelope, and unsuccessful HTTP statuses.
pub fn send(path: &str, params: &[(&str, &str)], method: HttpMethod) -> Result<Value, EeError> {
    current().send(path, params, method)
}

/// Send an API call on the current session and return the body without decoding.
///
/// # Errors
///
/// Returns `EeError` for transport failures and unsuccessful HTTP statuses.
pub fn send_raw(
    path: &str,
    params: &[(&str, &str)],
    method: HttpMethod,
) -> Result<Vec<u8>, EeError> {
    current().send_raw(path, params, method)
}
