//! Bearer credentials and request authorization.

use std::fmt;

use reqwest::blocking::RequestBuilder;

/// An opaque bearer credential for the API.
///
/// The token is typically an OAuth2 access token obtained out-of-band; this crate
/// never fetches or refreshes tokens itself. Equality is token equality, which is
/// what decides whether [`set_thread_credentials`](crate::session::set_thread_credentials)
/// replaces a thread's session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wrap an access token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Attach this credential to an outgoing request.
    pub(crate) fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}
