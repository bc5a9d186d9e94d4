//! earthengine-rs: Rust client for the Earth Engine REST API.
//!
//! The crate is the request dispatch layer of the SDK: a session object holding
//! base URLs, deadline and credentials ([`EeClient`]), a thread-local override so
//! concurrent threads can use distinct credentials ([`session`]), and a bounded
//! exponential-backoff retry loop for rate-limited requests. Endpoints are reached
//! through the `send`/`send_raw` contract; payloads are `serde_json::Value`.
//!
//! ```no_run
//! use earthengine_rs::{Credentials, HttpMethod, session};
//!
//! fn main() -> Result<(), earthengine_rs::EeError> {
//!     session::initialize(Some(Credentials::bearer("ya29.token")), None, None);
//!     let info = session::send("/info", &[("id", "srtm90_v4")], HttpMethod::Post)?;
//!     println!("{info}");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod media;
pub mod session;

pub use crate::core::{
    Credentials, DownloadId, EeClient, EeClientBuilder, EeError, HttpMethod, MapId, ProfileHook,
    RetryConfig, ThumbId,
};
