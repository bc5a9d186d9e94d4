//! Centralized constants for default endpoints, retry bounds and UA.

/// Default UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("earthengine-rs/", env!("CARGO_PKG_VERSION"));

/// Default base URL for API calls.
pub(crate) const DEFAULT_API_BASE_URL: &str = "https://earthengine.googleapis.com/api";

/// Default base URL for media and tile calls.
pub(crate) const DEFAULT_TILE_BASE_URL: &str = "https://earthengine.googleapis.com";

/// Maximum number of times to retry a rate-limited request.
pub(crate) const MAX_RETRIES: u32 = 5;

/// Base wait before retrying a rate-limited request; doubles per retry.
pub(crate) const BASE_RETRY_WAIT_MS: u64 = 1_000;

/// Upper bound on the wait between retries of a rate-limited request.
pub(crate) const MAX_RETRY_WAIT_MS: u64 = 120_000;

/// Response header carrying the computation profile ID.
pub(crate) const PROFILE_HEADER: &str = "x-earth-engine-computation-profile";

/// Request parameter that asks the server to produce a computation profile.
pub(crate) const PROFILING_PARAM: &str = "profiling";
