//! Minimal end-to-end request against the API.
//!
//! Expects an OAuth2 access token in `EE_ACCESS_TOKEN`:
//!
//! ```sh
//! EE_ACCESS_TOKEN=ya29... cargo run --example send_request
//! ```

use earthengine_rs::{Credentials, HttpMethod, session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt::init();

    let token = std::env::var("EE_ACCESS_TOKEN")?;
    session::initialize(Some(Credentials::bearer(token)), None, None);
    session::set_deadline(30_000);

    let info = session::send("/info", &[("id", "srtm90_v4")], HttpMethod::Post)?;
    println!("{info:#}");
    Ok(())
}
