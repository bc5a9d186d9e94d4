//! Interpretation of completed API responses.
//!
//! The decoding rules mirror the service's envelope contract: a JSON body is an
//! object with either an `error` node or a `data` payload. A structured `error`
//! outranks the generic status-code mapping, so server messages survive non-2xx
//! responses.

use serde_json::Value;

use crate::core::error::EeError;

/// Everything the decoder needs from a finished HTTP exchange.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) url: String,
    pub(crate) content_type: String,
    pub(crate) body: Vec<u8>,
}

fn is_json(content_type: &str) -> bool {
    matches!(content_type, "application/json" | "text/json")
}

/// Effective content type: the header value up to any parameters, with JSON assumed
/// when the header is absent or empty.
pub(crate) fn effective_content_type(header: Option<&str>) -> String {
    let raw = header.unwrap_or("");
    let main = raw.split(';').next().unwrap_or("").trim();
    if main.is_empty() {
        "application/json".to_string()
    } else {
        main.to_ascii_lowercase()
    }
}

fn status_error(status: u16, url: &str) -> Option<EeError> {
    if (100..300).contains(&status) {
        return None;
    }
    let url = url.to_string();
    Some(match status {
        404 => EeError::NotFound { url },
        429 => EeError::RateLimited { url },
        500..=599 => EeError::ServerError { status, url },
        _ => EeError::Status { status, url },
    })
}

/// Decode a response for which a JSON `data` payload is expected.
pub(crate) fn decode_json(resp: &RawResponse) -> Result<Value, EeError> {
    let payload = if is_json(&resp.content_type) {
        Some(extract_data(&resp.body)?)
    } else {
        None
    };

    if let Some(err) = status_error(resp.status, &resp.url) {
        return Err(err);
    }

    payload.ok_or_else(|| EeError::NotJson {
        content_type: resp.content_type.clone(),
    })
}

/// Decode a response in raw mode: no JSON interpretation, only the status check.
pub(crate) fn decode_raw(resp: RawResponse) -> Result<Vec<u8>, EeError> {
    if let Some(err) = status_error(resp.status, &resp.url) {
        return Err(err);
    }
    Ok(resp.body)
}

fn extract_data(body: &[u8]) -> Result<Value, EeError> {
    let text = || String::from_utf8_lossy(body).into_owned();

    let value: Value =
        serde_json::from_slice(body).map_err(|_| EeError::InvalidJson { body: text() })?;

    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(EeError::Server(message));
    }

    match value.as_object().and_then(|obj| obj.get("data")) {
        Some(data) => Ok(data.clone()),
        None => Err(EeError::Malformed { body: text() }),
    }
}
