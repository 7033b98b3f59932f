//! Request body and header checks.
//!
//! # Responsibilities
//! - Validate the `Content-Type` media type of body-bearing requests
//! - Buffer the body under a byte cap
//! - Decode exactly one JSON value, strictly
//!
//! # Design Decisions
//! - Media type parameters (`; charset=utf-8`) are ignored
//! - The cap is enforced while reading, so oversized bodies fail fast
//! - Unknown fields are rejected by the target type (`deny_unknown_fields`)

use axum::body::Body;
use axum::http::{header, HeaderMap};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

use crate::http::response::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Default request body cap (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Extract the lowercased media type from a `Content-Type` value.
pub fn media_type(value: &str) -> Result<String, String> {
    let media = value.split(';').next().unwrap_or_default().trim();
    if media.is_empty() {
        return Err("no media type".to_string());
    }

    let valid = media.split('/').count() <= 2
        && media
            .chars()
            .all(|c| c.is_ascii_graphic() && !"()<>@,;:\\\"[]?={}".contains(c));
    if !valid {
        return Err(format!("invalid media type '{}'", media));
    }

    Ok(media.to_ascii_lowercase())
}

/// Require the request's media type to be `expected`.
pub fn require_content_type(headers: &HeaderMap, expected: &'static str) -> Result<(), ApiError> {
    let raw = match headers.get(header::CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map_err(|_| ApiError::bad_request("invalid Content-Type header"))?,
        None => "",
    };

    let media = media_type(raw).map_err(ApiError::BadRequest)?;
    if media != expected {
        return Err(ApiError::UnsupportedMediaType {
            expected,
            got: media,
        });
    }
    Ok(())
}

/// Read at most `limit` bytes of body and decode a single JSON value.
pub async fn decode_json<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, ApiError> {
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            return Err(ApiError::BadRequest(format!(
                "request body must not be larger than {} bytes",
                limit
            )));
        }
        Err(e) => {
            return Err(ApiError::BadRequest(format!(
                "failed to read request body: {}",
                e
            )))
        }
    };

    decode_json_bytes(&bytes)
}

/// Decode exactly one JSON value from `bytes`.
pub fn decode_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("request body must not be empty"));
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(describe_json_error)?;
    de.end()
        .map_err(|_| ApiError::bad_request("request body must only contain a single JSON value"))?;
    Ok(value)
}

fn describe_json_error(err: serde_json::Error) -> ApiError {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax => ApiError::BadRequest(format!(
            "request body contains badly-formed JSON (at line {} column {})",
            err.line(),
            err.column()
        )),
        Category::Eof => ApiError::bad_request("request body contains badly-formed JSON"),
        Category::Data | Category::Io => ApiError::BadRequest(err.to_string()),
    }
}
