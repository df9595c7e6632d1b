//! `data:` URI encoding and parsing for acquired image bytes.
//!
//! The session carries the source image's encoded bytes as a
//! `data:<media-type>;base64,<payload>` string, which keeps the whole state
//! record serializable as plain text. Only base64 payloads are supported —
//! that is the only form the session ever produces.

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataUriError {
    #[error("not a data: URI")]
    MissingScheme,
    #[error("missing ';base64,' marker")]
    MissingBase64Marker,
    #[error("base64 payload is corrupt: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Build a `data:` URI from a media type and raw encoded bytes.
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Parse a `data:` URI back into its media type and raw bytes.
pub fn decode(uri: &str) -> Result<(String, Vec<u8>), DataUriError> {
    let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
    let (media_type, payload) = rest
        .split_once(";base64,")
        .ok_or(DataUriError::MissingBase64Marker)?;
    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    Ok((media_type.to_string(), bytes))
}
