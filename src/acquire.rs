//! Image acquisition: media-type gate, decode, and session install.
//!
//! A file is accepted if and only if its declared media type is `image/*`.
//! With no browser to report a MIME type, the declared type comes from a
//! fixed extension table covering exactly the decoders compiled in. The
//! gate runs before any bytes are read, so rejection is cheap and leaves
//! session state untouched.
//!
//! Rejections and decode failures are explicit errors here, not silent
//! ignores — the caller decides how to surface them.

use crate::imaging::{data_uri, BackendError, ImageBackend};
use crate::session::{AcquireOutcome, EditorSession, SessionError, SourceImage};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Extension → declared media type, for formats whose decoders are
/// compiled in.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
];

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("'{0}' is not a supported image file (expected jpg, jpeg, png, tif, tiff, or webp)")]
    UnsupportedMediaType(String),
    #[error("image has degenerate dimensions {width}x{height}")]
    DegenerateDimensions { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<SessionError> for AcquireError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::DegenerateDimensions { width, height } => {
                AcquireError::DegenerateDimensions { width, height }
            }
        }
    }
}

/// Declared media type for a path, if its extension marks it as an image
/// we can decode.
pub fn declared_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    MEDIA_TYPES
        .iter()
        .find(|(e, _)| ext.eq_ignore_ascii_case(e))
        .map(|(_, media_type)| *media_type)
}

/// Read, gate, and decode a file into a [`SourceImage`].
///
/// The returned source has non-zero dimensions; degenerate images are
/// rejected before any aspect ratio can be derived from them.
pub fn acquire_file(backend: &impl ImageBackend, path: &Path) -> Result<SourceImage, AcquireError> {
    let media_type = declared_media_type(path)
        .ok_or_else(|| AcquireError::UnsupportedMediaType(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let img = backend.decode(&bytes)?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(AcquireError::DegenerateDimensions { width, height });
    }

    debug!(path = %path.display(), media_type, width, height, "Acquired image");
    Ok(SourceImage {
        data_uri: data_uri::encode(media_type, &bytes),
        media_type: media_type.to_string(),
        width,
        height,
    })
}

/// Acquire a file into a session: issue a ticket, decode, complete.
///
/// A failed decode still consumes the ticket, so any older in-flight
/// acquisition becomes stale rather than resurrecting.
pub fn acquire_into(
    session: &mut EditorSession,
    backend: &impl ImageBackend,
    path: &Path,
) -> Result<AcquireOutcome, AcquireError> {
    let ticket = session.begin_acquire();
    let source = acquire_file(backend, path)?;
    Ok(session.complete_acquire(ticket, source)?)
}
