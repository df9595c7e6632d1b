//! The export pipeline: decode → resize → filter → PNG → disk.
//!
//! Reads the current session (source, filter, resize target), composites
//! through the backend, and writes a single PNG artifact. The filter is
//! applied to the already-resized surface, matching a compositor that sets
//! the filter on the drawing context and then draws the source scaled.
//!
//! Export with no acquired source is a *skip*, not an error — observable
//! as no artifact produced. Every other failure (corrupt data URI, decode,
//! encode, write) surfaces as a typed [`ExportError`].

use crate::filter::{self, expr::ParseError};
use crate::imaging::data_uri::{self, DataUriError};
use crate::imaging::{effective_export_size, BackendError, ImageBackend};
use crate::session::EditorSession;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("source data URI is corrupt: {0}")]
    DataUri(#[from] DataUriError),
    #[error("invalid filter expression: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What an export request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No source image acquired; nothing was produced.
    Skipped,
    /// Artifact written.
    Written {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Run the export pipeline against the current session state.
///
/// The artifact lands at `output_dir/filename`; the directory is created
/// if missing. Target dimensions of 0 fall back per-dimension to the
/// source's intrinsic size.
pub fn export(
    session: &EditorSession,
    backend: &impl ImageBackend,
    output_dir: &Path,
    filename: &str,
) -> Result<ExportOutcome, ExportError> {
    let Some(source) = session.source() else {
        debug!("Export requested with no source image, skipping");
        return Ok(ExportOutcome::Skipped);
    };

    let chain = filter::parse(&session.filter().expression)?;

    let (_, bytes) = data_uri::decode(&source.data_uri)?;
    let img = backend.decode(&bytes)?;

    // A session with a source always has a resize target; treat a missing
    // one as fully unset.
    let target = session
        .resize()
        .map(|r| (r.width, r.height))
        .unwrap_or((0, 0));
    let (width, height) = effective_export_size(target, (source.width, source.height));

    let resized = backend.resize_exact(&img, width, height);
    let filtered = filter::apply_chain(resized, &chain);
    let png = backend.encode_png(&filtered)?;

    std::fs::create_dir_all(output_dir).map_err(|e| ExportError::Write {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let path = output_dir.join(filename);
    std::fs::write(&path, &png).map_err(|e| ExportError::Write {
        path: path.clone(),
        source: e,
    })?;

    debug!(path = %path.display(), width, height, "Export written");
    Ok(ExportOutcome::Written {
        path,
        width,
        height,
    })
}
