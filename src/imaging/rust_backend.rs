//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |

use super::backend::{BackendError, ImageBackend};
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| BackendError::DecodeFailed(e.to_string()))?;
        debug!(
            width = img.width(),
            height = img.height(),
            byte_len = bytes.len(),
            "Decoded image"
        );
        Ok(img)
    }

    fn resize_exact(&self, img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if img.width() == width && img.height() == height {
            debug!(width, height, "Image already at target size, skipping resize");
            return img.clone();
        }
        debug!(
            orig_w = img.width(),
            orig_h = img.height(),
            width,
            height,
            "Resizing image"
        );
        img.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, BackendError> {
        let mut bytes: Vec<u8> = Vec::new();
        let encoder = PngEncoder::new(Cursor::new(&mut bytes));
        img.write_with_encoder(encoder)
            .map_err(|e| BackendError::EncodeFailed(e.to_string()))?;
        debug!(byte_len = bytes.len(), "Encoded PNG");
        Ok(bytes)
    }
}
