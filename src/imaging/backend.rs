//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, resize, and encode_png. Acquisition and export are written
//! against the trait, so pipeline logic is testable with the recording mock
//! below instead of real pixel work.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, everything
//! statically linked into the binary.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    DecodeFailed(String),
    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations so acquisition and
/// export stay backend-agnostic.
pub trait ImageBackend: Sync {
    /// Decode encoded image bytes into pixels, inferring the format from
    /// the content.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError>;

    /// Scale an image to exactly `width` × `height` (no aspect preservation —
    /// that decision is made upstream).
    fn resize_exact(&self, img: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Encode an image as PNG bytes.
    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::Mutex;

    /// Bytes the mock returns from `encode_png`, so tests can recognize a
    /// mock-produced artifact on disk.
    pub const MOCK_PNG_BYTES: &[u8] = b"mock-png";

    /// Mock backend that records operations and fabricates pixels.
    /// Uses Mutex (not RefCell) so it satisfies the trait's Sync bound.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode { byte_len: usize },
        Resize { width: u32, height: u32 },
        EncodePng { width: u32, height: u32 },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue dimensions for subsequent `decode` calls (LIFO, matching the
        /// pop order used below).
        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                decode_results: Mutex::new(dims),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn fabricate(width: u32, height: u32) -> DynamicImage {
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                width,
                height,
                image::Rgba([128, 128, 128, 255]),
            ))
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Decode {
                byte_len: bytes.len(),
            });

            let dims = self
                .decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::DecodeFailed("No mock dimensions".to_string()))?;
            Ok(Self::fabricate(dims.width, dims.height))
        }

        fn resize_exact(&self, _img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Resize { width, height });
            Self::fabricate(width, height)
        }

        fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::EncodePng {
                width: img.width(),
                height: img.height(),
            });
            Ok(MOCK_PNG_BYTES.to_vec())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let img = backend.decode(&[0u8; 16]).unwrap();
        assert_eq!(img.width(), 800);
        assert_eq!(img.height(), 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode { byte_len: 16 }));
    }

    #[test]
    fn mock_decode_without_queued_dimensions_errors() {
        let backend = MockBackend::new();
        assert!(backend.decode(&[0u8; 4]).is_err());
    }

    #[test]
    fn mock_records_resize_and_encode() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 400,
            height: 200,
        }]);

        let img = backend.decode(&[0u8; 8]).unwrap();
        let resized = backend.resize_exact(&img, 100, 50);
        let bytes = backend.encode_png(&resized).unwrap();
        assert_eq!(bytes, MOCK_PNG_BYTES);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 3);
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                width: 100,
                height: 50
            }
        ));
        assert!(matches!(
            &ops[2],
            RecordedOp::EncodePng {
                width: 100,
                height: 50
            }
        ));
    }
}
