//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` (format inferred from content) |
//! | **Resize** | Lanczos3 via `resize_exact` |
//! | **Encode → PNG** | `image::codecs::png::PngEncoder` |
//! | **Data URIs** | `base64` standard engine |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Data URIs**: encode/parse for the session's serialized image bytes

pub mod backend;
mod calculations;
pub mod data_uri;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{aspect_ratio, effective_export_size, locked_height, locked_width};
pub use rust_backend::RustBackend;
