//! # snapfilter
//!
//! Filter, resize, and export images as PNG from the command line: acquire
//! an image file, pick a named filter (or write a filter expression),
//! optionally retarget the output dimensions with aspect-ratio locking,
//! and export the result.
//!
//! # Architecture: State Record + Pipeline
//!
//! The entire editing model lives in one serializable state record,
//! [`session::EditorSession`], mutated only through pure transition
//! functions. Commands drive the record and hand it to the export
//! pipeline:
//!
//! ```text
//! acquire  file      →  SourceImage + ResizeTarget   (decode, gate, reset)
//! select   filter    →  FilterSelection              (catalog or custom expr)
//! resize   w/h/lock  →  ResizeTarget                 (aspect-locked math)
//! export             →  PNG artifact                 (resize → filter → encode)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **UI independence**: the record carries everything (image bytes travel
//!   as a `data:` URI), so any surface — this CLI, a GUI, a test — can own
//!   the interaction loop without the core knowing.
//! - **Testability**: transitions are pure and the pixel work sits behind
//!   [`imaging::ImageBackend`], so pipeline logic is exercised with a
//!   recording mock.
//! - **Race safety**: acquisition completions carry sequence tickets; a
//!   slow decode from a superseded request can never overwrite a newer one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | The state record: `SourceImage`, `FilterSelection`, `ResizeTarget`, transitions |
//! | [`acquire`] | Media-type gate, file read, decode, session install |
//! | [`filter`] | Filter catalog, expression parser, pixel application |
//! | [`imaging`] | Backend trait, dimension math, PNG/data-URI codecs |
//! | [`export`] | The render pipeline: decode → resize → filter → PNG → disk |
//! | [`config`] | `snapfilter.toml` loading and validation |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//!
//! # Design Decisions
//!
//! ## Filters As Data
//!
//! The catalog is an ordered list of `{label, expression}` pairs; selection
//! stores only the expression string, and export parses it fresh. Adding a
//! filter is one catalog line, and custom expressions ride the exact same
//! path as presets.
//!
//! ## PNG-Only Output
//!
//! Exports are always PNG: lossless, universally readable, and free of
//! quality knobs. Input stays liberal (JPEG, PNG, TIFF, WebP — everything
//! with a pure-Rust decoder compiled in).
//!
//! ## Pure-Rust Imaging
//!
//! All pixel work goes through the `image` crate. No system libraries, no
//! external binaries: the tool is a single self-contained executable.

pub mod acquire;
pub mod config;
pub mod export;
pub mod filter;
pub mod imaging;
pub mod output;
pub mod session;
