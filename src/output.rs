//! CLI output formatting.
//!
//! Output is information-centric: the primary line for every entity is its
//! semantic identity (filter label, artifact name), with detail shown as
//! indented context lines underneath. Every command's display follows the
//! same two-level pattern:
//!
//! ```text
//! 001 Grayscale
//!     Expression: grayscale(100%)
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::export::ExportOutcome;
use crate::filter::catalog;
use crate::session::{FilterSelection, ResizeTarget, SourceImage};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Indented context line under an entity header.
fn context(label: &str, value: impl std::fmt::Display) -> String {
    format!("    {label}: {value}")
}

// ============================================================================
// filters
// ============================================================================

/// Catalog listing, one entity per preset.
pub fn format_filter_list() -> Vec<String> {
    let mut lines = vec!["Filters".to_string()];
    for (i, preset) in catalog::PRESETS.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), preset.label));
        lines.push(context("Expression", preset.expression));
    }
    lines
}

pub fn print_filter_list() {
    for line in format_filter_list() {
        println!("{line}");
    }
}

// ============================================================================
// info
// ============================================================================

/// Acquisition summary: identity line is the file name, context lines give
/// type, dimensions, and the initialized export target.
pub fn format_info(path: &Path, source: &SourceImage, resize: &ResizeTarget) -> Vec<String> {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    vec![
        name,
        context("Type", &source.media_type),
        context(
            "Dimensions",
            format!("{} x {}", source.width, source.height),
        ),
        context(
            "Export target",
            format!(
                "{} x {} (aspect {}, ratio {:.2})",
                resize.width,
                resize.height,
                if resize.locked { "locked" } else { "unlocked" },
                resize.ratio
            ),
        ),
    ]
}

pub fn print_info(path: &Path, source: &SourceImage, resize: &ResizeTarget) {
    for line in format_info(path, source, resize) {
        println!("{line}");
    }
}

// ============================================================================
// export
// ============================================================================

/// Export report: artifact name first, then filter and dimensions.
pub fn format_export(outcome: &ExportOutcome, filter: &FilterSelection) -> Vec<String> {
    match outcome {
        ExportOutcome::Skipped => {
            vec!["Nothing to export: no image acquired".to_string()]
        }
        ExportOutcome::Written {
            path,
            width,
            height,
        } => {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            vec![
                name,
                context("Filter", format!("{} ({})", filter.label, filter.expression)),
                context("Dimensions", format!("{width} x {height}")),
                context("Output", path.display()),
            ]
        }
    }
}

pub fn print_export(outcome: &ExportOutcome, filter: &FilterSelection) {
    for line in format_export(outcome, filter) {
        println!("{line}");
    }
}
