//! The fixed filter catalog.
//!
//! Filters are data, not code branches: an ordered list of
//! `{label, expression}` pairs. Selection is by label, and everything
//! downstream consumes only the expression string, so extending the catalog
//! is a one-line change here.

/// A named entry in the filter catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPreset {
    /// Display name shown in pickers and CLI output.
    pub label: &'static str,
    /// Filter expression applied at export time.
    pub expression: &'static str,
}

/// The catalog, in display order. The first entry is the identity filter
/// and the default selection.
pub const PRESETS: &[FilterPreset] = &[
    FilterPreset {
        label: "Normal",
        expression: "none",
    },
    FilterPreset {
        label: "Grayscale",
        expression: "grayscale(100%)",
    },
    FilterPreset {
        label: "Sepia",
        expression: "sepia(100%)",
    },
    FilterPreset {
        label: "Invert",
        expression: "invert(100%)",
    },
    FilterPreset {
        label: "Blur",
        expression: "blur(5px)",
    },
    FilterPreset {
        label: "Brightness",
        expression: "brightness(150%)",
    },
    FilterPreset {
        label: "Contrast",
        expression: "contrast(200%)",
    },
    FilterPreset {
        label: "Hue Rotate",
        expression: "hue-rotate(90deg)",
    },
    FilterPreset {
        label: "Saturate",
        expression: "saturate(200%)",
    },
];

/// The identity ("Normal") preset.
pub fn identity() -> &'static FilterPreset {
    &PRESETS[0]
}

/// Look up a preset by label, case-insensitively.
pub fn find(label: &str) -> Option<&'static FilterPreset> {
    PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
}
