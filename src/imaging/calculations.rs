//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Aspect ratio (width / height) of a source image.
///
/// Returns `None` for degenerate sources (zero width or height) so a
/// division-by-zero ratio can never leak into later rounding steps.
pub fn aspect_ratio(width: u32, height: u32) -> Option<f64> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(f64::from(width) / f64::from(height))
}

/// Height that keeps `width` consistent with `ratio`.
///
/// Rounds to the nearest pixel and never returns 0: a locked edit must not
/// produce a zero-height surface.
///
/// Callers guarantee `ratio` is finite and positive (see [`aspect_ratio`]).
pub fn locked_height(width: u32, ratio: f64) -> u32 {
    ((f64::from(width) / ratio).round() as u32).max(1)
}

/// Width that keeps `height` consistent with `ratio`.
///
/// Mirror of [`locked_height`].
pub fn locked_width(height: u32, ratio: f64) -> u32 {
    ((f64::from(height) * ratio).round() as u32).max(1)
}

/// Resolve the dimensions an export surface should be allocated at.
///
/// A target dimension of 0 means "unset" and falls back to the source's
/// intrinsic value for that dimension, so a half-specified target still
/// exports.
pub fn effective_export_size(target: (u32, u32), intrinsic: (u32, u32)) -> (u32, u32) {
    let (tw, th) = target;
    let (iw, ih) = intrinsic;
    (if tw > 0 { tw } else { iw }, if th > 0 { th } else { ih })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // aspect_ratio tests
    // =========================================================================

    #[test]
    fn ratio_landscape() {
        assert_eq!(aspect_ratio(400, 200), Some(2.0));
    }

    #[test]
    fn ratio_portrait() {
        assert_eq!(aspect_ratio(200, 400), Some(0.5));
    }

    #[test]
    fn ratio_zero_height_is_rejected() {
        assert_eq!(aspect_ratio(400, 0), None);
    }

    #[test]
    fn ratio_zero_width_is_rejected() {
        assert_eq!(aspect_ratio(0, 400), None);
    }

    // =========================================================================
    // locked_height / locked_width tests
    // =========================================================================

    #[test]
    fn height_follows_width_at_ratio() {
        // 2:1 ratio, width 100 → height 50
        assert_eq!(locked_height(100, 2.0), 50);
    }

    #[test]
    fn width_follows_height_at_ratio() {
        assert_eq!(locked_width(50, 2.0), 100);
    }

    #[test]
    fn locked_recompute_rounds_to_nearest() {
        // 3:2 ratio, width 100 → 66.67 → 67
        assert_eq!(locked_height(100, 1.5), 67);
    }

    #[test]
    fn locked_recompute_round_trips_within_one_pixel() {
        let ratio = 1600.0 / 900.0;
        for w in [1u32, 7, 100, 333, 1600, 4000] {
            let h = locked_height(w, ratio);
            let w2 = locked_width(h, ratio);
            assert!(
                w.abs_diff(w2) <= 1,
                "width {w} → height {h} → width {w2} drifted more than one pixel"
            );
        }
    }

    #[test]
    fn locked_height_never_zero() {
        // Extreme panorama ratio collapses to a 1px band, not 0
        assert_eq!(locked_height(2, 1000.0), 1);
    }

    #[test]
    fn locked_width_never_zero() {
        assert_eq!(locked_width(2, 0.001), 1);
    }

    // =========================================================================
    // effective_export_size tests
    // =========================================================================

    #[test]
    fn effective_size_uses_target_when_set() {
        assert_eq!(effective_export_size((800, 450), (1600, 900)), (800, 450));
    }

    #[test]
    fn effective_size_falls_back_when_unset() {
        assert_eq!(effective_export_size((0, 0), (1600, 900)), (1600, 900));
    }

    #[test]
    fn effective_size_falls_back_per_dimension() {
        assert_eq!(effective_export_size((800, 0), (1600, 900)), (800, 900));
        assert_eq!(effective_export_size((0, 450), (1600, 900)), (1600, 450));
    }
}
