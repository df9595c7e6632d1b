//! The editor session: one serializable state record plus pure transitions.
//!
//! Everything the tool knows between user actions lives in
//! [`EditorSession`]: the acquired source image, the selected filter, and
//! the resize target. Transitions are synchronous and single-writer; the
//! only asynchronous seam is acquisition, which is sequence-ticketed so a
//! completion from a superseded request can never clobber a newer one.
//!
//! The record is `Serialize`/`Deserialize` end to end (image bytes travel
//! as a `data:` URI), so a UI surface can persist or inspect it without
//! this crate knowing the surface exists.

use crate::filter::catalog::{self, FilterPreset};
use crate::imaging::{aspect_ratio, locked_height, locked_width};
use serde::{Deserialize, Serialize};

/// A decoded, accepted source image.
///
/// Immutable once installed; replaced wholesale when a new acquisition
/// completes. Constructed only by acquisition, which guarantees both
/// dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    /// Encoded bytes as a `data:<media-type>;base64,...` URI.
    pub data_uri: String,
    /// Declared media type, e.g. `image/jpeg`.
    pub media_type: String,
    /// Intrinsic pixel width.
    pub width: u32,
    /// Intrinsic pixel height.
    pub height: u32,
}

/// The currently selected filter.
///
/// `label` is presentation only; everything downstream consumes
/// `expression`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub label: String,
    pub expression: String,
}

impl FilterSelection {
    fn from_preset(preset: &FilterPreset) -> Self {
        Self {
            label: preset.label.to_string(),
            expression: preset.expression.to_string(),
        }
    }

    /// True for the identity ("Normal") selection.
    pub fn is_identity(&self) -> bool {
        self.expression == catalog::identity().expression
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::from_preset(catalog::identity())
    }
}

/// Target output dimensions, optionally locked to the source aspect ratio.
///
/// While `locked` is true, editing one dimension recomputes the other from
/// `ratio`; the dimension edited last is authoritative. A dimension of 0
/// means "unset" and falls back to the intrinsic size at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
    pub locked: bool,
    /// Aspect ratio (width / height) captured at acquisition time.
    pub ratio: f64,
}

impl ResizeTarget {
    /// Initial target for a freshly acquired source: intrinsic dimensions,
    /// lock enabled.
    fn for_source(source: &SourceImage, ratio: f64) -> Self {
        Self {
            width: source.width,
            height: source.height,
            locked: true,
            ratio,
        }
    }

    /// Set the width; while locked, recompute the height to match.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
        if self.locked && width > 0 {
            self.height = locked_height(width, self.ratio);
        }
    }

    /// Set the height; while locked, recompute the width to match.
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        if self.locked && height > 0 {
            self.width = locked_width(height, self.ratio);
        }
    }

    /// Toggle the aspect-ratio lock.
    ///
    /// Locking re-syncs the height from the current width (the width is
    /// authoritative after unlocked edits); unlocking recomputes nothing.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked && self.width > 0 {
            self.height = locked_height(self.width, self.ratio);
        }
    }
}

/// Ticket identifying one acquisition request.
///
/// Issued by [`EditorSession::begin_acquire`]; only the most recently
/// issued ticket can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireTicket(u64);

/// Result of presenting a decoded source to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The source was installed and the resize target reset.
    Applied,
    /// The ticket was superseded by a newer acquisition; nothing changed.
    Stale,
}

/// Error installing a decoded source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("image has degenerate dimensions {width}x{height}")]
    DegenerateDimensions { width: u32, height: u32 },
}

/// The complete editor state record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorSession {
    source: Option<SourceImage>,
    filter: FilterSelection,
    resize: Option<ResizeTarget>,
    acquire_seq: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn resize(&self) -> Option<&ResizeTarget> {
        self.resize.as_ref()
    }

    /// Start an acquisition and get the ticket its completion must present.
    ///
    /// Each call supersedes all previously issued tickets.
    pub fn begin_acquire(&mut self) -> AcquireTicket {
        self.acquire_seq += 1;
        AcquireTicket(self.acquire_seq)
    }

    /// Complete an acquisition: install the source and reset the resize
    /// target to its intrinsic dimensions with the lock enabled.
    ///
    /// A ticket that is no longer the latest is discarded with no state
    /// change. Degenerate sources are rejected before any ratio is formed.
    pub fn complete_acquire(
        &mut self,
        ticket: AcquireTicket,
        source: SourceImage,
    ) -> Result<AcquireOutcome, SessionError> {
        if ticket.0 != self.acquire_seq {
            return Ok(AcquireOutcome::Stale);
        }
        let ratio = aspect_ratio(source.width, source.height).ok_or(
            SessionError::DegenerateDimensions {
                width: source.width,
                height: source.height,
            },
        )?;
        self.resize = Some(ResizeTarget::for_source(&source, ratio));
        self.source = Some(source);
        Ok(AcquireOutcome::Applied)
    }

    /// Select a catalog preset.
    pub fn select_preset(&mut self, preset: &FilterPreset) {
        self.filter = FilterSelection::from_preset(preset);
    }

    /// Select a custom filter expression. Callers validate the expression
    /// (see [`crate::filter::expr::parse`]) before storing it.
    pub fn select_expression(&mut self, expression: &str) {
        self.filter = FilterSelection {
            label: "Custom".to_string(),
            expression: expression.to_string(),
        };
    }

    /// Set the target width. No-op before any source is acquired.
    pub fn set_width(&mut self, width: u32) {
        if let Some(resize) = &mut self.resize {
            resize.set_width(width);
        }
    }

    /// Set the target height. No-op before any source is acquired.
    pub fn set_height(&mut self, height: u32) {
        if let Some(resize) = &mut self.resize {
            resize.set_height(height);
        }
    }

    /// Toggle the aspect-ratio lock. No-op before any source is acquired.
    pub fn set_locked(&mut self, locked: bool) {
        if let Some(resize) = &mut self.resize {
            resize.set_locked(locked);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::data_uri;

    fn test_source(width: u32, height: u32) -> SourceImage {
        SourceImage {
            data_uri: data_uri::encode("image/png", b"stub"),
            media_type: "image/png".to_string(),
            width,
            height,
        }
    }

    fn session_with(width: u32, height: u32) -> EditorSession {
        let mut session = EditorSession::new();
        let ticket = session.begin_acquire();
        session
            .complete_acquire(ticket, test_source(width, height))
            .unwrap();
        session
    }

    // =========================================================================
    // Acquisition
    // =========================================================================

    #[test]
    fn acquisition_resets_target_to_intrinsic_with_lock() {
        let session = session_with(400, 200);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (400, 200));
        assert!(resize.locked);
        assert_eq!(resize.ratio, 2.0);
    }

    #[test]
    fn reacquisition_replaces_source_and_target_wholesale() {
        let mut session = session_with(400, 200);
        session.set_width(100);

        let ticket = session.begin_acquire();
        session
            .complete_acquire(ticket, test_source(300, 300))
            .unwrap();

        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (300, 300));
        assert_eq!(resize.ratio, 1.0);
        assert_eq!(session.source().unwrap().width, 300);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = EditorSession::new();
        let first = session.begin_acquire();
        let second = session.begin_acquire();

        // The older request finishes decoding after the newer one was issued
        let outcome = session
            .complete_acquire(first, test_source(400, 200))
            .unwrap();
        assert_eq!(outcome, AcquireOutcome::Stale);
        assert!(session.source().is_none());

        let outcome = session
            .complete_acquire(second, test_source(300, 150))
            .unwrap();
        assert_eq!(outcome, AcquireOutcome::Applied);
        assert_eq!(session.source().unwrap().width, 300);
    }

    #[test]
    fn stale_completion_keeps_current_source() {
        let mut session = session_with(400, 200);
        let old_ticket = AcquireTicket(0);
        let outcome = session
            .complete_acquire(old_ticket, test_source(999, 999))
            .unwrap();
        assert_eq!(outcome, AcquireOutcome::Stale);
        assert_eq!(session.source().unwrap().width, 400);
    }

    #[test]
    fn degenerate_source_is_rejected() {
        let mut session = EditorSession::new();
        let ticket = session.begin_acquire();
        let err = session
            .complete_acquire(ticket, test_source(400, 0))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::DegenerateDimensions {
                width: 400,
                height: 0
            }
        );
        assert!(session.source().is_none());
        assert!(session.resize().is_none());
    }

    // =========================================================================
    // Resize controller
    // =========================================================================

    #[test]
    fn locked_width_edit_recomputes_height() {
        let mut session = session_with(400, 200);
        session.set_width(100);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (100, 50));
    }

    #[test]
    fn locked_height_edit_recomputes_width() {
        let mut session = session_with(400, 200);
        session.set_height(50);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (100, 50));
    }

    #[test]
    fn locked_edits_round_trip_within_one_pixel() {
        let mut session = session_with(1600, 900);
        session.set_width(333);
        let h = session.resize().unwrap().height;
        session.set_height(h);
        let w = session.resize().unwrap().width;
        assert!(w.abs_diff(333) <= 1, "round trip drifted: {w}");
    }

    #[test]
    fn unlocked_edits_are_independent() {
        let mut session = session_with(400, 200);
        session.set_locked(false);
        session.set_height(10);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (400, 10));
    }

    #[test]
    fn relocking_resyncs_height_from_width() {
        // 400×200 → ratio 2.0; the scenario from the resize contract
        let mut session = session_with(400, 200);
        session.set_width(100);
        assert_eq!(session.resize().unwrap().height, 50);

        session.set_locked(false);
        session.set_height(10);
        assert_eq!(session.resize().unwrap().width, 100);

        session.set_locked(true);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (100, 50));
    }

    #[test]
    fn lock_toggle_without_edits_is_idempotent() {
        let mut session = session_with(400, 200);
        session.set_width(100);
        let before = session.resize().unwrap().clone();

        session.set_locked(false);
        session.set_locked(true);
        assert_eq!(session.resize().unwrap(), &before);
    }

    #[test]
    fn zero_width_clears_without_recompute() {
        let mut session = session_with(400, 200);
        session.set_width(0);
        let resize = session.resize().unwrap();
        assert_eq!((resize.width, resize.height), (0, 200));
    }

    #[test]
    fn resize_edits_before_acquisition_are_noops() {
        let mut session = EditorSession::new();
        session.set_width(100);
        session.set_height(100);
        session.set_locked(false);
        assert!(session.resize().is_none());
    }

    // =========================================================================
    // Filter selection
    // =========================================================================

    #[test]
    fn default_filter_is_identity() {
        let session = EditorSession::new();
        assert_eq!(session.filter().label, "Normal");
        assert_eq!(session.filter().expression, "none");
        assert!(session.filter().is_identity());
    }

    #[test]
    fn reselecting_normal_leaves_no_residue() {
        let mut session = EditorSession::new();
        session.select_preset(crate::filter::find("Grayscale").unwrap());
        assert_eq!(session.filter().expression, "grayscale(100%)");

        session.select_preset(crate::filter::find("Normal").unwrap());
        assert_eq!(session.filter(), &FilterSelection::default());
    }

    #[test]
    fn custom_expression_selection() {
        let mut session = EditorSession::new();
        session.select_expression("grayscale(50%) blur(2px)");
        assert_eq!(session.filter().label, "Custom");
        assert_eq!(session.filter().expression, "grayscale(50%) blur(2px)");
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn session_round_trips_through_json() {
        let mut session = session_with(400, 200);
        session.select_preset(crate::filter::find("Sepia").unwrap());
        session.set_width(100);

        let json = serde_json::to_string(&session).unwrap();
        let restored: EditorSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
