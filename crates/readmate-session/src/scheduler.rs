//! Scroll-driven batch scheduling.
//!
//! Reframed from an event callback into a level-triggered predicate: the
//! host evaluates [`ScrollScheduler::should_fetch`] on every scroll tick (or
//! loop iteration) and requests the next batch when it holds. The check is a
//! handful of comparisons, cheap enough for every tick.

use readmate_dom::Viewport;

use crate::session::TranslationSession;

/// How close the last translated unit must be, in viewport heights
/// (measured from the viewport's top edge), before the next batch is
/// prefetched.
pub const PREFETCH_VIEWPORTS: f32 = 1.5;

/// The level-triggered prefetch condition.
///
/// Best-effort: the user can scroll past untranslated content faster than
/// batches complete, which is accepted rather than guarded against.
#[derive(Debug, Clone, Copy)]
pub struct ScrollScheduler {
    margin: f32,
}

impl Default for ScrollScheduler {
    fn default() -> Self {
        Self {
            margin: PREFETCH_VIEWPORTS,
        }
    }
}

impl ScrollScheduler {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    /// Whether the session should fetch its next batch for this viewport.
    ///
    /// Never fires while a batch is in flight, after the session stopped
    /// watching scroll, or before the first batch has completed.
    pub fn should_fetch(&self, session: &TranslationSession, viewport: &Viewport) -> bool {
        if !session.is_enabled() || session.is_in_flight() || !session.watches_scroll() {
            return false;
        }
        let Some(last_index) = session.last_completed_unit() else {
            return false;
        };
        let Some(unit) = session.unit_box(last_index) else {
            return false;
        };
        unit.bottom_in_viewport(viewport) < viewport.height * self.margin
    }
}
