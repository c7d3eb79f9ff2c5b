//! Debounced divider hover state.
//!
//! Entering the divider turns hover on after the enter window; leaving turns
//! it off after the leave window. A move in the other direction before the
//! window elapses replaces the pending change, so a pointer brushing across
//! the divider never flickers the highlight.

use splitpane_layout::{Debouncer, TimingConfig};
use web_time::{Duration, Instant};

use crate::logging::debug;

#[derive(Debug, Clone)]
pub struct DividerHover {
    enter: Duration,
    leave: Duration,
    hovered: bool,
    pending: Debouncer<bool>,
}

impl Default for DividerHover {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}

impl DividerHover {
    #[must_use]
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            enter: timing.hover_enter_debounce,
            leave: timing.hover_leave_debounce,
            hovered: false,
            pending: Debouncer::new(timing.hover_enter_debounce),
        }
    }

    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn pointer_entered(&mut self, now: Instant) {
        self.request(true, now);
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.request(false, now);
    }

    /// Apply a due change. Returns the new hover state when it flipped.
    pub fn poll(&mut self, now: Instant) -> Option<bool> {
        let hovered = self.pending.poll(now)?;
        if hovered == self.hovered {
            return None;
        }
        self.hovered = hovered;
        debug!(hovered, "divider hover changed");
        Some(hovered)
    }

    fn request(&mut self, hovered: bool, now: Instant) {
        if hovered == self.hovered {
            // Already there; just drop the opposite change if one is pending.
            self.pending.cancel();
            return;
        }
        self.pending
            .set_window(if hovered { self.enter } else { self.leave });
        self.pending.schedule(hovered, now);
    }
}
