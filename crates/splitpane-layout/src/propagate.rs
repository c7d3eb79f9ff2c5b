//! Constraint propagation across pane boundaries.
//!
//! Boundary `i` sits between pane `i` and pane `i + 1`. Moving it by a
//! positive offset grows pane `i` and shrinks pane `i + 1`. When the shrinking
//! side would fall below its effective minimum, the shortfall is pushed to the
//! next boundary in the direction of travel before anything is applied
//! locally, so the panes behave like a chain of compressible segments: a drag
//! keeps going until every pane it pushes against is at its minimum.
//!
//! ```
//! use std::collections::BTreeSet;
//! use splitpane_layout::{PropagationBounds, propagate};
//!
//! let mut extents = vec![100.0, 100.0, 100.0];
//! let collapsed = BTreeSet::new();
//! let bounds = PropagationBounds {
//!     min_extents: &[50.0, 50.0, 50.0],
//!     collapsed: &collapsed,
//!     collapsed_size: 50.0,
//! };
//! let applied = propagate(&mut extents, 0, -80.0, &bounds);
//! assert_eq!(applied, -50.0);
//! assert_eq!(extents, vec![50.0, 150.0, 100.0]);
//! ```

use std::collections::BTreeSet;

use crate::config::DEFAULT_MIN_EXTENT;

/// Minimums and collapse state consulted while propagating.
#[derive(Debug, Clone, Copy)]
pub struct PropagationBounds<'a> {
    /// Minimum extent per pane while expanded.
    pub min_extents: &'a [f64],
    pub collapsed: &'a BTreeSet<usize>,
    pub collapsed_size: f64,
}

impl PropagationBounds<'_> {
    /// Collapsed size for collapsed panes, otherwise the pane's minimum.
    /// Indices without a configured minimum use [`DEFAULT_MIN_EXTENT`].
    #[must_use]
    pub fn effective_min(&self, index: usize) -> f64 {
        if self.collapsed.contains(&index) {
            self.collapsed_size
        } else {
            self.min_extents
                .get(index)
                .copied()
                .unwrap_or(DEFAULT_MIN_EXTENT)
        }
    }

    #[must_use]
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.contains(&index)
    }
}

/// Normalize a raw offset into boundary space.
///
/// Right-to-left reading flips pointer deltas, and reversed collapse flips
/// collapse deltas. Both flips compose.
#[must_use]
pub fn adjust_offset(offset: f64, is_ltr: bool, is_reversed: bool) -> f64 {
    let offset = if is_ltr { offset } else { -offset };
    if is_reversed { -offset } else { offset }
}

/// Move `boundary` by `offset`, cascading into neighbors that hit their
/// minimum. Returns the offset actually applied at `boundary`.
///
/// The total of `extents` is unchanged. A zero or non-finite offset and a
/// boundary without a pane on both sides are no-ops returning `0.0`.
pub fn propagate(
    extents: &mut [f64],
    boundary: usize,
    offset: f64,
    bounds: &PropagationBounds<'_>,
) -> f64 {
    if offset == 0.0 || !offset.is_finite() || boundary >= extents.len().saturating_sub(1) {
        return 0.0;
    }

    let first_min = bounds.effective_min(boundary);
    let second_min = bounds.effective_min(boundary + 1);
    let first = extents[boundary] + offset;
    let second = extents[boundary + 1] - offset;

    let mut applied = offset;
    if offset < 0.0 && first < first_min {
        // Negative shortfall: the previous boundary has to move left too.
        let missing = first - first_min;
        let pushed = match boundary.checked_sub(1) {
            Some(previous) => propagate(extents, previous, missing, bounds),
            None => 0.0,
        };
        applied -= missing - pushed;
    } else if offset > 0.0 && second < second_min {
        let missing = second_min - second;
        let pushed = propagate(extents, boundary + 1, missing, bounds);
        applied -= missing - pushed;
    }

    extents[boundary] += applied;
    extents[boundary + 1] -= applied;
    applied
}

/// Carry collapsed panes along after `boundary` moved by `offset`.
///
/// A collapsed pane cannot absorb any of the move, so every collapsed pane
/// further along the direction of travel is shifted by the same offset at the
/// boundary next to it, keeping its extent at the collapsed size. Only offsets
/// that travel toward those panes (negative in forward layouts, positive when
/// reversed) have anything to carry.
pub fn propagate_collapsed_siblings(
    extents: &mut [f64],
    boundary: usize,
    offset: f64,
    is_reversed: bool,
    bounds: &PropagationBounds<'_>,
) {
    let travels = if is_reversed {
        offset > 0.0
    } else {
        offset < 0.0
    };
    if !travels {
        return;
    }

    let last = extents.len().saturating_sub(1);
    if is_reversed {
        for index in (1..=boundary.min(last)).rev() {
            if bounds.is_collapsed(index) {
                propagate(extents, index - 1, offset, bounds);
            }
        }
    } else {
        for index in boundary.saturating_add(1)..last {
            if bounds.is_collapsed(index) {
                propagate(extents, index, offset, bounds);
            }
        }
    }
}

/// Move `boundary` and then carry collapsed siblings with whatever was
/// applied. Returns the applied offset.
pub fn move_boundary(
    extents: &mut [f64],
    boundary: usize,
    offset: f64,
    is_reversed: bool,
    bounds: &PropagationBounds<'_>,
) -> f64 {
    let applied = propagate(extents, boundary, offset, bounds);
    propagate_collapsed_siblings(extents, boundary, applied, is_reversed, bounds);
    applied
}
