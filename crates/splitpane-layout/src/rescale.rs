//! Proportional rescale after the container changes size.
//!
//! The new extents are the previous logical extents scaled by
//! `sum(measured) / sum(previous)`, or the measured extents as-is when there
//! is nothing usable to scale. Collapsed panes are then pinned back to the
//! collapsed size, and the extent they shed or gained is handed to the first
//! expanded pane after each collapsed run (the last expanded pane before it,
//! for a run at the end). Finally any expanded pane left below its minimum
//! is grown through the regular propagation path.

use crate::logging::debug;
use crate::model::{EXTENT_EPSILON, sum_extents};
use crate::propagate::{PropagationBounds, propagate};

/// Compute rescaled extents from the measured ones.
///
/// `previous` is ignored when it is absent, has a different length, or sums
/// to zero.
#[must_use]
pub fn recalculate(
    measured: &[f64],
    previous: Option<&[f64]>,
    bounds: &PropagationBounds<'_>,
) -> Vec<f64> {
    let mut extents = match previous {
        Some(previous) if previous.len() == measured.len() => {
            let previous_total = sum_extents(previous);
            if previous_total.abs() > EXTENT_EPSILON && previous_total.is_finite() {
                let ratio = sum_extents(measured) / previous_total;
                previous.iter().map(|extent| extent * ratio).collect()
            } else {
                measured.to_vec()
            }
        }
        _ => measured.to_vec(),
    };
    apply_collapsed_overrides(&mut extents, bounds);
    enforce_minimums(&mut extents, bounds);
    debug!(?extents, "rescaled pane extents");
    extents
}

/// Pin collapsed panes to the collapsed size, moving the difference to the
/// neighboring expanded pane.
pub fn apply_collapsed_overrides(extents: &mut [f64], bounds: &PropagationBounds<'_>) {
    let mut carry = 0.0;
    for index in 0..extents.len() {
        if bounds.is_collapsed(index) {
            carry += extents[index] - bounds.collapsed_size;
            extents[index] = bounds.collapsed_size;
        } else if carry != 0.0 {
            extents[index] += carry;
            carry = 0.0;
        }
    }
    if carry != 0.0
        && let Some(last_expanded) = (0..extents.len()).rev().find(|i| !bounds.is_collapsed(*i))
    {
        extents[last_expanded] += carry;
    }
}

/// Scale the expanded panes so the extents sum to `total`. Collapsed panes
/// keep their extent. When every expanded pane is empty they share the
/// expanded part equally.
pub fn fit_total(extents: &mut [f64], total: f64, bounds: &PropagationBounds<'_>) {
    let collapsed: f64 = (0..extents.len())
        .filter(|index| bounds.is_collapsed(*index))
        .map(|index| extents[index])
        .sum();
    let expanded = sum_extents(extents) - collapsed;
    let target = total - collapsed;
    if expanded > EXTENT_EPSILON {
        let ratio = target / expanded;
        for (index, extent) in extents.iter_mut().enumerate() {
            if !bounds.is_collapsed(index) {
                *extent *= ratio;
            }
        }
        return;
    }
    let count = (0..extents.len()).filter(|index| !bounds.is_collapsed(*index)).count();
    if count == 0 {
        return;
    }
    let share = target / count as f64;
    for (index, extent) in extents.iter_mut().enumerate() {
        if !bounds.is_collapsed(index) {
            *extent = share;
        }
    }
}

/// Grow every expanded pane below its minimum, first from the panes after
/// it, then from the panes before it.
pub fn enforce_minimums(extents: &mut [f64], bounds: &PropagationBounds<'_>) {
    for index in 0..extents.len() {
        if bounds.is_collapsed(index) {
            continue;
        }
        let deficit = bounds.effective_min(index) - extents[index];
        if deficit <= EXTENT_EPSILON {
            continue;
        }
        let taken = propagate(extents, index, deficit, bounds);
        let remaining = deficit - taken;
        if remaining > EXTENT_EPSILON
            && let Some(previous) = index.checked_sub(1)
        {
            propagate(extents, previous, -remaining, bounds);
        }
    }
}
