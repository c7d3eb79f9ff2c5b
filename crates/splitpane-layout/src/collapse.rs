//! Collapse/expand transitions.
//!
//! ```text
//! Expanded --(index enters collapsed set)--> Collapsed { stored_extent }
//! Collapsed --(index leaves collapsed set)--> Expanded
//! ```
//!
//! The collapsed index set is authoritative. [`reconcile_collapsed`] diffs a
//! requested set against the current one and runs one size transition per
//! changed pane, so requesting the current state again is a no-op.
//!
//! A pane collapses through the boundary after it (`boundary = pane`), or the
//! boundary before it when the collapse direction is reversed
//! (`boundary = pane - 1`). The freed or reclaimed extent moves through the
//! regular propagation path, so neighbors keep their minimums and collapsed
//! neighbors travel along.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::logging::debug;
use crate::model::SizeModel;
use crate::propagate::{PropagationBounds, adjust_offset, move_boundary};

/// One applied collapse or expand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum CollapseTransition {
    Collapsed {
        index: usize,
        stored_extent: f64,
        applied_offset: f64,
    },
    Expanded {
        index: usize,
        restored_toward: f64,
        applied_offset: f64,
    },
}

impl CollapseTransition {
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Collapsed { index, .. } | Self::Expanded { index, .. } => *index,
        }
    }
}

/// Boundary a pane collapses through, if it has one.
#[must_use]
pub fn collapse_boundary(pane: usize, pane_count: usize, is_reversed: bool) -> Option<usize> {
    if pane >= pane_count {
        return None;
    }
    if is_reversed {
        pane.checked_sub(1)
    } else {
        (pane + 1 < pane_count).then_some(pane)
    }
}

/// Shrink `pane` to the collapsed size. `bounds` must already list `pane` as
/// collapsed. Returns the applied boundary offset.
pub fn collapse_pane(
    extents: &mut [f64],
    pane: usize,
    is_reversed: bool,
    bounds: &PropagationBounds<'_>,
) -> f64 {
    let Some(boundary) = collapse_boundary(pane, extents.len(), is_reversed) else {
        return 0.0;
    };
    let offset = adjust_offset(bounds.collapsed_size - extents[pane], true, is_reversed);
    move_boundary(extents, boundary, offset, is_reversed, bounds)
}

/// Grow `pane` from its current extent toward `target`. `bounds` must no
/// longer list `pane` as collapsed. Returns the applied boundary offset.
pub fn expand_pane(
    extents: &mut [f64],
    pane: usize,
    target: f64,
    is_reversed: bool,
    bounds: &PropagationBounds<'_>,
) -> f64 {
    let Some(boundary) = collapse_boundary(pane, extents.len(), is_reversed) else {
        return 0.0;
    };
    let offset = adjust_offset(target - extents[pane], true, is_reversed);
    move_boundary(extents, boundary, offset, is_reversed, bounds)
}

/// Bring the model's collapse state to `target`, applying one size transition
/// per pane whose membership changed, in ascending index order.
///
/// Out-of-range indices in `target` are dropped. Collapsing records the
/// pane's current extent as its stored extent; expanding restores toward the
/// stored extent (never below the pane's minimum) and clears it.
pub fn reconcile_collapsed(
    model: &mut SizeModel,
    target: &BTreeSet<usize>,
    is_reversed: bool,
) -> Vec<CollapseTransition> {
    let len = model.len();
    let target: BTreeSet<usize> = target.iter().copied().filter(|index| *index < len).collect();
    let changed: Vec<usize> = model
        .collapsed
        .symmetric_difference(&target)
        .copied()
        .collect();
    if changed.is_empty() {
        return Vec::new();
    }

    model.collapsed = target;
    let mut transitions = Vec::with_capacity(changed.len());
    for index in changed {
        let mut extents = model.extents.clone();
        let transition = if model.collapsed.contains(&index) {
            let stored_extent = extents[index];
            let applied_offset = collapse_pane(&mut extents, index, is_reversed, &model.bounds());
            model.stored_extents[index] = Some(stored_extent);
            CollapseTransition::Collapsed {
                index,
                stored_extent,
                applied_offset,
            }
        } else {
            let stored = model.stored_extents[index].take();
            let restored_toward = stored
                .unwrap_or(extents[index])
                .max(model.min_extents[index]);
            let applied_offset = expand_pane(
                &mut extents,
                index,
                restored_toward,
                is_reversed,
                &model.bounds(),
            );
            CollapseTransition::Expanded {
                index,
                restored_toward,
                applied_offset,
            }
        };
        debug!(?transition, "pane collapse state changed");
        model.commit(extents);
        transitions.push(transition);
    }
    transitions
}
