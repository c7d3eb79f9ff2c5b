//! Size model: one extent per pane plus minimum and collapse bookkeeping.
//!
//! Invariants maintained by every engine operation:
//!
//! - Boundary moves and collapse toggles only transfer extent between panes;
//!   the total is unchanged. Proportional rescale is the one operation that
//!   deliberately changes it.
//! - Every pane satisfies `extent >= effective_min`, where the effective
//!   minimum is the collapsed size for collapsed panes.
//! - `stored_extents[i]` is `Some` exactly when pane `i` is collapsed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::propagate::PropagationBounds;

/// Tolerance used when comparing extents after floating-point arithmetic.
pub const EXTENT_EPSILON: f64 = 1e-9;

/// Read-only view of one pane's sizing state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneSlot {
    pub extent: f64,
    pub min_extent: f64,
    pub collapsed: bool,
    pub stored_extent: Option<f64>,
}

impl PaneSlot {
    /// The smallest extent this pane may currently take.
    #[must_use]
    pub fn effective_min(&self, collapsed_size: f64) -> f64 {
        if self.collapsed {
            collapsed_size
        } else {
            self.min_extent
        }
    }

    /// Collapse state derived from the stored extent.
    #[must_use]
    pub fn collapse_state(&self) -> PaneCollapseState {
        match self.stored_extent {
            Some(stored_extent) if self.collapsed => PaneCollapseState::Collapsed { stored_extent },
            _ => PaneCollapseState::Expanded,
        }
    }
}

/// Per-pane collapse state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaneCollapseState {
    Expanded,
    Collapsed { stored_extent: f64 },
}

/// Layout shape a host can persist and feed back through
/// [`EngineConfig::with_persisted`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLayout {
    pub extents: Vec<f64>,
    pub collapsed_indices: Vec<usize>,
}

/// Owned, exclusively mutated size state for one split pane.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeModel {
    pub(crate) keys: Vec<String>,
    pub(crate) extents: Vec<f64>,
    pub(crate) min_extents: Vec<f64>,
    pub(crate) collapsed: BTreeSet<usize>,
    pub(crate) stored_extents: Vec<Option<f64>>,
    pub(crate) collapsed_size: f64,
}

impl SizeModel {
    /// Build the model for `keys`, taking extents, minimums and initial
    /// collapse state from `config`.
    ///
    /// Collapse entries past the pane count are dropped; missing entries mean
    /// "expanded".
    #[must_use]
    pub fn from_config(keys: Vec<String>, config: &EngineConfig) -> Self {
        let len = keys.len();
        let extents = (0..len).map(|index| config.initial_extent(index)).collect();
        let min_extents = (0..len).map(|index| config.min_extent(index)).collect();
        let mut stored_extents = vec![None; len];
        if config.collapse_enabled
            && let Some(initial) = &config.initially_collapsed
        {
            for (slot, stored) in stored_extents.iter_mut().zip(initial) {
                *slot = *stored;
            }
        }
        let collapsed = collapsed_indices_from_sizes(&stored_extents);
        Self {
            keys,
            extents,
            min_extents,
            collapsed,
            stored_extents,
            collapsed_size: config.collapsed_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Committed extents.
    #[must_use]
    pub fn extents(&self) -> &[f64] {
        &self.extents
    }

    #[must_use]
    pub fn min_extents(&self) -> &[f64] {
        &self.min_extents
    }

    #[must_use]
    pub fn collapsed_size(&self) -> f64 {
        self.collapsed_size
    }

    /// The set of collapsed pane indices, the single source of truth for
    /// collapse state.
    #[must_use]
    pub fn collapsed(&self) -> &BTreeSet<usize> {
        &self.collapsed
    }

    #[must_use]
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.contains(&index)
    }

    /// Collapse tracking sequence: the stored pre-collapse extent for each
    /// collapsed pane, `None` for expanded panes.
    #[must_use]
    pub fn collapsed_sizes(&self) -> &[Option<f64>] {
        &self.stored_extents
    }

    /// Sum of all committed extents.
    #[must_use]
    pub fn total(&self) -> f64 {
        sum_extents(&self.extents)
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<PaneSlot> {
        Some(PaneSlot {
            extent: *self.extents.get(index)?,
            min_extent: *self.min_extents.get(index)?,
            collapsed: self.collapsed.contains(&index),
            stored_extent: self.stored_extents.get(index).copied().flatten(),
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = PaneSlot> + '_ {
        (0..self.len()).filter_map(|index| self.slot(index))
    }

    /// Effective minimum of `index` given the current collapse state.
    #[must_use]
    pub fn effective_min(&self, index: usize) -> f64 {
        self.bounds().effective_min(index)
    }

    /// Constraint view used by the propagation functions.
    #[must_use]
    pub fn bounds(&self) -> PropagationBounds<'_> {
        PropagationBounds {
            min_extents: &self.min_extents,
            collapsed: &self.collapsed,
            collapsed_size: self.collapsed_size,
        }
    }

    /// Snapshot for persistence.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedLayout {
        PersistedLayout {
            extents: self.extents.clone(),
            collapsed_indices: self.collapsed.iter().copied().collect(),
        }
    }

    /// Replace the committed extents. Lengths must already match.
    pub(crate) fn commit(&mut self, extents: Vec<f64>) {
        debug_assert_eq!(extents.len(), self.extents.len());
        self.extents = extents;
    }

    /// Rebuild for a new ordered key list, keeping extents and collapse state
    /// of keys that persist. New panes get their configured initial extent
    /// and minimum.
    pub(crate) fn rebuild(&mut self, keys: Vec<String>, config: &EngineConfig) {
        let previous: rustc_hash::FxHashMap<&str, usize> = self
            .keys
            .iter()
            .enumerate()
            .map(|(index, key)| (key.as_str(), index))
            .collect();

        let mut extents = Vec::with_capacity(keys.len());
        let mut stored_extents = Vec::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            match previous.get(key.as_str()) {
                Some(&old) => {
                    extents.push(self.extents[old]);
                    stored_extents.push(self.stored_extents[old]);
                }
                None => {
                    extents.push(config.initial_extent(index));
                    stored_extents.push(None);
                }
            }
        }

        self.min_extents = (0..keys.len()).map(|index| config.min_extent(index)).collect();
        self.collapsed = collapsed_indices_from_sizes(&stored_extents);
        self.extents = extents;
        self.stored_extents = stored_extents;
        self.keys = keys;
    }
}

/// Default key for the pane at `index`.
#[must_use]
pub fn default_pane_key(index: usize) -> String {
    format!("pane.{index}")
}

/// Sum a sequence of extents.
#[must_use]
pub fn sum_extents(extents: &[f64]) -> f64 {
    extents.iter().sum()
}

/// Collapsed indices encoded by a collapse tracking sequence: every `Some`
/// entry is collapsed.
#[must_use]
pub fn collapsed_indices_from_sizes(sizes: &[Option<f64>]) -> BTreeSet<usize> {
    sizes
        .iter()
        .enumerate()
        .filter_map(|(index, size)| size.map(|_| index))
        .collect()
}

/// Whether two extent sequences differ beyond [`EXTENT_EPSILON`].
#[must_use]
pub fn extents_differ(a: &[f64], b: &[f64]) -> bool {
    a.len() != b.len()
        || a
            .iter()
            .zip(b)
            .any(|(left, right)| (left - right).abs() > EXTENT_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MIN_EXTENT, MinExtents};

    fn keys(count: usize) -> Vec<String> {
        (0..count).map(default_pane_key).collect()
    }

    #[test]
    fn from_config_derives_collapsed_set_from_tracking_sequence() {
        let config = EngineConfig::default()
            .with_collapse(true)
            .with_initial_extents(vec![2.0, 1.0, 1.0])
            .with_initially_collapsed(vec![None, Some(180.0), None, Some(10.0)]);
        let model = SizeModel::from_config(keys(3), &config);
        assert_eq!(model.extents(), &[2.0, 1.0, 1.0]);
        assert_eq!(model.collapsed().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(model.collapsed_sizes(), &[None, Some(180.0), None]);
        assert_eq!(
            model.slot(1).map(|slot| slot.collapse_state()),
            Some(PaneCollapseState::Collapsed {
                stored_extent: 180.0
            })
        );
    }

    #[test]
    fn initial_collapse_ignored_when_collapse_disabled() {
        let config = EngineConfig::default().with_initially_collapsed(vec![Some(3.0), None]);
        let model = SizeModel::from_config(keys(2), &config);
        assert!(model.collapsed().is_empty());
        assert_eq!(model.collapsed_sizes(), &[None, None]);
    }

    #[test]
    fn effective_min_uses_collapsed_size_for_collapsed_panes() {
        let config = EngineConfig::default()
            .with_collapse(true)
            .with_collapsed_size(24.0)
            .with_min_extents(MinExtents::PerPane(vec![80.0, 90.0]))
            .with_initially_collapsed(vec![None, Some(200.0)]);
        let model = SizeModel::from_config(keys(2), &config);
        assert_eq!(model.effective_min(0), 80.0);
        assert_eq!(model.effective_min(1), 24.0);
        assert_eq!(model.effective_min(5), DEFAULT_MIN_EXTENT);
    }

    #[test]
    fn rebuild_keeps_surviving_keys() {
        let config = EngineConfig::default().with_collapse(true);
        let mut model = SizeModel::from_config(keys(3), &config);
        model.extents = vec![100.0, 50.0, 150.0];
        model.stored_extents[1] = Some(120.0);
        model.collapsed.insert(1);

        let new_keys = vec!["pane.1".to_string(), "fresh".to_string(), "pane.2".to_string()];
        model.rebuild(new_keys, &config);

        assert_eq!(model.extents(), &[50.0, 1.0, 150.0]);
        assert_eq!(model.collapsed_sizes(), &[Some(120.0), None, None]);
        assert_eq!(model.collapsed().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(model.keys()[1], "fresh");
    }

    #[test]
    fn extents_differ_respects_tolerance() {
        assert!(!extents_differ(&[1.0, 2.0], &[1.0 + 1e-12, 2.0]));
        assert!(extents_differ(&[1.0, 2.0], &[1.0, 2.1]));
        assert!(extents_differ(&[1.0], &[1.0, 0.0]));
    }

    #[test]
    fn persisted_layout_uses_camel_case() {
        let layout = PersistedLayout {
            extents: vec![120.0, 50.0],
            collapsed_indices: vec![1],
        };
        let json = serde_json::to_string(&layout).expect("layout serializes");
        assert_eq!(json, r#"{"extents":[120.0,50.0],"collapsedIndices":[1]}"#);
    }
}
