//! The split-pane engine handle.
//!
//! [`SplitPaneEngine`] owns the committed size model, the in-progress extents
//! of a live drag, the drag state machine, and the resize debounce timer.
//! Hosts forward pointer and resize events into it and read extents back.
//! Every mutation happens synchronously inside one call; notifications go
//! through the [`SplitPaneHooks`] the engine was built with.
//!
//! # Example
//!
//! ```
//! use splitpane_layout::{EngineConfig, PointerPosition, SplitPaneEngine};
//!
//! let config = EngineConfig::default().with_initial_extents(vec![100.0, 100.0, 100.0]);
//! let mut engine = SplitPaneEngine::new(3, config);
//!
//! engine.begin_drag(0, PointerPosition::new(100.0, 0.0)).unwrap();
//! assert_eq!(engine.update_drag(PointerPosition::new(160.0, 0.0)), &[160.0, 50.0, 90.0]);
//! assert_eq!(engine.end_drag(), &[160.0, 50.0, 90.0]);
//! ```

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use web_time::Instant;

use crate::collapse::{CollapseTransition, collapse_boundary, reconcile_collapsed};
use crate::config::{EngineConfig, TimingConfig};
use crate::debounce::Debouncer;
use crate::drag::{DragController, DragNoopReason, DragSession, DragState, DragTransition, PointerPosition};
use crate::error::{SplitPaneError, check_extents};
use crate::hooks::SplitPaneHooks;
use crate::logging::{debug, trace, warn};
use crate::model::{
    PaneSlot, PersistedLayout, SizeModel, default_pane_key, extents_differ, sum_extents,
};
use crate::propagate::{adjust_offset, move_boundary};
use crate::rescale::{enforce_minimums, fit_total, recalculate};

/// Sizing engine for one split-pane instance.
#[derive(Debug)]
pub struct SplitPaneEngine<H: SplitPaneHooks = ()> {
    config: EngineConfig,
    timing: TimingConfig,
    model: SizeModel,
    in_progress: Vec<f64>,
    drag: DragController,
    resize: Debouncer<Vec<f64>>,
    pass_through: bool,
    /// Extents are in measured units rather than declared proportions.
    measured: bool,
    last_transition: Option<DragTransition>,
    hooks: H,
}

impl SplitPaneEngine<()> {
    /// Engine for `pane_count` panes without notifications.
    #[must_use]
    pub fn new(pane_count: usize, config: EngineConfig) -> Self {
        Self::with_hooks(pane_count, config, ())
    }

    /// Like [`Self::new`], but rejects configurations with invalid sizes.
    pub fn try_new(pane_count: usize, config: EngineConfig) -> Result<Self, SplitPaneError> {
        config.validate()?;
        Ok(Self::new(pane_count, config))
    }
}

impl<H: SplitPaneHooks> SplitPaneEngine<H> {
    /// Engine for `pane_count` panes keyed `pane.0`, `pane.1`, ...
    pub fn with_hooks(pane_count: usize, config: EngineConfig, hooks: H) -> Self {
        Self::with_keys((0..pane_count).map(default_pane_key).collect(), config, hooks)
    }

    /// Engine for panes identified by `keys`, in display order.
    ///
    /// Fewer than two keys put the engine in pass-through mode: it keeps the
    /// declared extents and ignores every resize and collapse request.
    pub fn with_keys(keys: Vec<String>, config: EngineConfig, hooks: H) -> Self {
        let pane_count = keys.len();
        let pass_through = pane_count < 2;
        if pass_through {
            warn!(
                pane_count,
                "split pane needs at least two panes; resizing and collapsing are disabled"
            );
        }
        if let Some(initial) = &config.initially_collapsed {
            let ignored = initial.iter().skip(pane_count).filter(|entry| entry.is_some()).count();
            if ignored > 0 {
                warn!(ignored, pane_count, "ignoring initially collapsed entries past the last pane");
            }
        }

        let model = SizeModel::from_config(keys, &config);
        let mut engine = Self {
            timing: TimingConfig::default(),
            resize: Debouncer::new(TimingConfig::default().resize_debounce),
            in_progress: model.extents().to_vec(),
            model,
            config,
            drag: DragController::new(),
            pass_through,
            measured: false,
            last_transition: None,
            hooks,
        };
        engine.expand_uncollapsible();
        engine
    }

    /// Like [`Self::with_hooks`], but rejects configurations with invalid
    /// sizes.
    pub fn try_with_hooks(
        pane_count: usize,
        config: EngineConfig,
        hooks: H,
    ) -> Result<Self, SplitPaneError> {
        config.validate()?;
        Ok(Self::with_hooks(pane_count, config, hooks))
    }

    /// Replace the debounce windows.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        let timing = timing.validated();
        self.resize.set_window(timing.resize_debounce);
        self.timing = timing;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    #[must_use]
    pub fn model(&self) -> &SizeModel {
        &self.model
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.model.len()
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.model.keys()
    }

    /// Committed extents.
    #[must_use]
    pub fn extents(&self) -> &[f64] {
        self.model.extents()
    }

    /// Extents the renderer should draw: the drag candidate while a drag is
    /// live, the committed extents otherwise.
    #[must_use]
    pub fn in_progress_extents(&self) -> &[f64] {
        &self.in_progress
    }

    #[must_use]
    pub fn collapsed_indices(&self) -> &BTreeSet<usize> {
        self.model.collapsed()
    }

    /// Stored pre-collapse extent per pane, `None` for expanded panes.
    #[must_use]
    pub fn collapsed_sizes(&self) -> &[Option<f64>] {
        self.model.collapsed_sizes()
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<PaneSlot> {
        self.model.slot(index)
    }

    pub fn slots(&self) -> impl Iterator<Item = PaneSlot> + '_ {
        self.model.slots()
    }

    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        self.pass_through
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Most recent drag lifecycle step.
    #[must_use]
    pub fn last_transition(&self) -> Option<&DragTransition> {
        self.last_transition.as_ref()
    }

    /// When a scheduled container resize becomes due.
    #[must_use]
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Layout to persist between sessions.
    #[must_use]
    pub fn snapshot(&self) -> PersistedLayout {
        self.model.to_persisted()
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    // -----------------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------------

    /// Open a drag on the divider owned by pane `boundary`.
    ///
    /// In forward collapse layouts that divider is boundary `boundary`; in
    /// reversed ones it is `boundary - 1`. Dragging a collapsed pane's
    /// divider, dragging in pass-through mode, and starting a second drag
    /// are accepted as no-ops.
    pub fn begin_drag(
        &mut self,
        boundary: usize,
        position: PointerPosition,
    ) -> Result<DragTransition, SplitPaneError> {
        if self.pass_through {
            return Ok(self.record(DragNoopReason::PassThrough));
        }
        let reversed = self.config.collapse_reversed;
        let Some(adjusted) = collapse_boundary(boundary, self.model.len(), reversed) else {
            return Err(SplitPaneError::BoundaryOutOfRange {
                boundary,
                boundaries: self.model.len() - 1,
            });
        };
        if self.model.is_collapsed(boundary) {
            return Ok(self.record(DragNoopReason::PaneCollapsed));
        }

        let transition = self.drag.begin(adjusted, position.along(self.config.split));
        self.last_transition = Some(transition);
        if !transition.is_noop() {
            debug!(boundary = adjusted, anchor = position.along(self.config.split), "drag started");
            self.in_progress = self.model.extents().to_vec();
            self.hooks.on_drag_started();
        }
        Ok(transition)
    }

    /// Move the live drag to `position` and return the in-progress extents.
    ///
    /// The candidate is recomputed from the committed extents and the total
    /// offset since the drag began. Without a live drag this returns the
    /// committed extents unchanged.
    pub fn update_drag(&mut self, position: PointerPosition) -> &[f64] {
        let transition = self.drag.move_to(position.along(self.config.split));
        self.last_transition = Some(transition);
        if let Some((boundary, offset, applied)) = self.refresh_candidate() {
            trace!(boundary, offset, applied, "drag updated");
            self.hooks.on_change(&self.in_progress);
        }
        &self.in_progress
    }

    /// Rebuild the in-progress extents from the committed ones and the live
    /// session's total offset. Returns `(boundary, offset, applied)`.
    fn refresh_candidate(&mut self) -> Option<(usize, f64, f64)> {
        let session = self.drag.session()?;
        let mut candidate = self.model.extents().to_vec();
        let offset = adjust_offset(session.raw_offset(), self.config.is_ltr(), false);
        let applied = move_boundary(
            &mut candidate,
            session.boundary,
            offset,
            self.config.collapse_reversed,
            &self.model.bounds(),
        );
        self.in_progress = candidate;
        Some((session.boundary, offset, applied))
    }

    /// Commit the live drag and return the committed extents.
    pub fn end_drag(&mut self) -> &[f64] {
        let transition = self.drag.finish();
        self.last_transition = Some(transition);
        if !transition.is_noop() {
            self.model.commit(self.in_progress.clone());
            debug!(extents = ?self.model.extents(), "drag committed");
            self.hooks.on_save_sizes(self.model.extents());
        }
        self.model.extents()
    }

    /// Drop the live drag, restoring the committed extents.
    pub fn cancel_drag(&mut self) -> DragTransition {
        let transition = self.drag.cancel();
        self.last_transition = Some(transition);
        if !transition.is_noop() {
            debug!("drag canceled");
            self.in_progress = self.model.extents().to_vec();
            self.hooks.on_change(&self.in_progress);
        }
        transition
    }

    /// The pointer came back over the drag surface. Without the primary
    /// button held the release was missed, so the drag is committed.
    pub fn pointer_entered(&mut self, primary_pressed: bool) -> Option<DragTransition> {
        if primary_pressed || !self.drag.is_dragging() {
            return None;
        }
        debug!("pointer re-entered without primary button; ending drag");
        self.end_drag();
        self.last_transition
    }

    fn record(&mut self, reason: DragNoopReason) -> DragTransition {
        let transition = self.drag.noop(reason);
        self.last_transition = Some(transition);
        transition
    }

    // -----------------------------------------------------------------------
    // Collapse
    // -----------------------------------------------------------------------

    /// Flip pane `index` between collapsed and expanded.
    pub fn toggle_collapse(
        &mut self,
        index: usize,
    ) -> Result<Option<CollapseTransition>, SplitPaneError> {
        let collapsed = self.model.is_collapsed(index);
        self.set_collapsed(index, !collapsed)
    }

    /// Collapse or expand pane `index`. Requesting the current state returns
    /// `Ok(None)`.
    pub fn set_collapsed(
        &mut self,
        index: usize,
        collapsed: bool,
    ) -> Result<Option<CollapseTransition>, SplitPaneError> {
        self.ensure_collapsible(index)?;
        let mut target = self.model.collapsed().clone();
        if collapsed {
            target.insert(index);
        } else {
            target.remove(&index);
        }
        Ok(self.apply_collapsed(&target).into_iter().next())
    }

    /// Make `indices` exactly the collapsed set, applying one transition per
    /// changed pane in ascending order.
    pub fn set_collapsed_indices(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<Vec<CollapseTransition>, SplitPaneError> {
        let target: BTreeSet<usize> = indices.into_iter().collect();
        for index in &target {
            self.ensure_collapsible(*index)?;
        }
        Ok(self.apply_collapsed(&target))
    }

    fn ensure_collapsible(&self, index: usize) -> Result<(), SplitPaneError> {
        let panes = self.model.len();
        if self.pass_through {
            return Err(SplitPaneError::TooFewPanes { count: panes });
        }
        if !self.config.collapse_enabled {
            return Err(SplitPaneError::CollapseDisabled);
        }
        if index >= panes {
            return Err(SplitPaneError::PaneOutOfRange { index, panes });
        }
        let reversed = self.config.collapse_reversed;
        if collapse_boundary(index, panes, reversed).is_none() {
            return Err(SplitPaneError::PaneNotCollapsible { index, reversed });
        }
        Ok(())
    }

    fn apply_collapsed(&mut self, target: &BTreeSet<usize>) -> Vec<CollapseTransition> {
        if target == self.model.collapsed() {
            return Vec::new();
        }
        if self.drag.is_dragging() {
            self.cancel_drag();
        }
        let transitions =
            reconcile_collapsed(&mut self.model, target, self.config.collapse_reversed);
        if !transitions.is_empty() {
            self.in_progress = self.model.extents().to_vec();
            self.hooks.on_collapse(self.model.collapsed_sizes());
            self.hooks.on_change(self.model.extents());
        }
        transitions
    }

    /// Expand collapsed panes that have no boundary to collapse through.
    fn expand_uncollapsible(&mut self) {
        let panes = self.model.len();
        let reversed = self.config.collapse_reversed;
        let blocked: Vec<usize> = self
            .model
            .collapsed
            .iter()
            .copied()
            .filter(|index| collapse_boundary(*index, panes, reversed).is_none())
            .collect();
        for index in blocked {
            warn!(index, reversed, "pane cannot collapse in this direction; treating it as expanded");
            self.model.collapsed.remove(&index);
            self.model.stored_extents[index] = None;
        }
    }

    // -----------------------------------------------------------------------
    // Rescale
    // -----------------------------------------------------------------------

    /// First layout after the renderer measured the panes: the declared
    /// initial proportions are scaled to the measured total.
    pub fn mount(&mut self, measured: &[f64]) -> Result<bool, SplitPaneError> {
        self.check_measurement(measured)?;
        if self.pass_through {
            return Ok(false);
        }
        let declared: Vec<f64> = (0..self.model.len())
            .map(|index| self.config.initial_extent(index))
            .collect();
        let rescaled = recalculate(measured, Some(declared.as_slice()), &self.model.bounds());
        self.measured = true;
        Ok(self.apply_rescale(rescaled))
    }

    /// Adopt freshly measured extents now. Fires `on_change` only when the
    /// result differs from the committed extents; returns whether it did.
    pub fn on_container_resize(&mut self, measured: &[f64]) -> Result<bool, SplitPaneError> {
        self.check_measurement(measured)?;
        self.resize.cancel();
        if self.pass_through {
            return Ok(false);
        }
        let rescaled = recalculate(measured, None, &self.model.bounds());
        self.measured = true;
        Ok(self.apply_rescale(rescaled))
    }

    /// Queue a measurement; only the last one inside the debounce window is
    /// applied, by [`Self::poll`].
    pub fn schedule_container_resize(
        &mut self,
        measured: Vec<f64>,
        now: Instant,
    ) -> Result<(), SplitPaneError> {
        self.check_measurement(&measured)?;
        self.resize.schedule(measured, now);
        Ok(())
    }

    /// Apply a scheduled measurement whose window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Result<bool, SplitPaneError> {
        match self.resize.poll(now) {
            Some(measured) => self.on_container_resize(&measured),
            None => Ok(false),
        }
    }

    fn check_measurement(&self, measured: &[f64]) -> Result<(), SplitPaneError> {
        if measured.len() != self.model.len() {
            return Err(SplitPaneError::LengthMismatch {
                what: "measuredExtents",
                expected: self.model.len(),
                actual: measured.len(),
            });
        }
        check_extents("measuredExtents", measured)
    }

    fn apply_rescale(&mut self, rescaled: Vec<f64>) -> bool {
        if !extents_differ(&rescaled, self.model.extents()) {
            return false;
        }
        self.model.commit(rescaled);
        // A live drag keeps its offset on top of the rescaled extents.
        if self.refresh_candidate().is_none() {
            self.in_progress = self.model.extents().to_vec();
        }
        self.hooks.on_change(&self.in_progress);
        true
    }

    // -----------------------------------------------------------------------
    // Pane set
    // -----------------------------------------------------------------------

    /// Rebuild for a new ordered set of pane keys.
    ///
    /// Panes whose key survives keep their extent and collapse state. Before
    /// the first measurement new panes start at their declared initial
    /// extent; afterwards the previous total is kept, new panes open at their
    /// minimum, and extent freed by removed panes goes to the expanded
    /// survivors. A live drag and a pending resize are dropped.
    pub fn sync_panes(&mut self, keys: Vec<String>) {
        if self.drag.is_dragging() {
            self.cancel_drag();
        }
        self.resize.cancel();

        let previous_extents = self.model.extents().to_vec();
        let previous_collapsed = self.model.collapsed_sizes().to_vec();
        let fresh: Vec<bool> = {
            let known: FxHashSet<&str> = self.model.keys().iter().map(String::as_str).collect();
            keys.iter().map(|key| !known.contains(key.as_str())).collect()
        };
        self.model.rebuild(keys, &self.config);
        self.expand_uncollapsible();

        let pass_through = self.model.len() < 2;
        if pass_through && !self.pass_through {
            warn!(
                pane_count = self.model.len(),
                "split pane dropped below two panes; resizing and collapsing are disabled"
            );
        }
        self.pass_through = pass_through;
        if self.measured && !pass_through {
            self.refit_measured(&fresh, sum_extents(&previous_extents));
        }
        self.in_progress = self.model.extents().to_vec();
        debug!(keys = ?self.model.keys(), "pane set rebuilt");

        if previous_collapsed != self.model.collapsed_sizes() {
            self.hooks.on_collapse(self.model.collapsed_sizes());
        }
        if extents_differ(&previous_extents, self.model.extents()) {
            self.hooks.on_change(self.model.extents());
        }
    }

    /// Keep measured units after a rebuild: `fresh` marks panes that did not
    /// exist before, `total` is the container extent to preserve.
    fn refit_measured(&mut self, fresh: &[bool], total: f64) {
        let mut extents = self.model.extents().to_vec();
        for (extent, _) in extents.iter_mut().zip(fresh).filter(|(_, fresh)| **fresh) {
            *extent = 0.0;
        }
        let bounds = self.model.bounds();
        fit_total(&mut extents, total, &bounds);
        enforce_minimums(&mut extents, &bounds);
        self.model.commit(extents);
    }
}
