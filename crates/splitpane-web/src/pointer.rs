//! Browser pointer and touch lifecycle adapter.
//!
//! [`PointerAdapter`] owns a [`SplitPaneEngine`] and turns the raw signals a
//! DOM host receives into engine operations:
//! - `mousedown` with the primary button and `touchstart` open a drag,
//! - `mousemove` / `touchmove` update it,
//! - `mouseup` / `touchend` commit it,
//! - `mouseenter` with the primary bit cleared in `buttons` commits a drag
//!   whose release happened outside the window,
//! - `blur` cancels it, restoring the committed extents.
//!
//! Only one input source drives a drag at a time. Every dispatch returns a
//! [`PointerDispatch`] carrying a structured [`PointerLogEntry`], which is
//! also emitted through `tracing` at debug level.

use splitpane_layout::{
    CollapseTransition, DragState, DragTransition, PointerPosition, SplitPaneEngine,
    SplitPaneError, SplitPaneHooks,
};
use web_time::Instant;

use crate::logging::debug;

/// Bit of `MouseEvent.buttons` set while the primary button is held.
pub const PRIMARY_BUTTON_MASK: u16 = 1;

/// Mouse button that triggered a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Which kind of input opened the live drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLifecyclePhase {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseEnter,
    TouchStart,
    TouchMove,
    TouchEnd,
    Blur,
    CollapseButton,
}

/// Why an incoming signal was ignored before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIgnoredReason {
    ButtonNotAllowed,
    NoTouchPoints,
    NoActiveDrag,
    SourceMismatch,
    ButtonStillPressed,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerLogOutcome {
    /// The engine ran the request; the transition may still be a no-op.
    Forwarded,
    Ignored(PointerIgnoredReason),
    Rejected(SplitPaneError),
}

/// Structured record of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerLogEntry {
    pub phase: PointerLifecyclePhase,
    pub boundary: Option<usize>,
    pub position: Option<PointerPosition>,
    pub transition_id: Option<u64>,
    pub outcome: PointerLogOutcome,
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDispatch {
    pub transition: Option<DragTransition>,
    pub log: PointerLogEntry,
}

impl PointerDispatch {
    fn ignored(
        phase: PointerLifecyclePhase,
        reason: PointerIgnoredReason,
        boundary: Option<usize>,
        position: Option<PointerPosition>,
    ) -> Self {
        Self {
            transition: None,
            log: PointerLogEntry {
                phase,
                boundary,
                position,
                transition_id: None,
                outcome: PointerLogOutcome::Ignored(reason),
            },
        }
    }

    fn forwarded(
        phase: PointerLifecyclePhase,
        transition: Option<DragTransition>,
        boundary: Option<usize>,
        position: Option<PointerPosition>,
    ) -> Self {
        Self {
            transition,
            log: PointerLogEntry {
                phase,
                boundary,
                position,
                transition_id: transition.map(|transition| transition.transition_id),
                outcome: PointerLogOutcome::Forwarded,
            },
        }
    }

    /// Whether the signal reached the engine.
    #[must_use]
    pub fn is_forwarded(&self) -> bool {
        matches!(self.log.outcome, PointerLogOutcome::Forwarded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    source: InputSource,
    boundary: usize,
}

/// Pointer lifecycle adapter for one split pane.
#[derive(Debug)]
pub struct PointerAdapter<H: SplitPaneHooks = ()> {
    engine: SplitPaneEngine<H>,
    active: Option<ActiveDrag>,
}

impl<H: SplitPaneHooks> PointerAdapter<H> {
    #[must_use]
    pub fn new(engine: SplitPaneEngine<H>) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SplitPaneEngine<H> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SplitPaneEngine<H> {
        &mut self.engine
    }

    pub fn into_engine(self) -> SplitPaneEngine<H> {
        self.engine
    }

    /// Input source of the live drag, if any.
    #[must_use]
    pub fn active_source(&self) -> Option<InputSource> {
        self.active
            .filter(|_| self.engine.is_dragging())
            .map(|active| active.source)
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.engine.drag_state()
    }

    /// `mousedown` on the divider owned by pane `boundary`.
    pub fn mouse_down(
        &mut self,
        boundary: usize,
        button: PointerButton,
        position: PointerPosition,
    ) -> PointerDispatch {
        if button != PointerButton::Primary {
            return log(PointerDispatch::ignored(
                PointerLifecyclePhase::MouseDown,
                PointerIgnoredReason::ButtonNotAllowed,
                Some(boundary),
                Some(position),
            ));
        }
        self.begin(PointerLifecyclePhase::MouseDown, InputSource::Mouse, boundary, position)
    }

    /// `mousemove` anywhere on the drag surface.
    pub fn mouse_move(&mut self, position: PointerPosition) -> PointerDispatch {
        self.update(PointerLifecyclePhase::MouseMove, InputSource::Mouse, position)
    }

    /// `mouseup` anywhere on the drag surface.
    pub fn mouse_up(&mut self) -> PointerDispatch {
        self.finish(PointerLifecyclePhase::MouseUp, InputSource::Mouse)
    }

    /// `mouseenter` on the drag surface with the event's `buttons` bitmask.
    ///
    /// A live mouse drag with the primary bit cleared lost its `mouseup`
    /// outside the window and is committed here.
    pub fn mouse_enter(&mut self, buttons: u16) -> PointerDispatch {
        let phase = PointerLifecyclePhase::MouseEnter;
        let Some(active) = self.live() else {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::NoActiveDrag,
                None,
                None,
            ));
        };
        if active.source != InputSource::Mouse {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::SourceMismatch,
                Some(active.boundary),
                None,
            ));
        }
        let pressed = buttons & PRIMARY_BUTTON_MASK != 0;
        if pressed {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::ButtonStillPressed,
                Some(active.boundary),
                None,
            ));
        }
        let transition = self.engine.pointer_entered(pressed);
        self.active = None;
        log(PointerDispatch::forwarded(
            phase,
            transition,
            Some(active.boundary),
            None,
        ))
    }

    /// `touchstart` on the divider owned by pane `boundary`. Only the first
    /// touch point is tracked.
    pub fn touch_start(&mut self, boundary: usize, touches: &[PointerPosition]) -> PointerDispatch {
        let Some(first) = touches.first().copied() else {
            return log(PointerDispatch::ignored(
                PointerLifecyclePhase::TouchStart,
                PointerIgnoredReason::NoTouchPoints,
                Some(boundary),
                None,
            ));
        };
        self.begin(PointerLifecyclePhase::TouchStart, InputSource::Touch, boundary, first)
    }

    /// `touchmove` on the drag surface.
    pub fn touch_move(&mut self, touches: &[PointerPosition]) -> PointerDispatch {
        let Some(first) = touches.first().copied() else {
            return log(PointerDispatch::ignored(
                PointerLifecyclePhase::TouchMove,
                PointerIgnoredReason::NoTouchPoints,
                self.live().map(|active| active.boundary),
                None,
            ));
        };
        self.update(PointerLifecyclePhase::TouchMove, InputSource::Touch, first)
    }

    /// `touchend` / `touchcancel` on the drag surface.
    pub fn touch_end(&mut self) -> PointerDispatch {
        self.finish(PointerLifecyclePhase::TouchEnd, InputSource::Touch)
    }

    /// Window lost focus; any live drag is canceled, not committed.
    ///
    /// The in-progress extents are dropped and the committed extents are
    /// restored, so a host that wants a drag to survive focus loss should not
    /// forward `blur` and rely on [`Self::mouse_enter`] to commit it instead.
    pub fn blur(&mut self) -> PointerDispatch {
        let Some(active) = self.live() else {
            return log(PointerDispatch::ignored(
                PointerLifecyclePhase::Blur,
                PointerIgnoredReason::NoActiveDrag,
                None,
                None,
            ));
        };
        self.active = None;
        let transition = self.engine.cancel_drag();
        log(PointerDispatch::forwarded(
            PointerLifecyclePhase::Blur,
            Some(transition),
            Some(active.boundary),
            None,
        ))
    }

    /// Click on the collapse button of pane `pane`.
    pub fn collapse_button(
        &mut self,
        pane: usize,
    ) -> Result<Option<CollapseTransition>, SplitPaneError> {
        let result = self.engine.toggle_collapse(pane);
        if result.is_ok() {
            // Toggling cancels any live drag inside the engine.
            self.active = None;
        }
        debug!(pane, ?result, "collapse button");
        result
    }

    /// Container resized; the measurement is applied once resizing settles.
    pub fn resize(&mut self, measured: Vec<f64>, now: Instant) -> Result<(), SplitPaneError> {
        self.engine.schedule_container_resize(measured, now)
    }

    /// Drive pending timers. Returns whether the committed extents changed.
    pub fn poll(&mut self, now: Instant) -> Result<bool, SplitPaneError> {
        self.engine.poll(now)
    }

    fn begin(
        &mut self,
        phase: PointerLifecyclePhase,
        source: InputSource,
        boundary: usize,
        position: PointerPosition,
    ) -> PointerDispatch {
        match self.engine.begin_drag(boundary, position) {
            Ok(transition) => {
                if !transition.is_noop() {
                    self.active = Some(ActiveDrag { source, boundary });
                }
                log(PointerDispatch::forwarded(
                    phase,
                    Some(transition),
                    Some(boundary),
                    Some(position),
                ))
            }
            Err(error) => log(PointerDispatch {
                transition: None,
                log: PointerLogEntry {
                    phase,
                    boundary: Some(boundary),
                    position: Some(position),
                    transition_id: None,
                    outcome: PointerLogOutcome::Rejected(error),
                },
            }),
        }
    }

    /// Live drag owned by this adapter. Forgets it when the engine ended
    /// the drag on its own, e.g. through `sync_panes` on [`Self::engine_mut`].
    fn live(&mut self) -> Option<ActiveDrag> {
        if !self.engine.is_dragging() {
            self.active = None;
        }
        self.active
    }

    fn update(
        &mut self,
        phase: PointerLifecyclePhase,
        source: InputSource,
        position: PointerPosition,
    ) -> PointerDispatch {
        let Some(active) = self.live() else {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::NoActiveDrag,
                None,
                Some(position),
            ));
        };
        if active.source != source {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::SourceMismatch,
                Some(active.boundary),
                Some(position),
            ));
        }
        self.engine.update_drag(position);
        let transition = self.engine.last_transition().copied();
        log(PointerDispatch::forwarded(
            phase,
            transition,
            Some(active.boundary),
            Some(position),
        ))
    }

    fn finish(&mut self, phase: PointerLifecyclePhase, source: InputSource) -> PointerDispatch {
        let Some(active) = self.live() else {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::NoActiveDrag,
                None,
                None,
            ));
        };
        if active.source != source {
            return log(PointerDispatch::ignored(
                phase,
                PointerIgnoredReason::SourceMismatch,
                Some(active.boundary),
                None,
            ));
        }
        self.active = None;
        self.engine.end_drag();
        let transition = self.engine.last_transition().copied();
        log(PointerDispatch::forwarded(
            phase,
            transition,
            Some(active.boundary),
            None,
        ))
    }
}

fn log(dispatch: PointerDispatch) -> PointerDispatch {
    debug!(
        phase = ?dispatch.log.phase,
        boundary = ?dispatch.log.boundary,
        transition_id = ?dispatch.log.transition_id,
        outcome = ?dispatch.log.outcome,
        "pointer dispatch"
    );
    dispatch
}
