//! Drag lifecycle.
//!
//! ```text
//! Idle --begin--> Dragging --finish/cancel--> Idle
//! ```
//!
//! [`DragController`] only tracks the session: which boundary is held, where
//! the pointer started and where it is now. Turning the cumulative offset
//! into candidate extents is the engine's job, which always starts from the
//! last committed extents so the result depends only on the latest pointer
//! position, never on how many updates arrived in between.
//!
//! Every call returns a [`DragTransition`] with a monotonically increasing
//! `transition_id`, including the ones that change nothing.

use serde::{Deserialize, Serialize};

use crate::config::SplitDirection;

/// Pointer coordinates in host space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along the split axis: x for side-by-side panes, y for
    /// stacked panes.
    #[must_use]
    pub const fn along(self, split: SplitDirection) -> f64 {
        match split {
            SplitDirection::Vertical => self.x,
            SplitDirection::Horizontal => self.y,
        }
    }
}

/// One live drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Storage boundary being moved, already adjusted for reversed collapse.
    pub boundary: usize,
    /// Axis coordinate at gesture start.
    pub anchor: f64,
    /// Latest axis coordinate.
    pub current: f64,
}

impl DragSession {
    /// Cumulative pointer travel since the gesture started, before any
    /// reading-direction adjustment.
    #[must_use]
    pub fn raw_offset(&self) -> f64 {
        self.current - self.anchor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why a drag request was accepted without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    /// Fewer than two panes; nothing can be resized.
    PassThrough,
    /// The pane at the requested boundary is collapsed.
    PaneCollapsed,
    /// A session is already open.
    DragAlreadyActive,
    /// Update, finish, or cancel without a session.
    NoActiveDrag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        boundary: usize,
        anchor: f64,
    },
    Updated {
        boundary: usize,
        raw_offset: f64,
    },
    Committed {
        boundary: usize,
        raw_offset: f64,
    },
    Canceled {
        boundary: usize,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One drag lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

impl DragTransition {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// Single-session drag state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    state: DragState,
    transition_counter: u64,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Open a session on `boundary` anchored at `anchor`.
    pub fn begin(&mut self, boundary: usize, anchor: f64) -> DragTransition {
        if self.is_dragging() {
            return self.noop(DragNoopReason::DragAlreadyActive);
        }
        let to = DragState::Dragging(DragSession {
            boundary,
            anchor,
            current: anchor,
        });
        self.step(to, DragEffect::Started { boundary, anchor })
    }

    /// Record the latest pointer coordinate.
    pub fn move_to(&mut self, position: f64) -> DragTransition {
        let Some(mut session) = self.session() else {
            return self.noop(DragNoopReason::NoActiveDrag);
        };
        session.current = position;
        self.step(
            DragState::Dragging(session),
            DragEffect::Updated {
                boundary: session.boundary,
                raw_offset: session.raw_offset(),
            },
        )
    }

    /// Close the session, keeping its result.
    pub fn finish(&mut self) -> DragTransition {
        let Some(session) = self.session() else {
            return self.noop(DragNoopReason::NoActiveDrag);
        };
        self.step(
            DragState::Idle,
            DragEffect::Committed {
                boundary: session.boundary,
                raw_offset: session.raw_offset(),
            },
        )
    }

    /// Close the session, discarding its result.
    pub fn cancel(&mut self) -> DragTransition {
        let Some(session) = self.session() else {
            return self.noop(DragNoopReason::NoActiveDrag);
        };
        self.step(
            DragState::Idle,
            DragEffect::Canceled {
                boundary: session.boundary,
            },
        )
    }

    /// Record a request that was accepted but changed nothing.
    pub fn noop(&mut self, reason: DragNoopReason) -> DragTransition {
        self.step(self.state, DragEffect::Noop { reason })
    }

    fn step(&mut self, to: DragState, effect: DragEffect) -> DragTransition {
        let from = self.state;
        self.state = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }
}
