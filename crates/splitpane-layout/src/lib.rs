#![forbid(unsafe_code)]

//! Sizing engine for resizable split panes.
//!
//! # Role in splitpane
//! `splitpane-layout` owns the size model of one split pane: an ordered
//! sequence of pane extents along the split axis, their minimums, and which
//! panes are collapsed. Hosts feed it pointer, toggle, and resize events and
//! read extents back; it never touches a DOM, a window, or a clock.
//!
//! # Primary responsibilities
//! - **Constraint propagation**: moving a boundary pushes neighbors down to
//!   their minimums and no further ([`propagate`], [`move_boundary`]).
//! - **Collapse**: per-pane collapse/expand with stored extents
//!   ([`reconcile_collapsed`]).
//! - **Drag**: a single-session state machine with telemetry transitions
//!   ([`DragController`]).
//! - **Rescale**: proportional recalculation when the container changes
//!   size ([`recalculate`]).
//! - **Engine**: [`SplitPaneEngine`] ties these together behind one handle.

pub mod collapse;
pub mod config;
pub mod debounce;
pub mod drag;
pub mod engine;
pub mod error;
pub mod hooks;
mod logging;
pub mod model;
pub mod propagate;
pub mod rescale;

pub use collapse::{
    CollapseTransition, collapse_boundary, collapse_pane, expand_pane, reconcile_collapsed,
};
pub use config::{
    CollapseDirection, DEFAULT_COLLAPSED_SIZE, DEFAULT_INITIAL_EXTENT, DEFAULT_MIN_EXTENT,
    EngineConfig, MinExtents, ReadingDirection, SplitDirection, TimingConfig,
};
pub use debounce::Debouncer;
pub use drag::{
    DragController, DragEffect, DragNoopReason, DragSession, DragState, DragTransition,
    PointerPosition,
};
pub use engine::SplitPaneEngine;
pub use error::SplitPaneError;
pub use hooks::{HookEvent, RecordedHooks, SplitPaneHooks};
pub use model::{
    EXTENT_EPSILON, PaneCollapseState, PaneSlot, PersistedLayout, SizeModel, default_pane_key,
    extents_differ, sum_extents,
};
pub use propagate::{
    PropagationBounds, adjust_offset, move_boundary, propagate, propagate_collapsed_siblings,
};
pub use rescale::{apply_collapsed_overrides, enforce_minimums, fit_total, recalculate};
