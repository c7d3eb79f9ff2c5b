#![forbid(unsafe_code)]

//! Resizable split panes.
//!
//! This crate is the stable surface for hosts. It re-exports the sizing
//! engine from `splitpane-layout`, the browser adapters from
//! `splitpane-web`, and adds the host-facing [`Error`] with its
//! [`DegradationAction`] mapping.
//!
//! ```
//! use splitpane::prelude::*;
//!
//! let config = EngineConfig::default().with_initial_extents(vec![1.0, 1.0]);
//! let mut engine = SplitPaneEngine::new(2, config);
//! engine.mount(&[200.0, 200.0])?;
//!
//! engine.begin_drag(0, PointerPosition::new(200.0, 0.0))?;
//! engine.update_drag(PointerPosition::new(260.0, 0.0));
//! assert_eq!(engine.end_drag(), &[260.0, 140.0]);
//! # Ok::<(), splitpane::Error>(())
//! ```

pub mod error;

pub use error::{DegradationAction, Error, Result};

// --- Engine re-exports -----------------------------------------------------

pub use splitpane_layout::{
    CollapseDirection, CollapseTransition, DragEffect, DragNoopReason, DragSession, DragState,
    DragTransition, EngineConfig, HookEvent, MinExtents, PaneCollapseState, PaneSlot,
    PersistedLayout, PointerPosition, ReadingDirection, RecordedHooks, SplitDirection,
    SplitPaneEngine, SplitPaneError, SplitPaneHooks, TimingConfig,
};

// --- Adapter re-exports ----------------------------------------------------

pub use splitpane_web::{
    DividerHover, InputSource, PRIMARY_BUTTON_MASK, PointerAdapter, PointerButton,
    PointerDispatch, PointerIgnoredReason, PointerLifecyclePhase, PointerLogEntry,
    PointerLogOutcome,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CollapseDirection, DegradationAction, DividerHover, EngineConfig, Error, PointerAdapter,
        PointerButton, PointerPosition, Result, SplitDirection, SplitPaneEngine, SplitPaneHooks,
        TimingConfig,
    };

    pub use crate::{layout, web};
}

pub use splitpane_layout as layout;
pub use splitpane_web as web;
