#![forbid(unsafe_code)]

//! Browser-facing adapters for `splitpane-layout`.
//!
//! The host (JS glue, a wasm binding, or a test) forwards DOM events and a
//! monotonic timestamp; this crate maps them onto a [`SplitPaneEngine`]:
//! - [`PointerAdapter`] handles mouse and touch drag lifecycles, the
//!   collapse button, and debounced container resizes.
//! - [`DividerHover`] debounces divider highlight on enter and leave.
//!
//! Nothing here reads a clock or touches the DOM directly.
//!
//! [`SplitPaneEngine`]: splitpane_layout::SplitPaneEngine

pub mod hover;
mod logging;
pub mod pointer;

pub use hover::DividerHover;
pub use pointer::{
    InputSource, PRIMARY_BUTTON_MASK, PointerAdapter, PointerButton, PointerDispatch,
    PointerIgnoredReason, PointerLifecyclePhase, PointerLogEntry, PointerLogOutcome,
};
