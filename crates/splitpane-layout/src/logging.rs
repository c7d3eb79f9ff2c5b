//! Logging macros.
//!
//! With the `tracing` feature these are the `tracing` macros; without it they
//! compile to nothing so the engine stays dependency-free for hosts that do
//! not want a subscriber.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, trace, warn};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, trace, warn};
