//! Logging macros; no-ops unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
pub(crate) use tracing::debug;

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    pub(crate) use debug;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::debug;
