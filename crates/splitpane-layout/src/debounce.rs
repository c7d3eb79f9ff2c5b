//! Restartable single-shot timer.
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling again before
//! the window elapses replaces the value and restarts the window, so a burst
//! of events collapses into the last one. Time is always supplied by the
//! caller; nothing here reads a clock.
//!
//! ```
//! use splitpane_layout::Debouncer;
//! use web_time::{Duration, Instant};
//!
//! let mut resize = Debouncer::new(Duration::from_millis(100));
//! let t0 = Instant::now();
//! resize.schedule(vec![300.0, 300.0], t0);
//! resize.schedule(vec![320.0, 300.0], t0 + Duration::from_millis(60));
//!
//! assert_eq!(resize.poll(t0 + Duration::from_millis(120)), None);
//! assert_eq!(
//!     resize.poll(t0 + Duration::from_millis(160)),
//!     Some(vec![320.0, 300.0])
//! );
//! assert!(!resize.is_pending());
//! ```

use web_time::{Duration, Instant};

/// Latest-wins delayed value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Change the window. A pending value keeps its original schedule time.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Arm the timer with `value`, replacing anything already pending.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now, value));
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|(scheduled, _)| *scheduled + self.window)
    }

    /// Take the pending value once its window has fully elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (scheduled, _) = self.pending.as_ref()?;
        if now.saturating_duration_since(*scheduled) < self.window {
            return None;
        }
        self.cancel()
    }
}
