//! Engine configuration.
//!
//! [`EngineConfig`] mirrors the options a host passes when mounting a split
//! pane and deserializes from the camelCase JSON shape hosts already use:
//!
//! ```
//! use splitpane_layout::{EngineConfig, SplitDirection};
//!
//! let config: EngineConfig = serde_json::from_str(
//!     r#"{ "split": "horizontal", "minExtents": [80, 40], "collapseEnabled": true }"#,
//! ).unwrap();
//! assert_eq!(config.split, SplitDirection::Horizontal);
//! assert_eq!(config.min_extent(0), 80.0);
//! assert_eq!(config.collapsed_size, 50.0);
//! ```
//!
//! [`TimingConfig`] holds the debounce windows and can be overridden from the
//! environment.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::{SplitPaneError, check_extent, check_extents};
use crate::model::PersistedLayout;

// ---------------------------------------------------------------------------
// Size defaults
// ---------------------------------------------------------------------------

/// Minimum extent of an expanded pane when none (or a non-positive one) is
/// configured.
pub const DEFAULT_MIN_EXTENT: f64 = 50.0;

/// Extent of a collapsed pane when none is configured.
pub const DEFAULT_COLLAPSED_SIZE: f64 = 50.0;

/// Flex share given to a pane with no declared initial extent.
pub const DEFAULT_INITIAL_EXTENT: f64 = 1.0;

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Which way the container is divided.
///
/// `Vertical` draws vertical dividers: panes sit side by side and the pointer
/// is tracked along x. `Horizontal` stacks panes top to bottom and tracks y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Reading direction of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Side a collapsed pane shrinks toward.
///
/// `Right` and `Down` collapse a pane through the boundary *before* it, which
/// is what the engine calls a reversed collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseDirection {
    Left,
    Right,
    Up,
    Down,
}

impl CollapseDirection {
    /// Whether this direction collapses through the preceding boundary.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }

    /// The forward direction for a split orientation.
    #[must_use]
    pub const fn forward(split: SplitDirection) -> Self {
        match split {
            SplitDirection::Vertical => Self::Left,
            SplitDirection::Horizontal => Self::Up,
        }
    }
}

// ---------------------------------------------------------------------------
// Minimum extents
// ---------------------------------------------------------------------------

/// Per-pane minimum extents: one value for all panes, or one per pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinExtents {
    Uniform(f64),
    PerPane(Vec<f64>),
}

impl MinExtents {
    /// Minimum extent for `index`; missing or non-positive entries fall back
    /// to [`DEFAULT_MIN_EXTENT`].
    #[must_use]
    pub fn resolve(&self, index: usize) -> f64 {
        let value = match self {
            Self::Uniform(value) => Some(*value),
            Self::PerPane(values) => values.get(index).copied(),
        };
        value
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(DEFAULT_MIN_EXTENT)
    }
}

impl Default for MinExtents {
    fn default() -> Self {
        Self::Uniform(DEFAULT_MIN_EXTENT)
    }
}

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------

/// Options recognized when creating an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub split: SplitDirection,
    pub reading_direction: ReadingDirection,
    /// Declared proportions, one per pane. Missing entries default to
    /// [`DEFAULT_INITIAL_EXTENT`].
    pub initial_extents: Option<Vec<f64>>,
    pub min_extents: MinExtents,
    pub collapsed_size: f64,
    pub collapse_enabled: bool,
    pub collapse_reversed: bool,
    /// Collapse tracking sequence: `Some(stored)` marks a pane that starts
    /// collapsed and the extent it expands back to.
    pub initially_collapsed: Option<Vec<Option<f64>>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            split: SplitDirection::default(),
            reading_direction: ReadingDirection::default(),
            initial_extents: None,
            min_extents: MinExtents::default(),
            collapsed_size: DEFAULT_COLLAPSED_SIZE,
            collapse_enabled: false,
            collapse_reversed: false,
            initially_collapsed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_split(mut self, split: SplitDirection) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn with_reading_direction(mut self, direction: ReadingDirection) -> Self {
        self.reading_direction = direction;
        self
    }

    #[must_use]
    pub fn with_initial_extents(mut self, extents: impl Into<Vec<f64>>) -> Self {
        self.initial_extents = Some(extents.into());
        self
    }

    #[must_use]
    pub fn with_min_extents(mut self, min_extents: MinExtents) -> Self {
        self.min_extents = min_extents;
        self
    }

    #[must_use]
    pub fn with_collapsed_size(mut self, size: f64) -> Self {
        self.collapsed_size = size;
        self
    }

    /// Enable or disable collapse toggling.
    #[must_use]
    pub fn with_collapse(mut self, enabled: bool) -> Self {
        self.collapse_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_collapse_reversed(mut self, reversed: bool) -> Self {
        self.collapse_reversed = reversed;
        self
    }

    /// Enable collapse toward `direction`.
    #[must_use]
    pub fn with_collapse_direction(mut self, direction: CollapseDirection) -> Self {
        self.collapse_enabled = true;
        self.collapse_reversed = direction.is_reversed();
        self
    }

    #[must_use]
    pub fn with_initially_collapsed(mut self, collapsed: impl Into<Vec<Option<f64>>>) -> Self {
        self.initially_collapsed = Some(collapsed.into());
        self
    }

    /// Seed extents and collapsed panes from a saved layout.
    ///
    /// The saved shape does not carry pre-collapse extents, so a restored
    /// collapsed pane expands back to its minimum extent.
    #[must_use]
    pub fn with_persisted(mut self, layout: &PersistedLayout) -> Self {
        self.initial_extents = Some(layout.extents.clone());
        if !layout.collapsed_indices.is_empty() {
            self.collapse_enabled = true;
            let mut collapsed = vec![None; layout.extents.len()];
            for &index in &layout.collapsed_indices {
                if let Some(slot) = collapsed.get_mut(index) {
                    *slot = Some(self.min_extents.resolve(index));
                }
            }
            self.initially_collapsed = Some(collapsed);
        }
        self
    }

    /// Whether pointer offsets read left to right. Only vertical splits
    /// follow the document direction; stacked panes always read downward.
    #[must_use]
    pub fn is_ltr(&self) -> bool {
        match self.split {
            SplitDirection::Vertical => self.reading_direction != ReadingDirection::Rtl,
            SplitDirection::Horizontal => true,
        }
    }

    /// Declared initial extent for `index`.
    #[must_use]
    pub fn initial_extent(&self, index: usize) -> f64 {
        self.initial_extents
            .as_ref()
            .and_then(|extents| extents.get(index).copied())
            .unwrap_or(DEFAULT_INITIAL_EXTENT)
    }

    /// Resolved minimum extent for `index` while expanded.
    #[must_use]
    pub fn min_extent(&self, index: usize) -> f64 {
        self.min_extents.resolve(index)
    }

    /// Reject sizes that would poison propagation arithmetic.
    pub fn validate(&self) -> Result<(), SplitPaneError> {
        check_extent("collapsedSize", None, self.collapsed_size)?;
        if let Some(extents) = &self.initial_extents {
            check_extents("initialExtents", extents)?;
        }
        match &self.min_extents {
            MinExtents::Uniform(value) => check_extent("minExtents", None, *value)?,
            MinExtents::PerPane(values) => check_extents("minExtents", values)?,
        }
        if let Some(collapsed) = &self.initially_collapsed {
            for (index, stored) in collapsed.iter().enumerate() {
                if let Some(stored) = stored {
                    check_extent("initiallyCollapsed", Some(index), *stored)?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Default quiescence window before a container resize is applied.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Maximum allowed resize debounce.
pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 1_000;

/// Default delay before a divider shows its hover affordance.
pub const DEFAULT_HOVER_ENTER_MS: u64 = 50;

/// Default delay before a divider drops its hover affordance.
pub const DEFAULT_HOVER_LEAVE_MS: u64 = 100;

/// Maximum allowed value for either hover delay.
pub const MAX_HOVER_DEBOUNCE_MS: u64 = 1_000;

/// Debounce windows for resize recalculation and divider hover feedback.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `SPLITPANE_RESIZE_DEBOUNCE_MS` | u64 | 100 | Resize quiescence window |
/// | `SPLITPANE_HOVER_ENTER_MS` | u64 | 50 | Hover-on delay |
/// | `SPLITPANE_HOVER_LEAVE_MS` | u64 | 100 | Hover-off delay |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub resize_debounce: Duration,
    pub hover_enter_debounce: Duration,
    pub hover_leave_debounce: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
            hover_enter_debounce: Duration::from_millis(DEFAULT_HOVER_ENTER_MS),
            hover_leave_debounce: Duration::from_millis(DEFAULT_HOVER_LEAVE_MS),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }

    #[must_use]
    pub fn with_hover_debounce(mut self, enter: Duration, leave: Duration) -> Self {
        self.hover_enter_debounce = enter;
        self.hover_leave_debounce = leave;
        self
    }

    /// Load timing from environment variables. Unparseable values are
    /// ignored; parsed ones are clamped by [`Self::validated`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = env_millis("SPLITPANE_RESIZE_DEBOUNCE_MS") {
            config.resize_debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = env_millis("SPLITPANE_HOVER_ENTER_MS") {
            config.hover_enter_debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = env_millis("SPLITPANE_HOVER_LEAVE_MS") {
            config.hover_leave_debounce = Duration::from_millis(ms);
        }

        config.validated()
    }

    /// Clamp every window to its allowed range.
    ///
    /// ```
    /// use splitpane_layout::TimingConfig;
    /// use std::time::Duration;
    ///
    /// let timing = TimingConfig::default()
    ///     .with_resize_debounce(Duration::from_secs(10))
    ///     .validated();
    /// assert_eq!(timing.resize_debounce.as_millis(), 1_000);
    /// ```
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.resize_debounce = clamp_window(self.resize_debounce, MAX_RESIZE_DEBOUNCE_MS);
        self.hover_enter_debounce = clamp_window(self.hover_enter_debounce, MAX_HOVER_DEBOUNCE_MS);
        self.hover_leave_debounce = clamp_window(self.hover_leave_debounce, MAX_HOVER_DEBOUNCE_MS);
        self
    }

    /// Check if every window is within its allowed range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.resize_debounce.as_millis() <= u128::from(MAX_RESIZE_DEBOUNCE_MS)
            && self.hover_enter_debounce.as_millis() <= u128::from(MAX_HOVER_DEBOUNCE_MS)
            && self.hover_leave_debounce.as_millis() <= u128::from(MAX_HOVER_DEBOUNCE_MS)
    }
}

fn env_millis(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse::<u64>().ok()
}

fn clamp_window(window: Duration, max_ms: u64) -> Duration {
    let ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(ms.min(max_ms))
}
