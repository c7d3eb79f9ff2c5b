//! Host-facing error model and graceful degradation.
//!
//! Every error maps to a [`DegradationAction`] so a host can keep rendering
//! a usable layout instead of tearing the pane down.

use std::fmt;

use splitpane_layout::SplitPaneError;

/// Top-level error type for splitpane hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Engine rejected an operation or a configuration.
    Layout(SplitPaneError),
}

/// Standard result type for splitpane APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the host should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Render the children without dividers or sizing.
    PassThrough,
    /// Drop the offending input event and keep going.
    IgnoreInput,
    /// Keep rendering the last committed extents.
    KeepLastLayout,
}

impl Error {
    /// Determine the graceful degradation action for this error.
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Layout(SplitPaneError::TooFewPanes { .. }) => DegradationAction::PassThrough,
            Self::Layout(
                SplitPaneError::BoundaryOutOfRange { .. }
                | SplitPaneError::PaneOutOfRange { .. }
                | SplitPaneError::PaneNotCollapsible { .. }
                | SplitPaneError::CollapseDisabled,
            ) => DegradationAction::IgnoreInput,
            Self::Layout(
                SplitPaneError::LengthMismatch { .. } | SplitPaneError::InvalidExtent { .. },
            ) => DegradationAction::KeepLastLayout,
        }
    }

    /// Error type label for metrics and tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Layout(err) => match err {
                SplitPaneError::TooFewPanes { .. } => "too_few_panes",
                SplitPaneError::BoundaryOutOfRange { .. } => "boundary_out_of_range",
                SplitPaneError::PaneOutOfRange { .. } => "pane_out_of_range",
                SplitPaneError::PaneNotCollapsible { .. } => "pane_not_collapsible",
                SplitPaneError::CollapseDisabled => "collapse_disabled",
                SplitPaneError::LengthMismatch { .. } => "length_mismatch",
                SplitPaneError::InvalidExtent { .. } => "invalid_extent",
            },
        }
    }

    /// Whether the error came from caller input rather than configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(self.degradation(), DegradationAction::IgnoreInput)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<SplitPaneError> for Error {
    fn from(err: SplitPaneError) -> Self {
        Self::Layout(err)
    }
}

impl fmt::Display for DegradationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass_through"),
            Self::IgnoreInput => write!(f, "ignore_input"),
            Self::KeepLastLayout => write!(f, "keep_last_layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn too_few_panes_passes_through() {
        let err = Error::from(SplitPaneError::TooFewPanes { count: 1 });
        assert_eq!(err.degradation(), DegradationAction::PassThrough);
        assert_eq!(err.error_type(), "too_few_panes");
        assert!(!err.is_input_error());
    }

    #[test]
    fn bad_indices_drop_the_input() {
        for err in [
            SplitPaneError::BoundaryOutOfRange {
                boundary: 4,
                boundaries: 2,
            },
            SplitPaneError::PaneOutOfRange { index: 9, panes: 3 },
            SplitPaneError::PaneNotCollapsible {
                index: 2,
                reversed: false,
            },
            SplitPaneError::CollapseDisabled,
        ] {
            let err = Error::from(err);
            assert_eq!(err.degradation(), DegradationAction::IgnoreInput, "{err}");
            assert!(err.is_input_error());
        }
    }

    #[test]
    fn malformed_measurements_keep_last_layout() {
        let err = Error::from(SplitPaneError::LengthMismatch {
            what: "measuredExtents",
            expected: 3,
            actual: 2,
        });
        assert_eq!(err.degradation(), DegradationAction::KeepLastLayout);
        assert_eq!(err.error_type(), "length_mismatch");

        let err = Error::from(SplitPaneError::InvalidExtent {
            what: "measuredExtents",
            index: Some(1),
            value: f64::NAN,
        });
        assert_eq!(err.degradation(), DegradationAction::KeepLastLayout);
    }

    #[test]
    fn display_and_source_wrap_the_layout_error() {
        let inner = SplitPaneError::CollapseDisabled;
        let err = Error::from(inner.clone());
        assert_eq!(format!("{err}"), format!("layout: {inner}"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn degradation_action_display() {
        assert_eq!(DegradationAction::PassThrough.to_string(), "pass_through");
        assert_eq!(DegradationAction::IgnoreInput.to_string(), "ignore_input");
        assert_eq!(
            DegradationAction::KeepLastLayout.to_string(),
            "keep_last_layout"
        );
    }

    #[test]
    fn question_mark_converts_engine_errors() {
        fn collapse_last() -> Result<()> {
            let config = splitpane_layout::EngineConfig::default().with_collapse(true);
            let mut engine = splitpane_layout::SplitPaneEngine::new(2, config);
            engine.toggle_collapse(1)?;
            Ok(())
        }
        let err = collapse_last().expect_err("last pane cannot collapse forward");
        assert_eq!(err.degradation(), DegradationAction::IgnoreInput);
    }
}
