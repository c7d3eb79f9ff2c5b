//! Errors reported at the engine boundary.
//!
//! Propagation itself is total: clamping is the designed behavior, not a
//! failure. These errors only cover invalid indices, malformed caller input,
//! and operations the current configuration does not support.

use std::fmt;

/// Errors returned by [`crate::SplitPaneEngine`] operations and config
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitPaneError {
    /// The engine holds fewer than two panes and runs in pass-through mode.
    TooFewPanes {
        count: usize,
    },
    /// A divider index does not name a draggable boundary.
    BoundaryOutOfRange {
        boundary: usize,
        boundaries: usize,
    },
    /// A pane index is past the end of the sequence.
    PaneOutOfRange {
        index: usize,
        panes: usize,
    },
    /// The pane has no boundary to collapse through in the configured
    /// collapse direction.
    PaneNotCollapsible {
        index: usize,
        reversed: bool,
    },
    /// Collapse was requested but the engine was configured without it.
    CollapseDisabled,
    /// An auxiliary sequence does not match the pane count.
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A size value is negative, NaN, or infinite.
    InvalidExtent {
        what: &'static str,
        index: Option<usize>,
        value: f64,
    },
}

impl fmt::Display for SplitPaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPanes { count } => write!(
                f,
                "split pane needs at least 2 panes (got {count}); resizing is disabled"
            ),
            Self::BoundaryOutOfRange {
                boundary,
                boundaries,
            } => write!(
                f,
                "boundary {boundary} out of range ({boundaries} draggable boundaries)"
            ),
            Self::PaneOutOfRange { index, panes } => {
                write!(f, "pane {index} out of range ({panes} panes)")
            }
            Self::PaneNotCollapsible { index, reversed } => {
                let side = if *reversed { "before" } else { "after" };
                write!(f, "pane {index} has no boundary {side} it to collapse through")
            }
            Self::CollapseDisabled => write!(f, "collapse is not enabled for this split pane"),
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what}: expected {expected} entries, got {actual}"),
            Self::InvalidExtent { what, index, value } => match index {
                Some(index) => write!(f, "{what}[{index}] = {value} is not a valid size"),
                None => write!(f, "{what} = {value} is not a valid size"),
            },
        }
    }
}

impl std::error::Error for SplitPaneError {}

/// Check that a size is finite and non-negative.
pub(crate) fn check_extent(
    what: &'static str,
    index: Option<usize>,
    value: f64,
) -> Result<(), SplitPaneError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SplitPaneError::InvalidExtent { what, index, value })
    }
}

/// Check a whole sequence of sizes, reporting the first bad entry.
pub(crate) fn check_extents(what: &'static str, values: &[f64]) -> Result<(), SplitPaneError> {
    values
        .iter()
        .enumerate()
        .try_for_each(|(index, value)| check_extent(what, Some(index), *value))
}
