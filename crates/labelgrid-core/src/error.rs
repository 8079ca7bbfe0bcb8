//! Errors reported by editor commands.

use crate::label::LabelId;
use thiserror::Error;

/// Recoverable command failures.
///
/// Every variant is reported back to the user; none of them ends the
/// session. Commands check their preconditions before touching the model,
/// so a returned error means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("No label is selected")]
    NoSelection,
    #[error("No element is selected")]
    NoElementSelected,
    #[error("Nothing has been copied yet")]
    EmptyClipboard,
    #[error("Mark at least two labels first ({selected} marked)")]
    InsufficientSelection { selected: usize },
    #[error("No other labels are marked")]
    NoOtherTargets,
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Unknown label: {0}")]
    UnknownLabel(LabelId),
    #[error("Unsupported image format")]
    UnsupportedImage,
    #[error("No element ids left to allocate")]
    IdSpaceExhausted,
}

/// Result type for editor commands.
pub type EditorResult<T> = Result<T, EditorError>;
