//! Error types for alignment operations.

use thiserror::Error;

use crate::host::ElementId;

/// Alignment errors.
///
/// None of these escape the drag notification API: `NotTracked` is a
/// precondition violation against the tracker, the others are recovered
/// locally by skipping the affected work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlignError {
    /// An element was queried that was never tracked.
    #[error("element {0} is not tracked")]
    NotTracked(ElementId),
    /// A recalculation pass ran without a valid rectangle for the active element.
    #[error("active element has no tracked rectangle")]
    UntrackedActiveElement,
    /// No container could be resolved for guide attachment.
    #[error("no container could be resolved for guide attachment")]
    UnresolvableContainer,
}

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;
