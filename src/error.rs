use std::fmt;

/// Faults raised by the selection state machine itself.
///
/// These are programming-bug conditions: they should never occur through
/// the public `SelectionService`/`TreeModel` surface, which only ever
/// constructs well-formed gestures. They exist so that a malformed
/// `SelectionState` (e.g. assembled by hand in a test, or by a future
/// caller who bypasses the service) fails loudly instead of producing a
/// silently wrong projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A gesture kind was encountered that the transition function does
    /// not know how to apply, or a `Default` gesture survived stack
    /// normalization.
    InvalidGesture(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidGesture(msg) => write!(f, "invalid gesture: {msg}"),
        }
    }
}

impl std::error::Error for SelectionError {}
