//! Error types for observable lists and transformed views.
//!
//! All of these are local, synchronous failures reported to the caller of
//! the offending operation. Nothing in this module retries or recovers.

use super::ChangeAction;

/// Represents an error raised by an observable list or a transformed view.
///
/// # Examples
///
/// ```rust
/// use setview::views::CollectionError;
///
/// let error = CollectionError::IndexOutOfRange { index: 5, len: 2 };
/// assert_eq!(format!("{error}"), "index 5 is out of range for length 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionError {
    /// An index lay outside the valid range.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the collection at the time of the request.
        len: usize,
    },
    /// A positional write was attempted on a derived view.
    UnsupportedMutation {
        /// The name of the rejected operation.
        operation: &'static str,
    },
    /// A view received a change notification it cannot derive from.
    UnsupportedAction {
        /// The action of the rejected notification.
        action: ChangeAction,
    },
    /// A subscriber was notified again while still handling a notification.
    ReentrantNotification,
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(formatter, "index {index} is out of range for length {len}")
            }
            Self::UnsupportedMutation { operation } => {
                write!(
                    formatter,
                    "{operation} is not supported on a derived view; mutate the source instead"
                )
            }
            Self::UnsupportedAction { action } => {
                write!(formatter, "change action {action} is not supported by derived views")
            }
            Self::ReentrantNotification => {
                formatter.write_str("subscriber re-entered while handling a notification")
            }
        }
    }
}

impl std::error::Error for CollectionError {}
