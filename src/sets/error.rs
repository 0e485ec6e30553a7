//! Error types for the set algebra.
//!
//! Set operators never fail: every combination of valid sets produces a
//! valid set. The only failure mode is rejecting invalid input at
//! construction time, before any operator runs.

/// Represents an error raised while constructing a set or range.
///
/// # Examples
///
/// ```rust
/// use setview::sets::{Range, SetError};
///
/// let error = Range::closed(10, 1).unwrap_err();
/// assert_eq!(error, SetError::InvertedBounds);
/// assert_eq!(
///     format!("{error}"),
///     "range lower bound lies above its upper bound"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetError {
    /// The lower bound of a range was greater than its upper bound.
    InvertedBounds,
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedBounds => {
                formatter.write_str("range lower bound lies above its upper bound")
            }
        }
    }
}

impl std::error::Error for SetError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_inverted_bounds_display() {
        assert_eq!(
            format!("{}", SetError::InvertedBounds),
            "range lower bound lies above its upper bound"
        );
    }

    #[rstest]
    fn test_set_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SetError::InvertedBounds);
    }
}
