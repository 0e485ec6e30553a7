//! Intervals over an ordered domain.
//!
//! A [`Range`] is a pair of [`Bound`]s. Each side is independently
//! inclusive, exclusive or unbounded, so `[1, 5)`, `(-∞, 3]` and
//! `(2, +∞)` are all ranges.
//!
//! Ranges are validated once, at construction: a lower bound above the
//! upper bound is rejected with [`SetError::InvertedBounds`]. Equal bounds
//! with at least one exclusive side are accepted and produce an empty
//! range.
//!
//! # Examples
//!
//! ```rust
//! use setview::sets::Range;
//!
//! let whole = Range::closed(1, 10).unwrap();
//! let middle = Range::closed(5, 7).unwrap();
//!
//! let pieces = whole.subtract(&middle);
//! assert_eq!(pieces.len(), 2);
//! assert_eq!(pieces[0], Range::closed_open(1, 5).unwrap());
//! assert_eq!(pieces[1], Range::open_closed(7, 10).unwrap());
//! ```

use std::cmp::Ordering;
use std::ops::Bound;

use smallvec::SmallVec;

use super::SetError;

/// Up to two disjoint ranges, ordered from left to right.
pub type RangePieces<T> = SmallVec<[Range<T>; 2]>;

/// An interval over a totally ordered domain.
///
/// # Examples
///
/// ```rust
/// use setview::sets::Range;
///
/// let range = Range::new(1, true, 5, false).unwrap();
/// assert!(range.contains(&1));
/// assert!(range.contains(&4));
/// assert!(!range.contains(&5));
///
/// assert!(Range::new(7, false, 7, false).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Range<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

impl<T: Ord> Range<T> {
    /// Creates a range from two finite bounds with explicit inclusivity.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if `min > max`.
    pub fn new(min: T, min_inclusive: bool, max: T, max_inclusive: bool) -> Result<Self, SetError> {
        let lower = if min_inclusive {
            Bound::Included(min)
        } else {
            Bound::Excluded(min)
        };
        let upper = if max_inclusive {
            Bound::Included(max)
        } else {
            Bound::Excluded(max)
        };
        Self::from_bounds(lower, upper)
    }

    /// Creates a range from arbitrary bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if both bounds are finite and the
    /// lower value is greater than the upper value.
    pub fn from_bounds(lower: Bound<T>, upper: Bound<T>) -> Result<Self, SetError> {
        if let (
            Bound::Included(min) | Bound::Excluded(min),
            Bound::Included(max) | Bound::Excluded(max),
        ) = (&lower, &upper)
            && min > max
        {
            return Err(SetError::InvertedBounds);
        }
        Ok(Self { lower, upper })
    }

    /// `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if `min > max`.
    pub fn closed(min: T, max: T) -> Result<Self, SetError> {
        Self::new(min, true, max, true)
    }

    /// `(min, max)`
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if `min > max`.
    pub fn open(min: T, max: T) -> Result<Self, SetError> {
        Self::new(min, false, max, false)
    }

    /// `[min, max)`
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if `min > max`.
    pub fn closed_open(min: T, max: T) -> Result<Self, SetError> {
        Self::new(min, true, max, false)
    }

    /// `(min, max]`
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvertedBounds`] if `min > max`.
    pub fn open_closed(min: T, max: T) -> Result<Self, SetError> {
        Self::new(min, false, max, true)
    }

    /// `[min, +∞)`
    #[must_use]
    pub const fn at_least(min: T) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Unbounded,
        }
    }

    /// `(min, +∞)`
    #[must_use]
    pub const fn greater_than(min: T) -> Self {
        Self {
            lower: Bound::Excluded(min),
            upper: Bound::Unbounded,
        }
    }

    /// `(-∞, max]`
    #[must_use]
    pub const fn at_most(max: T) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Included(max),
        }
    }

    /// `(-∞, max)`
    #[must_use]
    pub const fn less_than(max: T) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(max),
        }
    }

    /// `(-∞, +∞)`
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lower(&self) -> Bound<&T> {
        self.lower.as_ref()
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn upper(&self) -> Bound<&T> {
        self.upper.as_ref()
    }

    /// Returns `true` if `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        let above_lower = match &self.lower {
            Bound::Included(min) => min <= value,
            Bound::Excluded(min) => min < value,
            Bound::Unbounded => true,
        };
        let below_upper = match &self.upper {
            Bound::Included(max) => value <= max,
            Bound::Excluded(max) => value < max,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }

    /// Returns `true` if no value can lie within the range.
    ///
    /// This is the case when both bounds meet at the same point and at least
    /// one side excludes it, e.g. `(7, 7)` or `[7, 7)`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_empty_pair(self.lower(), self.upper())
    }

    /// Returns `true` if neither side is bounded.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!((&self.lower, &self.upper), (Bound::Unbounded, Bound::Unbounded))
    }
}

impl<T: Ord + Clone> Range<T> {
    /// Returns the overlap of both ranges, or `None` if they share no point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::sets::Range;
    ///
    /// let left = Range::closed(1, 5).unwrap();
    /// let right = Range::open(3, 8).unwrap();
    /// assert_eq!(left.intersection(&right), Some(Range::open_closed(3, 5).unwrap()));
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lower = if compare_lower(self.lower(), other.lower()) == Ordering::Less {
            other.lower()
        } else {
            self.lower()
        };
        let upper = if compare_upper(self.upper(), other.upper()) == Ordering::Greater {
            other.upper()
        } else {
            self.upper()
        };

        if is_empty_pair(lower, upper) {
            None
        } else {
            Some(Self {
                lower: lower.cloned(),
                upper: upper.cloned(),
            })
        }
    }

    /// Returns the hull of both ranges if they overlap or touch without a gap.
    ///
    /// `[1, 5)` and `[5, 9]` touch at 5 and merge into `[1, 9]`; `[1, 5)` and
    /// `(5, 9]` leave 5 uncovered and return `None`.
    #[must_use]
    pub fn union_contiguous(&self, other: &Self) -> Option<Self> {
        if self.is_empty() {
            return Some(other.clone());
        }
        if other.is_empty() {
            return Some(self.clone());
        }

        let (first, second) = if compare_lower(self.lower(), other.lower()) == Ordering::Greater {
            (other, self)
        } else {
            (self, other)
        };

        let has_gap = match (first.upper(), second.lower()) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
            (Bound::Excluded(end), Bound::Excluded(start)) => end <= start,
            (
                Bound::Included(end) | Bound::Excluded(end),
                Bound::Included(start) | Bound::Excluded(start),
            ) => end < start,
        };
        if has_gap {
            return None;
        }

        let upper = if compare_upper(first.upper(), second.upper()) == Ordering::Less {
            second.upper()
        } else {
            first.upper()
        };
        Some(Self {
            lower: first.lower.clone(),
            upper: upper.cloned(),
        })
    }

    /// Returns the parts of the domain outside this range, left to right.
    ///
    /// The complement of an empty range is the unbounded range; the
    /// complement of the unbounded range is empty.
    #[must_use]
    pub fn complement(&self) -> RangePieces<T> {
        let mut pieces = RangePieces::new();
        if self.is_empty() {
            pieces.push(Self::unbounded());
            return pieces;
        }
        match &self.lower {
            Bound::Included(min) => pieces.push(Self::less_than(min.clone())),
            Bound::Excluded(min) => pieces.push(Self::at_most(min.clone())),
            Bound::Unbounded => {}
        }
        match &self.upper {
            Bound::Included(max) => pieces.push(Self::greater_than(max.clone())),
            Bound::Excluded(max) => pieces.push(Self::at_least(max.clone())),
            Bound::Unbounded => {}
        }
        pieces
    }

    /// Removes `other` from this range.
    ///
    /// Returns zero, one or two disjoint ranges ordered left to right:
    ///
    /// - no overlap: this range unchanged;
    /// - `other` covers this range: nothing;
    /// - `other` cuts the interior: the left and right remainders, each
    ///   with the inclusivity flipped at the cut;
    /// - `other` overlaps one end: the trimmed remainder.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> RangePieces<T> {
        if self.is_empty() {
            return RangePieces::new();
        }
        if self.intersection(other).is_none() {
            let mut pieces = RangePieces::new();
            pieces.push(self.clone());
            return pieces;
        }
        other
            .complement()
            .iter()
            .filter_map(|outside| self.intersection(outside))
            .collect()
    }
}

/// Orders two lower bounds by where they start; `[5` starts before `(5`.
fn compare_lower<T: Ord>(left: Bound<&T>, right: Bound<&T>) -> Ordering {
    match (left, right) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(left), Bound::Included(right))
        | (Bound::Excluded(left), Bound::Excluded(right)) => left.cmp(right),
        (Bound::Included(left), Bound::Excluded(right)) => left.cmp(right).then(Ordering::Less),
        (Bound::Excluded(left), Bound::Included(right)) => left.cmp(right).then(Ordering::Greater),
    }
}

/// Orders two upper bounds by where they end; `5)` ends before `5]`.
fn compare_upper<T: Ord>(left: Bound<&T>, right: Bound<&T>) -> Ordering {
    match (left, right) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Greater,
        (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(left), Bound::Included(right))
        | (Bound::Excluded(left), Bound::Excluded(right)) => left.cmp(right),
        (Bound::Included(left), Bound::Excluded(right)) => left.cmp(right).then(Ordering::Greater),
        (Bound::Excluded(left), Bound::Included(right)) => left.cmp(right).then(Ordering::Less),
    }
}

fn is_empty_pair<T: Ord>(lower: Bound<&T>, upper: Bound<&T>) -> bool {
    match (lower, upper) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
        (Bound::Included(min), Bound::Included(max)) => min > max,
        (
            Bound::Included(min) | Bound::Excluded(min),
            Bound::Included(max) | Bound::Excluded(max),
        ) => min >= max,
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Range<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lower {
            Bound::Included(min) => write!(formatter, "[{min}")?,
            Bound::Excluded(min) => write!(formatter, "({min}")?,
            Bound::Unbounded => formatter.write_str("(-∞")?,
        }
        formatter.write_str(", ")?;
        match &self.upper {
            Bound::Included(max) => write!(formatter, "{max}]"),
            Bound::Excluded(max) => write!(formatter, "{max})"),
            Bound::Unbounded => formatter.write_str("+∞)"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRange<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Range<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRange::<T>::deserialize(deserializer)?;
        Self::from_bounds(raw.lower, raw.upper).map_err(serde::de::Error::custom)
    }
}
