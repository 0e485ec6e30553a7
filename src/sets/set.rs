//! The set sum type and its membership test.
//!
//! [`Set`] is a closed family of representations over an ordered element
//! type. Five variants have compact closed forms; the sixth,
//! [`Set::Composite`], is the fallback produced by operators when no closed
//! form exists for a pair of operands and answers membership by composing
//! the `contains` of its parts.
//!
//! The operators themselves live in the `operators` module; this module
//! defines the data, the constructors and `contains`.

use super::{ElementList, Range};

/// The variant tag of a [`Set`].
///
/// Operator dispatch is keyed by `(SetKind, SetKind, SetOperator)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetKind {
    /// Contains nothing.
    Empty,
    /// Contains everything.
    Complete,
    /// Contains exactly the listed elements.
    Inclusive,
    /// Contains everything except the listed elements.
    Exclusive,
    /// Contains everything within a range.
    RangeInclusive,
    /// Boolean composition of other sets.
    Composite,
}

impl std::fmt::Display for SetKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Complete => "complete",
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
            Self::RangeInclusive => "range",
            Self::Composite => "composite",
        };
        formatter.write_str(name)
    }
}

/// A set over an ordered domain `T`.
///
/// # Examples
///
/// ```rust
/// use setview::sets::{Range, Set};
///
/// let small = Set::inclusive([1, 2, 3]);
/// let not_two = Set::exclusive([2]);
/// let teens = Set::range(Range::closed(13, 19).unwrap());
///
/// assert!(small.contains(&1));
/// assert!(not_two.contains(&100));
/// assert!(!not_two.contains(&2));
/// assert!(teens.contains(&15));
///
/// let both = small.intersect(&not_two);
/// assert_eq!(both, Set::inclusive([1, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de> + Ord + Clone"
    ))
)]
pub enum Set<T> {
    /// The empty set.
    Empty,
    /// The set of every value.
    Complete,
    /// A finite set of listed values.
    Inclusive(ElementList<T>),
    /// Every value except the listed ones.
    Exclusive(ElementList<T>),
    /// Every value within the range.
    RangeInclusive(Range<T>),
    /// A composition that has no closed form.
    Composite(Box<Composite<T>>),
}

/// A boolean composition of sets, evaluated through `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de> + Ord + Clone"
    ))
)]
pub enum Composite<T> {
    /// Values in either operand.
    Union(Set<T>, Set<T>),
    /// Values in both operands.
    Intersect(Set<T>, Set<T>),
    /// Values in the first operand but not the second.
    Subtract(Set<T>, Set<T>),
    /// Values not in the operand.
    Inverse(Set<T>),
}

impl<T: Ord + Clone> Composite<T> {
    /// Returns `true` if `value` belongs to the composition.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Union(left, right) => left.contains(value) || right.contains(value),
            Self::Intersect(left, right) => left.contains(value) && right.contains(value),
            Self::Subtract(left, right) => left.contains(value) && !right.contains(value),
            Self::Inverse(set) => !set.contains(value),
        }
    }
}

impl<T> Set<T> {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// The set of every value.
    #[must_use]
    pub const fn complete() -> Self {
        Self::Complete
    }

    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> SetKind {
        match self {
            Self::Empty => SetKind::Empty,
            Self::Complete => SetKind::Complete,
            Self::Inclusive(_) => SetKind::Inclusive,
            Self::Exclusive(_) => SetKind::Exclusive,
            Self::RangeInclusive(_) => SetKind::RangeInclusive,
            Self::Composite(_) => SetKind::Composite,
        }
    }

    pub(crate) fn composite(composite: Composite<T>) -> Self {
        Self::Composite(Box::new(composite))
    }
}

impl<T: Ord + Clone> Set<T> {
    /// A finite set of the given values.
    ///
    /// An empty input yields [`Set::Empty`].
    #[must_use]
    pub fn inclusive<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::from_inclusive(values.into_iter().collect())
    }

    /// Every value except the given ones.
    ///
    /// An empty input yields [`Set::Complete`].
    #[must_use]
    pub fn exclusive<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::from_exclusive(values.into_iter().collect())
    }

    /// The set containing only `value`.
    #[must_use]
    pub fn singleton(value: T) -> Self {
        Self::Inclusive(ElementList::new().insert(value))
    }

    /// Every value within `range`.
    ///
    /// An empty range yields [`Set::Empty`] and the unbounded range yields
    /// [`Set::Complete`].
    #[must_use]
    pub fn range(range: Range<T>) -> Self {
        if range.is_empty() {
            Self::Empty
        } else if range.is_unbounded() {
            Self::Complete
        } else {
            Self::RangeInclusive(range)
        }
    }

    pub(crate) fn from_inclusive(list: ElementList<T>) -> Self {
        if list.is_empty() {
            Self::Empty
        } else {
            Self::Inclusive(list)
        }
    }

    pub(crate) fn from_exclusive(list: ElementList<T>) -> Self {
        if list.is_empty() {
            Self::Complete
        } else {
            Self::Exclusive(list)
        }
    }

    /// Returns `true` if `value` belongs to the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::sets::Set;
    ///
    /// assert!(Set::<i32>::complete().contains(&42));
    /// assert!(!Set::<i32>::empty().contains(&42));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Empty => false,
            Self::Complete => true,
            Self::Inclusive(list) => list.contains(value),
            Self::Exclusive(list) => !list.contains(value),
            Self::RangeInclusive(range) => range.contains(value),
            Self::Composite(composite) => composite.contains(value),
        }
    }

    /// Returns `true` if the set provably contains nothing.
    ///
    /// Composite sets are never reported empty, even when their parts
    /// cancel out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Inclusive(list) => list.is_empty(),
            Self::RangeInclusive(range) => range.is_empty(),
            Self::Complete | Self::Exclusive(_) | Self::Composite(_) => false,
        }
    }

    /// Returns `true` if the set provably contains every value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Complete => true,
            Self::Exclusive(list) => list.is_empty(),
            Self::RangeInclusive(range) => range.is_unbounded(),
            Self::Empty | Self::Inclusive(_) | Self::Composite(_) => false,
        }
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: Ord + Clone> From<Range<T>> for Set<T> {
    fn from(range: Range<T>) -> Self {
        Self::range(range)
    }
}

impl<T: Ord + Clone> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::inclusive(iter)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Set<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => formatter.write_str("∅"),
            Self::Complete => formatter.write_str("U"),
            Self::Inclusive(list) => write!(formatter, "{list}"),
            Self::Exclusive(list) => write!(formatter, "¬{list}"),
            Self::RangeInclusive(range) => write!(formatter, "{range}"),
            Self::Composite(composite) => write!(formatter, "{composite}"),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Composite<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Union(left, right) => write!(formatter, "({left} ∪ {right})"),
            Self::Intersect(left, right) => write!(formatter, "({left} ∩ {right})"),
            Self::Subtract(left, right) => write!(formatter, "({left} − {right})"),
            Self::Inverse(set) => write!(formatter, "¬{set}"),
        }
    }
}
