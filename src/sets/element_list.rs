//! Sorted, deduplicated element storage for enumerated sets.
//!
//! This module provides [`ElementList`], the backing store of
//! [`Set::Inclusive`](super::Set::Inclusive) and
//! [`Set::Exclusive`](super::Set::Exclusive). Lists are immutable: every
//! operation returns a new list and leaves the original untouched.
//!
//! # Representation
//!
//! - Up to 8 elements are stored inline in a `SmallVec`.
//! - Larger lists are stored in a sorted `Vec` behind a reference counter,
//!   so cloning a set never copies its elements.
//!
//! Both representations keep elements in strictly ascending order, which
//! lets `contains` use binary search and lets the set operations run as
//! linear two-pointer merges.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `contains`     | O(log n)   |
//! | `insert`       | O(n)       |
//! | `remove`       | O(n)       |
//! | `merge`        | O(n + m)   |
//! | `intersection` | O(n + m)   |
//! | `difference`   | O(n + m)   |
//! | `retain_by`    | O(n)       |
//!
//! # Examples
//!
//! ```rust
//! use setview::sets::ElementList;
//!
//! let left: ElementList<i32> = [3, 1, 2, 3].into_iter().collect();
//! let right: ElementList<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(left.as_slice(), &[1, 2, 3]);
//! assert_eq!(left.merge(&right).as_slice(), &[1, 2, 3, 4]);
//! assert_eq!(left.intersection(&right).as_slice(), &[2, 3]);
//! assert_eq!(left.difference(&right).as_slice(), &[1]);
//! ```

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::ReferenceCounter;

/// The threshold for switching between inline and shared storage.
const SMALL_THRESHOLD: usize = 8;

#[derive(Clone)]
enum ElementListInner<T> {
    Empty,
    Small(SmallVec<[T; SMALL_THRESHOLD]>),
    Large(ReferenceCounter<Vec<T>>),
}

/// An immutable, sorted, deduplicated list of elements.
///
/// # Type Parameters
///
/// * `T` - The element type. Set operations require `Ord + Clone`.
///
/// # Examples
///
/// ```rust
/// use setview::sets::ElementList;
///
/// let list = ElementList::new().insert(5).insert(1).insert(5);
/// assert_eq!(list.len(), 2);
/// assert!(list.contains(&1));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 5]);
/// ```
#[derive(Clone)]
pub struct ElementList<T> {
    inner: ElementListInner<T>,
}

impl<T> ElementList<T> {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: ElementListInner::Empty,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.inner, ElementListInner::Empty)
    }

    /// Returns the elements as a slice in ascending order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match &self.inner {
            ElementListInner::Empty => &[],
            ElementListInner::Small(elements) => elements.as_slice(),
            ElementListInner::Large(elements) => elements.as_slice(),
        }
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the smallest element, or `None` if the list is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the largest element, or `None` if the list is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }
}

impl<T: Ord + Clone> ElementList<T> {
    /// Builds a list from a vector that is already strictly ascending.
    fn from_sorted_vec(elements: Vec<T>) -> Self {
        debug_assert!(
            is_strictly_sorted(&elements),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        let inner = if elements.is_empty() {
            ElementListInner::Empty
        } else if elements.len() <= SMALL_THRESHOLD {
            ElementListInner::Small(SmallVec::from_vec(elements))
        } else {
            ElementListInner::Large(ReferenceCounter::new(elements))
        };
        Self { inner }
    }

    /// Returns `true` if the list contains `element`.
    ///
    /// # Complexity
    ///
    /// O(log n) binary search.
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.as_slice().binary_search(element).is_ok()
    }

    /// Returns a new list with `element` added.
    ///
    /// Inserting an element that is already present returns an equal list.
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        let slice = self.as_slice();
        match slice.binary_search(&element) {
            Ok(_) => self.clone(),
            Err(position) => {
                let mut elements = Vec::with_capacity(slice.len() + 1);
                elements.extend_from_slice(&slice[..position]);
                elements.push(element);
                elements.extend_from_slice(&slice[position..]);
                Self::from_sorted_vec(elements)
            }
        }
    }

    /// Returns a new list with `element` removed.
    #[must_use]
    pub fn remove(&self, element: &T) -> Self {
        let slice = self.as_slice();
        slice.binary_search(element).map_or_else(
            |_| self.clone(),
            |position| {
                let mut elements = Vec::with_capacity(slice.len() - 1);
                elements.extend_from_slice(&slice[..position]);
                elements.extend_from_slice(&slice[position + 1..]);
                Self::from_sorted_vec(elements)
            },
        )
    }

    /// Returns the union of both lists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::sets::ElementList;
    ///
    /// let left: ElementList<i32> = [1, 3].into_iter().collect();
    /// let right: ElementList<i32> = [2, 3].into_iter().collect();
    /// assert_eq!(left.merge(&right).as_slice(), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_sorted_vec(merge_slices(self.as_slice(), other.as_slice()))
    }

    /// Returns the elements present in both lists.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_sorted_vec(intersection_slices(self.as_slice(), other.as_slice()))
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Self::from_sorted_vec(difference_slices(self.as_slice(), other.as_slice()))
    }

    /// Returns the elements for which `predicate` holds.
    ///
    /// This is how an enumerated list is intersected with an arbitrary set:
    /// the list stays finite, so filtering it by the other set's membership
    /// test is exact.
    #[must_use]
    pub fn retain_by<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let slice = self.as_slice();
        if slice.iter().all(&mut predicate) {
            return self.clone();
        }
        Self::from_sorted_vec(
            slice
                .iter()
                .filter(|element| predicate(*element))
                .cloned()
                .collect(),
        )
    }
}

impl<T> Default for ElementList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for ElementList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: Vec<T> = iter.into_iter().collect();
        elements.sort();
        elements.dedup();
        Self::from_sorted_vec(elements)
    }
}

impl<'a, T> IntoIterator for &'a ElementList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for ElementList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ElementList<T> {}

impl<T: std::hash::Hash> std::hash::Hash for ElementList<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ElementList<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for ElementList<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("{")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{element}")?;
        }
        formatter.write_str("}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ElementList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ElementList<T>
where
    T: serde::Deserialize<'de> + Ord + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Input order and duplicates are not trusted.
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}

// =============================================================================
// Slice Algorithms
// =============================================================================

/// Merges two strictly ascending slices into a strictly ascending `Vec`.
///
/// Disjoint inputs are concatenated without entering the comparison loop.
fn merge_slices<T: Clone + Ord>(left: &[T], right: &[T]) -> Vec<T> {
    let mut result = Vec::with_capacity(left.len() + right.len());

    if let (Some(left_last), Some(right_first)) = (left.last(), right.first())
        && left_last < right_first
    {
        result.extend_from_slice(left);
        result.extend_from_slice(right);
        return result;
    }
    if let (Some(right_last), Some(left_first)) = (right.last(), left.first())
        && right_last < left_first
    {
        result.extend_from_slice(right);
        result.extend_from_slice(left);
        return result;
    }

    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => {
                result.push(right[right_index].clone());
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result.extend_from_slice(&right[right_index..]);
    result
}

/// Returns the elements of `left` missing from `right`; both strictly ascending.
fn difference_slices<T: Clone + Ord>(left: &[T], right: &[T]) -> Vec<T> {
    if are_disjoint_ranges(left, right) {
        return left.to_vec();
    }

    let mut result = Vec::with_capacity(left.len());
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => {
                right_index += 1;
            }
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result
}

/// Returns the elements present in both strictly ascending slices.
fn intersection_slices<T: Clone + Ord>(left: &[T], right: &[T]) -> Vec<T> {
    if left.is_empty() || right.is_empty() || are_disjoint_ranges(left, right) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                left_index += 1;
            }
            Ordering::Greater => {
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result
}

/// Returns `true` when the value ranges spanned by the slices cannot overlap.
fn are_disjoint_ranges<T: Ord>(left: &[T], right: &[T]) -> bool {
    match (left.first(), left.last(), right.first(), right.last()) {
        (Some(left_first), Some(left_last), Some(right_first), Some(right_last)) => {
            left_last < right_first || right_last < left_first
        }
        _ => true,
    }
}

const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "element lists require strictly increasing elements (sorted + deduplicated)";

fn is_strictly_sorted<T: Ord>(slice: &[T]) -> bool {
    slice.windows(2).all(|window| window[0] < window[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    impl<T> ElementList<T> {
        const fn is_small_state(&self) -> bool {
            matches!(self.inner, ElementListInner::Small(_))
        }

        const fn is_large_state(&self) -> bool {
            matches!(self.inner, ElementListInner::Large(_))
        }
    }

    #[rstest]
    fn test_small_threshold_constant() {
        assert_eq!(SMALL_THRESHOLD, 8);
    }

    #[rstest]
    fn test_from_iter_sorts_and_deduplicates() {
        let list: ElementList<i32> = [5, 3, 5, 1, 3].into_iter().collect();
        assert_eq!(list.as_slice(), &[1, 3, 5]);
    }

    #[rstest]
    #[case(0, true, false)]
    #[case(8, false, false)]
    #[case(9, false, true)]
    fn test_storage_state_by_length(
        #[case] length: i32,
        #[case] expect_empty: bool,
        #[case] expect_large: bool,
    ) {
        let list: ElementList<i32> = (0..length).collect();
        assert_eq!(list.is_empty(), expect_empty);
        assert_eq!(list.is_large_state(), expect_large);
        assert_eq!(list.is_small_state(), !expect_empty && !expect_large);
    }

    #[rstest]
    fn test_remove_demotes_large_to_small() {
        let list: ElementList<i32> = (0..9).collect();
        assert!(list.is_large_state());
        let list = list.remove(&4);
        assert!(list.is_small_state());
        assert!(!list.contains(&4));
    }

    #[rstest]
    fn test_remove_last_element_returns_empty() {
        let list = ElementList::new().insert(1).remove(&1);
        assert!(list.is_empty());
    }

    #[rstest]
    fn test_insert_preserves_original() {
        let original: ElementList<i32> = [1, 2].into_iter().collect();
        let extended = original.insert(3);
        assert_eq!(original.len(), 2);
        assert_eq!(extended.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    #[case(&[1, 2], &[3, 4], &[1, 2, 3, 4])]
    #[case(&[3, 4], &[1, 2], &[1, 2, 3, 4])]
    #[case(&[1, 3, 5], &[2, 3, 6], &[1, 2, 3, 5, 6])]
    #[case(&[], &[1], &[1])]
    fn test_merge_slices(#[case] left: &[i32], #[case] right: &[i32], #[case] expected: &[i32]) {
        assert_eq!(merge_slices(left, right), expected);
    }

    #[rstest]
    #[case(&[1, 2, 3], &[2], &[1, 3])]
    #[case(&[1, 2], &[5, 6], &[1, 2])]
    #[case(&[1, 2], &[], &[1, 2])]
    fn test_difference_slices(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] expected: &[i32],
    ) {
        assert_eq!(difference_slices(left, right), expected);
    }

    #[rstest]
    #[case(&[1, 2, 3], &[2, 3, 4], &[2, 3])]
    #[case(&[1, 2], &[5, 6], &[])]
    fn test_intersection_slices(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] expected: &[i32],
    ) {
        assert_eq!(intersection_slices(left, right), expected);
    }

    #[rstest]
    fn test_retain_by_filters() {
        let list: ElementList<i32> = (1..=6).collect();
        assert_eq!(list.retain_by(|value| value % 2 == 0).as_slice(), &[2, 4, 6]);
    }

    #[rstest]
    fn test_display() {
        let list: ElementList<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{list}"), "{1, 2}");
        assert_eq!(format!("{}", ElementList::<i32>::new()), "{}");
    }
}
