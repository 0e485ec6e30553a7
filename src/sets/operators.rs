//! Union, intersection, subtraction and inversion of sets.
//!
//! Each binary operator is a single `match` over the pair of operand
//! variants. Pairs with a closed form are rewritten into one of the compact
//! variants; every other pair falls back to a [`Composite`], whose
//! membership is the boolean composition of the operands.

use super::{Composite, MultiSubtract, Set, SetKind};

/// A binary set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetOperator {
    /// `A ∪ B`
    Union,
    /// `A ∩ B`
    Intersect,
    /// `A − B`
    Subtract,
}

impl<T: Ord + Clone> Set<T> {
    /// Applies `operator` to `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::sets::{Set, SetOperator};
    ///
    /// let left = Set::inclusive([1, 2]);
    /// let right = Set::inclusive([2, 3]);
    /// assert_eq!(left.apply(SetOperator::Union, &right), Set::inclusive([1, 2, 3]));
    /// assert_eq!(left.apply(SetOperator::Subtract, &right), Set::inclusive([1]));
    /// ```
    #[must_use]
    pub fn apply(&self, operator: SetOperator, other: &Self) -> Self {
        match operator {
            SetOperator::Union => self.union(other),
            SetOperator::Intersect => self.intersect(other),
            SetOperator::Subtract => self.subtract(other),
        }
    }

    /// Returns `true` if `apply(operator, other)` has a closed form for
    /// this pair of variants instead of falling back to a composite.
    #[must_use]
    pub fn has_closed_form(&self, operator: SetOperator, other: &Self) -> bool {
        self.apply(operator, other).kind() != SetKind::Composite
    }

    /// Returns the set of values in `self` or `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Complete, _) | (_, Self::Complete) => Self::Complete,
            (Self::Empty, set) | (set, Self::Empty) => set.clone(),
            (Self::Inclusive(left), Self::Inclusive(right)) => {
                Self::from_inclusive(left.merge(right))
            }
            (Self::Exclusive(left), Self::Exclusive(right)) => {
                Self::from_exclusive(left.intersection(right))
            }
            (Self::Inclusive(included), Self::Exclusive(excluded))
            | (Self::Exclusive(excluded), Self::Inclusive(included)) => {
                Self::from_exclusive(excluded.difference(included))
            }
            (Self::RangeInclusive(left), Self::RangeInclusive(right)) => left
                .union_contiguous(right)
                .map_or_else(|| self.union_fallback(other), Self::range),
            // x ∉ A ∪ S  ⇔  x ∈ A ∧ x ∉ S, so only listed values can be excluded.
            (Self::Exclusive(list), set) | (set, Self::Exclusive(list)) => {
                Self::from_exclusive(list.retain_by(|value| !set.contains(value)))
            }
            (Self::Inclusive(list), set) | (set, Self::Inclusive(list))
                if list.iter().all(|value| set.contains(value)) =>
            {
                set.clone()
            }
            _ => self.union_fallback(other),
        }
    }

    /// Returns the set of values in both `self` and `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Complete, set) | (set, Self::Complete) => set.clone(),
            (Self::Inclusive(left), Self::Inclusive(right)) => {
                Self::from_inclusive(left.intersection(right))
            }
            (Self::Exclusive(left), Self::Exclusive(right)) => {
                Self::from_exclusive(left.merge(right))
            }
            (Self::Inclusive(list), set) | (set, Self::Inclusive(list)) => {
                Self::from_inclusive(list.retain_by(|value| set.contains(value)))
            }
            (Self::RangeInclusive(left), Self::RangeInclusive(right)) => left
                .intersection(right)
                .map_or(Self::Empty, Self::range),
            (Self::Exclusive(list), set) | (set, Self::Exclusive(list))
                if list.iter().all(|value| !set.contains(value)) =>
            {
                set.clone()
            }
            _ => Self::composite(Composite::Intersect(self.clone(), other.clone())),
        }
    }

    /// Returns the set of values in `self` but not in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Complete) => Self::Empty,
            (set, Self::Empty) => set.clone(),
            (Self::Complete, set) => set.inverse(),
            (Self::Inclusive(list), set) => {
                Self::from_inclusive(list.retain_by(|value| !set.contains(value)))
            }
            (Self::Exclusive(left), Self::Inclusive(right)) => {
                Self::from_exclusive(left.merge(right))
            }
            (Self::Exclusive(left), Self::Exclusive(right)) => {
                Self::from_inclusive(right.difference(left))
            }
            (set, Self::Exclusive(list)) => {
                Self::from_inclusive(list.retain_by(|value| set.contains(value)))
            }
            (Self::RangeInclusive(_), Self::RangeInclusive(_)) => {
                let mut pieces = self.subtract_multi(other).into_iter();
                match (pieces.next(), pieces.next()) {
                    (None, _) => Self::Empty,
                    (Some(piece), None) => piece,
                    (Some(left), Some(right)) => Self::composite(Composite::Union(left, right)),
                }
            }
            (set, Self::Inclusive(list)) if list.iter().all(|value| !set.contains(value)) => {
                set.clone()
            }
            _ => Self::composite(Composite::Subtract(self.clone(), other.clone())),
        }
    }

    /// Returns the complement of the set.
    ///
    /// Inverting twice yields the original set for every variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::sets::{Range, Set};
    ///
    /// let listed = Set::inclusive([1, 2]);
    /// assert_eq!(listed.inverse(), Set::exclusive([1, 2]));
    ///
    /// let range = Set::range(Range::closed(1, 10).unwrap());
    /// let outside = range.inverse();
    /// assert!(outside.contains(&0));
    /// assert!(!outside.contains(&5));
    /// assert_eq!(outside.inverse(), range);
    /// ```
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Empty => Self::Complete,
            Self::Complete => Self::Empty,
            Self::Inclusive(list) => Self::from_exclusive(list.clone()),
            Self::Exclusive(list) => Self::from_inclusive(list.clone()),
            Self::RangeInclusive(range) => {
                let mut pieces = range.complement().into_iter().map(Self::range);
                match (pieces.next(), pieces.next()) {
                    (None, _) => Self::Empty,
                    (Some(piece), None) => piece,
                    (Some(left), Some(right)) => Self::composite(Composite::Union(left, right)),
                }
            }
            Self::Composite(composite) => match composite.as_ref() {
                Composite::Inverse(set) => set.clone(),
                Composite::Union(left, right) => left.inverse().intersect(&right.inverse()),
                Composite::Intersect(left, right) => left.inverse().union(&right.inverse()),
                Composite::Subtract(left, right) => left.inverse().union(right),
            },
        }
    }

    fn union_fallback(&self, other: &Self) -> Self {
        Self::composite(Composite::Union(self.clone(), other.clone()))
    }
}

impl<T: Ord + Clone> std::ops::BitOr for &Set<T> {
    type Output = Set<T>;

    fn bitor(self, other: Self) -> Set<T> {
        self.union(other)
    }
}

impl<T: Ord + Clone> std::ops::BitAnd for &Set<T> {
    type Output = Set<T>;

    fn bitand(self, other: Self) -> Set<T> {
        self.intersect(other)
    }
}

impl<T: Ord + Clone> std::ops::Sub for &Set<T> {
    type Output = Set<T>;

    fn sub(self, other: Self) -> Set<T> {
        self.subtract(other)
    }
}

impl<T: Ord + Clone> std::ops::Not for &Set<T> {
    type Output = Set<T>;

    fn not(self) -> Set<T> {
        self.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::Range;
    use rstest::rstest;

    fn range(min: i32, max: i32) -> Set<i32> {
        Set::range(Range::closed(min, max).unwrap())
    }

    #[rstest]
    #[case(Set::inclusive([1, 2]))]
    #[case(Set::exclusive([1, 2]))]
    #[case(range(1, 5))]
    fn test_identities(#[case] set: Set<i32>) {
        assert_eq!(Set::Complete.intersect(&set), set);
        assert_eq!(Set::Complete.union(&set), Set::Complete);
        assert_eq!(Set::Empty.intersect(&set), Set::Empty);
        assert_eq!(Set::Empty.union(&set), set);
        assert_eq!(set.subtract(&Set::Empty), set);
        assert_eq!(set.subtract(&Set::Complete), Set::Empty);
    }

    #[rstest]
    fn test_inclusive_union_inclusive() {
        let union = Set::inclusive([1, 2]).union(&Set::inclusive([2, 3]));
        assert_eq!(union, Set::inclusive([1, 2, 3]));
    }

    #[rstest]
    fn test_exclusive_union_exclusive_intersects_lists() {
        let union = Set::exclusive([1, 2]).union(&Set::exclusive([2, 3]));
        assert_eq!(union, Set::exclusive([2]));
    }

    #[rstest]
    fn test_exclusive_intersect_exclusive_merges_lists() {
        let both = Set::exclusive([1, 2]).intersect(&Set::exclusive([2, 3]));
        assert_eq!(both, Set::exclusive([1, 2, 3]));
    }

    #[rstest]
    fn test_inclusive_intersect_exclusive() {
        let both = Set::inclusive([1, 2, 3]).intersect(&Set::exclusive([2]));
        assert_eq!(both, Set::inclusive([1, 3]));
        let flipped = Set::exclusive([2]).intersect(&Set::inclusive([1, 2, 3]));
        assert_eq!(flipped, Set::inclusive([1, 3]));
    }

    #[rstest]
    fn test_inclusive_union_exclusive() {
        let union = Set::inclusive([1]).union(&Set::exclusive([1, 2]));
        assert_eq!(union, Set::exclusive([2]));
    }

    #[rstest]
    fn test_inclusive_intersect_range_filters_list() {
        let both = Set::inclusive([1, 5, 9]).intersect(&range(4, 10));
        assert_eq!(both, Set::inclusive([5, 9]));
    }

    #[rstest]
    fn test_exclusive_subtract_exclusive() {
        let difference = Set::exclusive([1]).subtract(&Set::exclusive([1, 2]));
        assert_eq!(difference, Set::inclusive([2]));
    }

    #[rstest]
    fn test_exclusive_subtract_inclusive() {
        let difference = Set::exclusive([1]).subtract(&Set::inclusive([2]));
        assert_eq!(difference, Set::exclusive([1, 2]));
    }

    #[rstest]
    fn test_range_intersect_range() {
        assert_eq!(range(1, 5).intersect(&range(3, 8)), range(3, 5));
        assert_eq!(range(1, 2).intersect(&range(3, 8)), Set::Empty);
    }

    #[rstest]
    fn test_range_union_range_contiguous() {
        assert_eq!(range(1, 5).union(&range(3, 8)), range(1, 8));
    }

    #[rstest]
    fn test_range_union_range_with_gap_is_composite() {
        let union = range(1, 2).union(&range(5, 8));
        assert_eq!(union.kind(), SetKind::Composite);
        assert!(union.contains(&1));
        assert!(!union.contains(&3));
        assert!(union.contains(&8));
    }

    #[rstest]
    fn test_range_subtract_range_interior() {
        let difference = range(1, 10).subtract(&range(5, 7));
        assert_eq!(
            difference,
            Set::composite(Composite::Union(
                Set::range(Range::closed_open(1, 5).unwrap()),
                Set::range(Range::open_closed(7, 10).unwrap()),
            ))
        );
    }

    #[rstest]
    fn test_range_subtract_range_one_end() {
        let difference = range(1, 10).subtract(&range(8, 12));
        assert_eq!(difference, Set::range(Range::closed_open(1, 8).unwrap()));
    }

    #[rstest]
    fn test_complete_subtract_is_inverse() {
        assert_eq!(
            Set::Complete.subtract(&Set::inclusive([1])),
            Set::exclusive([1])
        );
    }

    #[rstest]
    fn test_unrelated_pair_falls_back_to_composite() {
        let difference = range(1, 10).subtract(&Set::inclusive([5]));
        assert_eq!(difference.kind(), SetKind::Composite);
        assert!(!difference.contains(&5));
        assert!(difference.contains(&6));
        assert!(!range(1, 10).has_closed_form(SetOperator::Subtract, &Set::inclusive([5])));
    }

    #[rstest]
    fn test_subtract_disjoint_inclusive_keeps_minuend() {
        let difference = range(1, 10).subtract(&Set::inclusive([20]));
        assert_eq!(difference, range(1, 10));
    }

    #[rstest]
    #[case(Set::Empty)]
    #[case(Set::Complete)]
    #[case(Set::inclusive([1, 2]))]
    #[case(Set::exclusive([3]))]
    #[case(range(1, 10))]
    #[case(Set::range(Range::at_least(4)))]
    fn test_double_inverse_is_identity(#[case] set: Set<i32>) {
        assert_eq!(set.inverse().inverse(), set);
    }

    #[rstest]
    fn test_inverse_of_composite_applies_de_morgan() {
        let union = range(1, 2).union(&range(5, 8));
        let outside = union.inverse();
        for value in -2..12 {
            assert_eq!(outside.contains(&value), !union.contains(&value));
        }
    }

    #[rstest]
    fn test_operator_sugar() {
        let left = Set::inclusive([1, 2]);
        let right = Set::inclusive([2, 3]);
        assert_eq!(&left | &right, Set::inclusive([1, 2, 3]));
        assert_eq!(&left & &right, Set::inclusive([2]));
        assert_eq!(&left - &right, Set::inclusive([1]));
        assert_eq!(!&left, Set::exclusive([1, 2]));
    }
}
