//! Subtraction that may yield several disjoint pieces.
//!
//! Removing the middle of a range leaves two ranges, which no single
//! range can represent. [`MultiSubtract`] returns the pieces separately
//! instead of folding them into a composite set.

use smallvec::SmallVec;

use super::{Range, RangePieces, Set};

/// Up to two pairwise-disjoint sets, ordered from left to right.
pub type SetCollection<T> = SmallVec<[Set<T>; 2]>;

/// Subtraction returning every disjoint remainder as its own value.
///
/// The pieces are pairwise disjoint, and their union is exactly
/// `self − other`.
///
/// # Examples
///
/// ```rust
/// use setview::sets::{MultiSubtract, Range, Set};
///
/// let whole = Set::range(Range::closed(1, 10).unwrap());
/// let middle = Set::range(Range::closed(5, 7).unwrap());
///
/// let pieces = whole.subtract_multi(&middle);
/// assert_eq!(pieces.len(), 2);
/// assert!(pieces[0].contains(&4));
/// assert!(!pieces[0].contains(&5));
/// assert!(pieces[1].contains(&8));
/// ```
pub trait MultiSubtract {
    /// The type of each remainder piece.
    type Piece;

    /// Returns the remainders of removing `other` from `self`.
    fn subtract_multi(&self, other: &Self) -> SmallVec<[Self::Piece; 2]>;
}

impl<T: Ord + Clone> MultiSubtract for Range<T> {
    type Piece = Self;

    fn subtract_multi(&self, other: &Self) -> RangePieces<T> {
        self.subtract(other)
    }
}

impl<T: Ord + Clone> MultiSubtract for Set<T> {
    type Piece = Self;

    fn subtract_multi(&self, other: &Self) -> SetCollection<T> {
        if let (Self::RangeInclusive(left), Self::RangeInclusive(right)) = (self, other) {
            return left.subtract(right).into_iter().map(Self::range).collect();
        }
        let remainder = self.subtract(other);
        let mut pieces = SetCollection::new();
        if !remainder.is_empty() {
            pieces.push(remainder);
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::SetKind;
    use rstest::rstest;

    fn range(min: i32, max: i32) -> Set<i32> {
        Set::range(Range::closed(min, max).unwrap())
    }

    #[rstest]
    fn test_interior_cut_yields_two_ranges() {
        let pieces = range(1, 10).subtract_multi(&range(5, 7));
        assert_eq!(
            pieces.as_slice(),
            &[
                Set::range(Range::closed_open(1, 5).unwrap()),
                Set::range(Range::open_closed(7, 10).unwrap()),
            ]
        );
    }

    #[rstest]
    fn test_pieces_are_disjoint_and_cover_difference() {
        let whole = range(1, 10);
        let middle = range(5, 7);
        let pieces = whole.subtract_multi(&middle);
        for value in -2..14 {
            let covering = pieces.iter().filter(|piece| piece.contains(&value)).count();
            let expected = whole.contains(&value) && !middle.contains(&value);
            assert_eq!(covering, usize::from(expected));
        }
    }

    #[rstest]
    fn test_no_overlap_yields_minuend() {
        let pieces = range(1, 3).subtract_multi(&range(5, 7));
        assert_eq!(pieces.as_slice(), &[range(1, 3)]);
    }

    #[rstest]
    fn test_full_cover_yields_nothing() {
        assert!(range(4, 6).subtract_multi(&range(1, 10)).is_empty());
    }

    #[rstest]
    fn test_non_range_pair_yields_single_result() {
        let pieces = Set::inclusive([1, 2, 3]).subtract_multi(&Set::inclusive([2]));
        assert_eq!(pieces.as_slice(), &[Set::inclusive([1, 3])]);
    }

    #[rstest]
    fn test_non_range_pair_yields_composite_piece() {
        let pieces = range(1, 10).subtract_multi(&Set::inclusive([5]));
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].kind(), SetKind::Composite);
    }

    #[rstest]
    fn test_range_multi_subtract() {
        let whole = Range::closed(0, 100).unwrap();
        let pieces = whole.subtract_multi(&Range::open(10, 20).unwrap());
        assert_eq!(
            pieces.as_slice(),
            &[Range::closed(0, 10).unwrap(), Range::closed(20, 100).unwrap()]
        );
    }
}
