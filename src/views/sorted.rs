//! Key-sorted views.

use std::cmp::Ordering;

use super::index::{Shift, shift_indices};
use super::transformed::{ModifiedResult, Transformation, TransformedList};
use super::ObservableSource;

#[derive(Debug, Clone)]
struct SortedEntry<T, K> {
    source_index: usize,
    key: K,
    item: T,
}

/// Orders the source items by a derived key.
///
/// Items with equal keys keep their relative source order, so the view is
/// always identical to a stable sort of the source. Keys are computed once
/// per item on arrival.
pub struct SortTransformation<T, K> {
    key_selector: Box<dyn Fn(&T) -> K>,
    entries: Vec<SortedEntry<T, K>>,
}

impl<T, K: Ord> SortTransformation<T, K> {
    /// Creates an empty transformation ordering by `key_selector`.
    pub fn new<F>(key_selector: F) -> Self
    where
        F: Fn(&T) -> K + 'static,
    {
        Self {
            key_selector: Box::new(key_selector),
            entries: Vec::new(),
        }
    }
}

impl<T, K: Ord> Transformation<T> for SortTransformation<T, K> {
    fn kind(&self) -> &'static str {
        "sort"
    }

    fn add_from_source(&mut self, source_index: usize, item: T) -> ModifiedResult {
        shift_indices(
            self.entries
                .iter_mut()
                .filter(|entry| entry.source_index >= source_index)
                .map(|entry| &mut entry.source_index),
            Shift::Up,
        );

        let key = (self.key_selector)(&item);
        let slot = self.entries.partition_point(|entry| match entry.key.cmp(&key) {
            Ordering::Less => true,
            Ordering::Equal => entry.source_index < source_index,
            Ordering::Greater => false,
        });
        self.entries.insert(
            slot,
            SortedEntry {
                source_index,
                key,
                item,
            },
        );
        ModifiedResult::at(slot)
    }

    fn remove_from_source(&mut self, source_index: usize, _item: &T) -> ModifiedResult {
        let found = self
            .entries
            .iter()
            .position(|entry| entry.source_index == source_index);
        if let Some(slot) = found {
            self.entries.remove(slot);
        }
        shift_indices(
            self.entries
                .iter_mut()
                .filter(|entry| entry.source_index > source_index)
                .map(|entry| &mut entry.source_index),
            Shift::Down,
        );
        found.map_or(ModifiedResult::Unmodified, ModifiedResult::at)
    }

    fn reset_source(&mut self, items: Vec<T>) {
        let key_selector = &self.key_selector;
        let mut entries: Vec<SortedEntry<T, K>> = items
            .into_iter()
            .enumerate()
            .map(|(source_index, item)| SortedEntry {
                source_index,
                key: key_selector(&item),
                item,
            })
            .collect();
        entries.sort_by(|left, right| left.key.cmp(&right.key));
        self.entries = entries;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|entry| &entry.item)
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.entries.iter().map(|entry| &entry.item)
    }
}

/// A live view of the source items ordered by a key.
pub type SortedList<T, K> = TransformedList<T, SortTransformation<T, K>>;

impl<T, K> TransformedList<T, SortTransformation<T, K>>
where
    T: Clone + 'static,
    K: Ord + 'static,
{
    /// Creates a view of `source` ordered by `key_selector`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::views::{ObservableList, SortedList};
    ///
    /// let source: ObservableList<(u8, char)> =
    ///     [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let by_rank = SortedList::new(source.clone(), |entry: &(u8, char)| entry.0);
    ///
    /// let names: String = by_rank.iter().map(|(_, name)| name).collect();
    /// assert_eq!(names, "abc");
    /// ```
    pub fn new<S, F>(source: S, key_selector: F) -> Self
    where
        S: ObservableSource<T> + 'static,
        F: Fn(&T) -> K + 'static,
    {
        Self::with_transformation(source, SortTransformation::new(key_selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    type Tagged = (u8, char);

    fn by_rank() -> SortTransformation<Tagged, u8> {
        SortTransformation::new(|entry: &Tagged| entry.0)
    }

    fn tags(transformation: &SortTransformation<Tagged, u8>) -> String {
        transformation.items().map(|entry| entry.1).collect()
    }

    #[rstest]
    fn test_reset_is_a_stable_sort() {
        let mut transformation = by_rank();
        transformation.reset_source(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        assert_eq!(tags(&transformation), "bdac");
    }

    #[rstest]
    fn test_append_lands_after_equal_keys() {
        let mut transformation = by_rank();
        transformation.reset_source(vec![(1, 'a'), (2, 'b'), (1, 'c')]);
        assert_eq!(
            transformation.add_from_source(3, (1, 'd')),
            ModifiedResult::at(2)
        );
        assert_eq!(tags(&transformation), "acdb");
    }

    #[rstest]
    fn test_front_insert_lands_before_equal_keys() {
        let mut transformation = by_rank();
        transformation.reset_source(vec![(1, 'a'), (1, 'b')]);
        assert_eq!(
            transformation.add_from_source(0, (1, 'z')),
            ModifiedResult::at(0)
        );
        assert_eq!(tags(&transformation), "zab");
    }

    #[rstest]
    fn test_incremental_matches_recompute() {
        let mut incremental = by_rank();
        let mut source: Vec<Tagged> = vec![(3, 'a'), (1, 'b'), (3, 'c')];
        incremental.reset_source(source.clone());

        for (index, item) in [(1, (3, 'x')), (0, (1, 'y')), (5, (2, 'z'))] {
            source.insert(index, item);
            incremental.add_from_source(index, item);
        }
        let removed = source.remove(2);
        incremental.remove_from_source(2, &removed);

        let mut recomputed = by_rank();
        recomputed.reset_source(source);
        assert_eq!(tags(&incremental), tags(&recomputed));
    }

    #[rstest]
    fn test_remove_shifts_later_positions() {
        let mut transformation = by_rank();
        transformation.reset_source(vec![(5, 'a'), (1, 'b'), (3, 'c')]);
        assert_eq!(
            transformation.remove_from_source(0, &(5, 'a')),
            ModifiedResult::at(2)
        );
        let positions: Vec<usize> = transformation
            .entries
            .iter()
            .map(|entry| entry.source_index)
            .collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[rstest]
    fn test_remove_unknown_position_is_unmodified() {
        let mut transformation = by_rank();
        assert_eq!(
            transformation.remove_from_source(4, &(0, 'q')),
            ModifiedResult::Unmodified
        );
    }
}
