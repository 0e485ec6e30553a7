//! Predicate-filtered views.

use super::index::{Shift, shift_indices};
use super::transformed::{ModifiedResult, Transformation, TransformedList};
use super::ObservableSource;

#[derive(Debug, Clone)]
struct FilteredEntry<T> {
    source_index: usize,
    item: T,
}

/// Keeps the source items that satisfy a predicate, in source order.
///
/// Entries remember the source position of their item and stay sorted by
/// it, so both additions and removals locate their slot by binary search.
///
/// The predicate is evaluated once, when an item arrives. An item whose
/// state later changes in a way the predicate would judge differently is
/// not re-examined until the next [`reset_source`](Transformation::reset_source).
pub struct FilterTransformation<T> {
    predicate: Box<dyn Fn(&T) -> bool>,
    entries: Vec<FilteredEntry<T>>,
}

impl<T> FilterTransformation<T> {
    /// Creates an empty transformation for `predicate`.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            entries: Vec::new(),
        }
    }

    fn shift_from(&mut self, slot: usize, shift: Shift) {
        shift_indices(
            self.entries[slot..]
                .iter_mut()
                .map(|entry| &mut entry.source_index),
            shift,
        );
    }
}

impl<T> Transformation<T> for FilterTransformation<T> {
    fn kind(&self) -> &'static str {
        "filter"
    }

    fn add_from_source(&mut self, source_index: usize, item: T) -> ModifiedResult {
        let slot = self
            .entries
            .partition_point(|entry| entry.source_index < source_index);
        self.shift_from(slot, Shift::Up);

        if !(self.predicate)(&item) {
            return ModifiedResult::Unmodified;
        }
        self.entries.insert(slot, FilteredEntry { source_index, item });
        ModifiedResult::at(slot)
    }

    fn remove_from_source(&mut self, source_index: usize, _item: &T) -> ModifiedResult {
        let found = self
            .entries
            .binary_search_by_key(&source_index, |entry| entry.source_index);
        let result = match found {
            Ok(slot) => {
                self.entries.remove(slot);
                ModifiedResult::at(slot)
            }
            Err(_) => ModifiedResult::Unmodified,
        };
        let (Ok(slot) | Err(slot)) = found;
        self.shift_from(slot, Shift::Down);
        result
    }

    fn reset_source(&mut self, items: Vec<T>) {
        let predicate = &self.predicate;
        self.entries = items
            .into_iter()
            .enumerate()
            .filter(|(_, item)| predicate(item))
            .map(|(source_index, item)| FilteredEntry { source_index, item })
            .collect();
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

/// A live view of the source items satisfying a predicate.
pub type FilteredList<T> = TransformedList<T, FilterTransformation<T>>;

impl<T: Clone + 'static> TransformedList<T, FilterTransformation<T>> {
    /// Creates a view of the items in `source` for which `predicate` holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setview::views::{FilteredList, ObservableList};
    ///
    /// let source: ObservableList<i32> = (1..=5).collect();
    /// let even = FilteredList::new(source.clone(), |value: &i32| value % 2 == 0);
    /// assert_eq!(even.to_vec(), vec![2, 4]);
    ///
    /// source.push(6).unwrap();
    /// source.remove_item(&2).unwrap();
    /// assert_eq!(even.to_vec(), vec![4, 6]);
    /// ```
    pub fn new<S, P>(source: S, predicate: P) -> Self
    where
        S: ObservableSource<T> + 'static,
        P: Fn(&T) -> bool + 'static,
    {
        Self::with_transformation(source, FilterTransformation::new(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn even() -> FilterTransformation<i32> {
        FilterTransformation::new(|value: &i32| value % 2 == 0)
    }

    fn source_indices(transformation: &FilterTransformation<i32>) -> Vec<usize> {
        transformation
            .entries
            .iter()
            .map(|entry| entry.source_index)
            .collect()
    }

    #[rstest]
    fn test_reset_keeps_matching_items_with_positions() {
        let mut transformation = even();
        transformation.reset_source(vec![1, 2, 3, 4]);
        assert_eq!(transformation.items().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(source_indices(&transformation), vec![1, 3]);
    }

    #[rstest]
    fn test_rejected_addition_still_shifts_later_entries() {
        let mut transformation = even();
        transformation.reset_source(vec![2, 4]);
        assert_eq!(
            transformation.add_from_source(0, 1),
            ModifiedResult::Unmodified
        );
        assert_eq!(source_indices(&transformation), vec![1, 2]);
    }

    #[rstest]
    #[case(0, 6, 0)]
    #[case(1, 6, 1)]
    #[case(2, 6, 1)]
    #[case(4, 6, 2)]
    fn test_addition_lands_between_neighbours(
        #[case] source_index: usize,
        #[case] item: i32,
        #[case] expected_slot: usize,
    ) {
        let mut transformation = even();
        transformation.reset_source(vec![2, 1, 4, 3]);
        assert_eq!(
            transformation.add_from_source(source_index, item),
            ModifiedResult::at(expected_slot)
        );
        assert_eq!(transformation.get(expected_slot), Some(&6));
    }

    #[rstest]
    fn test_removal_of_filtered_out_item_is_unmodified() {
        let mut transformation = even();
        transformation.reset_source(vec![1, 2, 3, 4]);
        assert_eq!(
            transformation.remove_from_source(0, &1),
            ModifiedResult::Unmodified
        );
        assert_eq!(source_indices(&transformation), vec![0, 2]);
    }

    #[rstest]
    fn test_removal_of_kept_item() {
        let mut transformation = even();
        transformation.reset_source(vec![1, 2, 3, 4]);
        assert_eq!(
            transformation.remove_from_source(1, &2),
            ModifiedResult::at(0)
        );
        assert_eq!(transformation.items().copied().collect::<Vec<_>>(), vec![4]);
        assert_eq!(source_indices(&transformation), vec![2]);
    }

    #[rstest]
    fn test_predicate_is_not_reevaluated_until_reset() {
        use std::cell::Cell;
        use std::rc::Rc;

        let threshold = Rc::new(Cell::new(10));
        let limit = Rc::clone(&threshold);
        let mut transformation = FilterTransformation::new(move |value: &i32| *value < limit.get());
        transformation.reset_source(vec![5, 15]);
        assert_eq!(transformation.len(), 1);

        threshold.set(20);
        assert_eq!(transformation.len(), 1);
        transformation.reset_source(vec![5, 15]);
        assert_eq!(transformation.len(), 2);
    }
}
