//! Live derived views over an observable source.
//!
//! A [`TransformedList`] binds one [`Transformation`] to one
//! [`ObservableSource`] for its whole life. Every source notification is
//! folded into the transformation incrementally and re-emitted as the
//! minimal sequence of view events, so that replaying the emitted events on
//! the previous view state yields exactly what a fresh recomputation over
//! the current source would produce.
//!
//! `Replace` and `Move` source changes cannot be derived from and are
//! rejected with [`CollectionError::UnsupportedAction`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::index::{group_contiguous, rebase_insertions, rebase_removals};
use super::observable::ChangeCallback;
use super::{
    ChangeEvent, ChangeNotifier, CollectionError, ObservableSource, SubscriptionId,
};

/// Outcome of feeding one source change into a [`Transformation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifiedResult {
    /// The view did not change.
    Unmodified,
    /// The view gained or lost one item at `index` (`None` if unknown).
    Modified {
        /// The view position of the affected item, if known.
        index: Option<usize>,
    },
}

impl ModifiedResult {
    /// Creates a `Modified` result at a known position.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self::Modified { index: Some(index) }
    }

    /// Returns `true` for `Modified`.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }
}

/// The per-view derivation algorithm driven by a [`TransformedList`].
///
/// `source_index` arguments always refer to the source as it is at the
/// moment of the call: for an addition, the item already sits at
/// `source_index` and every later source item has moved up by one; for a
/// removal, the item sat at `source_index` and every later source item
/// moves down by one.
pub trait Transformation<T> {
    /// A short name used in log events.
    fn kind(&self) -> &'static str;

    /// Folds in an item added to the source at `source_index`.
    fn add_from_source(&mut self, source_index: usize, item: T) -> ModifiedResult;

    /// Folds in the removal of `item` from the source at `source_index`.
    fn remove_from_source(&mut self, source_index: usize, item: &T) -> ModifiedResult;

    /// Discards all state and recomputes from the full source contents.
    fn reset_source(&mut self, items: Vec<T>);

    /// Returns the number of items in the view.
    fn len(&self) -> usize;

    /// Returns `true` if the view is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the view item at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Iterates the view in order.
    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a;
}

struct ViewState<T, X> {
    source: Rc<dyn ObservableSource<T>>,
    transformation: RefCell<X>,
    notifier: ChangeNotifier<ChangeEvent<T>>,
    subscription: Cell<Option<SubscriptionId>>,
}

impl<T, X> Drop for ViewState<T, X> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
        }
    }
}

impl<T: Clone + 'static, X: Transformation<T>> ViewState<T, X> {
    fn kind(&self) -> &'static str {
        self.transformation.borrow().kind()
    }

    fn handle(&self, event: &ChangeEvent<T>) -> Result<(), CollectionError> {
        let emitted = match event {
            ChangeEvent::Add {
                index: Some(start),
                items,
            } => self.apply_additions(*start, items),
            ChangeEvent::Remove {
                index: Some(start),
                items,
            } => self.apply_removals(*start, items),
            ChangeEvent::Add { index: None, .. }
            | ChangeEvent::Remove { index: None, .. }
            | ChangeEvent::Reset => {
                self.rebuild();
                vec![ChangeEvent::reset()]
            }
            ChangeEvent::Replace { .. } | ChangeEvent::Move { .. } => {
                tracing::debug!(
                    view = self.kind(),
                    action = %event.action(),
                    "rejecting unsupported source change"
                );
                return Err(CollectionError::UnsupportedAction {
                    action: event.action(),
                });
            }
        };
        emitted.iter().try_for_each(|view_event| {
            tracing::trace!(
                view = self.kind(),
                action = %view_event.action(),
                index = ?view_event.index(),
                count = view_event.items().len(),
                "emitting view change"
            );
            self.notifier.notify(view_event)
        })
    }

    fn apply_additions(&self, start: usize, items: &[T]) -> Vec<ChangeEvent<T>> {
        let mut landed: Vec<(usize, T)> = Vec::new();
        let mut unplaced: Vec<T> = Vec::new();
        {
            let mut transformation = self.transformation.borrow_mut();
            for (offset, item) in items.iter().enumerate() {
                match transformation.add_from_source(start + offset, item.clone()) {
                    ModifiedResult::Unmodified => {}
                    ModifiedResult::Modified { index: Some(index) } => {
                        landed.push((index, item.clone()));
                    }
                    ModifiedResult::Modified { index: None } => unplaced.push(item.clone()),
                }
            }
        }
        tracing::trace!(
            view = self.kind(),
            source_index = start,
            offered = items.len(),
            accepted = landed.len() + unplaced.len(),
            "folded source additions"
        );

        let positions: Vec<usize> = landed.iter().map(|(index, _)| *index).collect();
        let entries: Vec<(Option<usize>, T)> = unplaced
            .into_iter()
            .map(|item| (None, item))
            .chain(
                rebase_insertions(&positions)
                    .into_iter()
                    .zip(landed)
                    .map(|(position, (_, item))| (Some(position), item)),
            )
            .collect();
        group_contiguous(entries)
            .into_iter()
            .map(|group| ChangeEvent::add(group.start, group.items))
            .collect()
    }

    fn apply_removals(&self, start: usize, items: &[T]) -> Vec<ChangeEvent<T>> {
        let mut steps: Vec<(Option<usize>, T)> = Vec::new();
        {
            let mut transformation = self.transformation.borrow_mut();
            for (offset, item) in items.iter().enumerate().rev() {
                if let ModifiedResult::Modified { index } =
                    transformation.remove_from_source(start + offset, item)
                {
                    steps.push((index, item.clone()));
                }
            }
        }
        tracing::trace!(
            view = self.kind(),
            source_index = start,
            offered = items.len(),
            removed = steps.len(),
            "folded source removals"
        );

        let known: Vec<usize> = steps.iter().filter_map(|(index, _)| *index).collect();
        let mut originals = rebase_removals(&known).into_iter();
        let entries: Vec<(Option<usize>, T)> = steps
            .into_iter()
            .map(|(index, item)| (index.and_then(|_| originals.next()), item))
            .collect();
        group_contiguous(entries)
            .into_iter()
            .rev()
            .map(|group| ChangeEvent::remove(group.start, group.items))
            .collect()
    }

    fn rebuild(&self) {
        let snapshot = self.source.snapshot();
        let source_len = snapshot.len();
        let mut transformation = self.transformation.borrow_mut();
        transformation.reset_source(snapshot);
        tracing::debug!(
            view = transformation.kind(),
            source_len,
            view_len = transformation.len(),
            "recomputed view from source"
        );
    }
}

/// A live view deriving its contents from an [`ObservableSource`].
///
/// Cloning a `TransformedList` clones the handle. Dropping the last handle
/// unsubscribes the view from its source.
///
/// Views are themselves observable sources, so they chain:
///
/// ```rust
/// use setview::views::{FilteredList, ObservableList, SortedList};
///
/// let source: ObservableList<i32> = [5, 2, 8, 1, 4].into_iter().collect();
/// let even = FilteredList::new(source.clone(), |value: &i32| value % 2 == 0);
/// let ordered = SortedList::new(even.clone(), |value: &i32| *value);
///
/// assert_eq!(ordered.to_vec(), vec![2, 4, 8]);
///
/// source.push(6).unwrap();
/// assert_eq!(ordered.to_vec(), vec![2, 4, 6, 8]);
/// ```
pub struct TransformedList<T, X> {
    state: Rc<ViewState<T, X>>,
}

impl<T, X> TransformedList<T, X>
where
    T: Clone + 'static,
    X: Transformation<T> + 'static,
{
    /// Binds `transformation` to `source` and computes the initial view.
    pub fn with_transformation<S>(source: S, transformation: X) -> Self
    where
        S: ObservableSource<T> + 'static,
    {
        let source: Rc<dyn ObservableSource<T>> = Rc::new(source);
        let state = Rc::new(ViewState {
            source: Rc::clone(&source),
            transformation: RefCell::new(transformation),
            notifier: ChangeNotifier::new(),
            subscription: Cell::new(None),
        });
        state.rebuild();

        let weak: Weak<ViewState<T, X>> = Rc::downgrade(&state);
        let callback: ChangeCallback<T> = Box::new(move |event: &ChangeEvent<T>| {
            weak.upgrade().map_or(Ok(()), |state| state.handle(event))
        });
        state.subscription.set(Some(source.try_subscribe(callback)));

        Self { state }
    }

    /// Returns the number of items in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.transformation.borrow().len()
    }

    /// Returns `true` if the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the view item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<T, CollectionError> {
        let transformation = self.state.transformation.borrow();
        transformation
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                len: transformation.len(),
            })
    }

    /// Returns a copy of the view contents.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.state.transformation.borrow().items().cloned().collect()
    }

    /// Iterates a snapshot of the view taken at the time of the call.
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    /// Clones the view into `target` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if the view does not fit
    /// into `target[offset..]`.
    pub fn copy_to(&self, target: &mut [T], offset: usize) -> Result<(), CollectionError> {
        let transformation = self.state.transformation.borrow();
        let fits = offset
            .checked_add(transformation.len())
            .is_some_and(|end| end <= target.len());
        if !fits {
            return Err(CollectionError::IndexOutOfRange {
                index: offset,
                len: target.len(),
            });
        }
        for (slot, item) in target[offset..].iter_mut().zip(transformation.items()) {
            slot.clone_from(item);
        }
        Ok(())
    }

    /// Recomputes the view from the current source contents and emits
    /// `Reset`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a view subscriber.
    pub fn reset_source(&self) -> Result<(), CollectionError> {
        self.state.rebuild();
        self.state.notifier.notify(&ChangeEvent::reset())
    }

    /// Appends `item` to the source.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while the source notifies.
    pub fn add(&self, item: T) -> Result<(), CollectionError> {
        self.state.source.push(item)
    }

    /// Removes the first occurrence of `item` from the source.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while the source notifies.
    pub fn remove(&self, item: &T) -> Result<bool, CollectionError> {
        self.state.source.remove_item(item)
    }

    /// Clears the source.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while the source notifies.
    pub fn clear(&self) -> Result<(), CollectionError> {
        self.state.source.clear()
    }

    /// Always fails: a view's positions are derived from its source.
    ///
    /// # Errors
    ///
    /// Always returns [`CollectionError::UnsupportedMutation`].
    pub fn insert(&self, _index: usize, _item: T) -> Result<(), CollectionError> {
        Err(CollectionError::UnsupportedMutation {
            operation: "insert",
        })
    }

    /// Always fails: a view's positions are derived from its source.
    ///
    /// # Errors
    ///
    /// Always returns [`CollectionError::UnsupportedMutation`].
    pub fn set(&self, _index: usize, _item: T) -> Result<T, CollectionError> {
        Err(CollectionError::UnsupportedMutation { operation: "set" })
    }

    /// Registers an infallible callback for view changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.state.notifier.subscribe(callback)
    }

    /// Registers a fallible callback for view changes.
    pub fn try_subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) -> Result<(), CollectionError> + 'static,
    {
        self.state.notifier.try_subscribe(callback)
    }

    /// Removes a view subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.notifier.unsubscribe(id)
    }

    /// Returns the number of view subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.notifier.subscriber_count()
    }
}

impl<T, X> TransformedList<T, X>
where
    T: Clone + PartialEq + 'static,
    X: Transformation<T> + 'static,
{
    /// Returns `true` if the view holds `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.state
            .transformation
            .borrow()
            .items()
            .any(|candidate| candidate == item)
    }

    /// Returns the view position of the first occurrence of `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.state
            .transformation
            .borrow()
            .items()
            .position(|candidate| candidate == item)
    }
}

impl<T, X> ObservableSource<T> for TransformedList<T, X>
where
    T: Clone + 'static,
    X: Transformation<T> + 'static,
{
    fn snapshot(&self) -> Vec<T> {
        self.to_vec()
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn try_subscribe(&self, callback: ChangeCallback<T>) -> SubscriptionId {
        self.state.notifier.try_subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.notifier.unsubscribe(id)
    }

    fn push(&self, item: T) -> Result<(), CollectionError> {
        self.add(item)
    }

    fn remove_item(&self, item: &T) -> Result<bool, CollectionError> {
        self.remove(item)
    }

    fn clear(&self) -> Result<(), CollectionError> {
        Self::clear(self)
    }
}

impl<T, X> Clone for TransformedList<T, X> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T, X> std::fmt::Debug for TransformedList<T, X>
where
    T: Clone + std::fmt::Debug + 'static,
    X: Transformation<T> + 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TransformedList")
            .field("kind", &self.state.kind())
            .field("items", &self.to_vec())
            .finish()
    }
}
