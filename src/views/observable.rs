//! Observable sources.
//!
//! [`ObservableSource`] is the contract a transformed view consumes: a
//! readable snapshot, a subscription channel of [`ChangeEvent`]s and the
//! few mutations a view forwards upstream. [`ObservableList`] is the
//! in-memory implementation.

use std::cell::RefCell;
use std::rc::Rc;

use super::{ChangeEvent, ChangeNotifier, CollectionError, SubscriptionId};

/// Boxed fallible change callback, as stored by a source.
pub type ChangeCallback<T> = Box<dyn FnMut(&ChangeEvent<T>) -> Result<(), CollectionError>>;

/// A sequence that reports its mutations as [`ChangeEvent`]s.
///
/// A source presents one coherent notification stream: every event it
/// sends describes the transition from the state observed by the previous
/// event to the state visible through [`snapshot`](Self::snapshot) at the
/// time of sending.
pub trait ObservableSource<T> {
    /// Returns a copy of the current contents.
    fn snapshot(&self) -> Vec<T>;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the source holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers `callback` for every future change.
    fn try_subscribe(&self, callback: ChangeCallback<T>) -> SubscriptionId;

    /// Removes a subscription. Returns `false` if `id` was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Appends `item`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    fn push(&self, item: T) -> Result<(), CollectionError>;

    /// Removes the first occurrence of `item`, returning whether one was found.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    fn remove_item(&self, item: &T) -> Result<bool, CollectionError>;

    /// Removes every item.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    fn clear(&self) -> Result<(), CollectionError>;
}

struct ListState<T> {
    items: RefCell<Vec<T>>,
    notifier: ChangeNotifier<ChangeEvent<T>>,
}

/// A shared, mutable list that notifies subscribers of every change.
///
/// Cloning an `ObservableList` clones the handle; both handles observe and
/// mutate the same items.
///
/// Every mutation validates its indices before touching the list, then
/// applies the change, then notifies. Subscriber errors are returned to the
/// caller after the mutation has taken effect.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use setview::views::{ChangeEvent, ObservableList};
///
/// let list: ObservableList<i32> = [1, 2].into_iter().collect();
/// let events = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&events);
/// list.subscribe(move |event| sink.borrow_mut().push(event.clone()));
/// list.push(3).unwrap();
///
/// assert_eq!(list.snapshot(), vec![1, 2, 3]);
/// assert_eq!(events.borrow()[0], ChangeEvent::add(Some(2), vec![3]));
/// ```
pub struct ObservableList<T> {
    state: Rc<ListState<T>>,
}

impl<T: Clone + 'static> ObservableList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    fn from_vec(items: Vec<T>) -> Self {
        Self {
            state: Rc::new(ListState {
                items: RefCell::new(items),
                notifier: ChangeNotifier::new(),
            }),
        }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.items.borrow().len()
    }

    /// Returns `true` if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<T, CollectionError> {
        let items = self.state.items.borrow();
        items
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    /// Returns a copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.state.items.borrow().clone()
    }

    /// Appends `item`, emitting one `Add`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    pub fn push(&self, item: T) -> Result<(), CollectionError> {
        let index = {
            let mut items = self.state.items.borrow_mut();
            items.push(item.clone());
            items.len() - 1
        };
        self.emit(ChangeEvent::add(Some(index), vec![item]))
    }

    /// Appends every item of `values` as one batched `Add`.
    ///
    /// Nothing is emitted when `values` is empty.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    pub fn extend<I>(&self, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let index = self.len();
        self.insert_many(index, values)
    }

    /// Inserts `item` at `index`, emitting one `Add`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`, or the
    /// first error raised by a subscriber.
    pub fn insert(&self, index: usize, item: T) -> Result<(), CollectionError> {
        self.insert_many(index, std::iter::once(item))
    }

    /// Inserts `values` contiguously at `index` as one batched `Add`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`, or the
    /// first error raised by a subscriber.
    pub fn insert_many<I>(&self, index: usize, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = values.into_iter().collect();
        {
            let mut items = self.state.items.borrow_mut();
            if index > items.len() {
                return Err(CollectionError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            if added.is_empty() {
                return Ok(());
            }
            items.splice(index..index, added.iter().cloned());
        }
        self.emit(ChangeEvent::add(Some(index), added))
    }

    /// Removes and returns the item at `index`, emitting one `Remove`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`, or the
    /// first error raised by a subscriber.
    pub fn remove_at(&self, index: usize) -> Result<T, CollectionError> {
        let removed = {
            let mut items = self.state.items.borrow_mut();
            if index >= items.len() {
                return Err(CollectionError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.remove(index)
        };
        self.emit(ChangeEvent::remove(Some(index), vec![removed.clone()]))?;
        Ok(removed)
    }

    /// Removes the items in `range` as one batched `Remove`.
    ///
    /// Nothing is emitted when `range` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `range` does not lie
    /// within the list, or the first error raised by a subscriber.
    pub fn remove_range(&self, range: std::ops::Range<usize>) -> Result<Vec<T>, CollectionError> {
        let removed: Vec<T> = {
            let mut items = self.state.items.borrow_mut();
            let len = items.len();
            if range.start > range.end {
                return Err(CollectionError::IndexOutOfRange {
                    index: range.start,
                    len,
                });
            }
            if range.end > len {
                return Err(CollectionError::IndexOutOfRange {
                    index: range.end,
                    len,
                });
            }
            items.drain(range.clone()).collect()
        };
        if !removed.is_empty() {
            self.emit(ChangeEvent::remove(Some(range.start), removed.clone()))?;
        }
        Ok(removed)
    }

    /// Removes every item, emitting `Reset`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    pub fn clear(&self) -> Result<(), CollectionError> {
        self.reset_with(Vec::new())
    }

    /// Replaces the whole contents with `values`, emitting `Reset`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    pub fn reset_with<I>(&self, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let replacement: Vec<T> = values.into_iter().collect();
        *self.state.items.borrow_mut() = replacement;
        self.emit(ChangeEvent::reset())
    }

    /// Overwrites the item at `index`, emitting `Replace`, and returns the
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`, or the
    /// first error raised by a subscriber.
    pub fn set(&self, index: usize, item: T) -> Result<T, CollectionError> {
        let previous = {
            let mut items = self.state.items.borrow_mut();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(CollectionError::IndexOutOfRange { index, len })?;
            std::mem::replace(slot, item.clone())
        };
        self.emit(ChangeEvent::replace(index, vec![previous.clone()], vec![item]))?;
        Ok(previous)
    }

    /// Moves the item at `old_index` to `new_index`, emitting `Move`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if either index is
    /// `>= len`, or the first error raised by a subscriber.
    pub fn move_item(&self, old_index: usize, new_index: usize) -> Result<(), CollectionError> {
        let moved = {
            let mut items = self.state.items.borrow_mut();
            let len = items.len();
            for index in [old_index, new_index] {
                if index >= len {
                    return Err(CollectionError::IndexOutOfRange { index, len });
                }
            }
            let item = items.remove(old_index);
            items.insert(new_index, item.clone());
            item
        };
        self.emit(ChangeEvent::moved(old_index, new_index, vec![moved]))
    }

    /// Registers an infallible change callback.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.state.notifier.subscribe(callback)
    }

    /// Registers a change callback whose error is returned to the mutator.
    pub fn try_subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) -> Result<(), CollectionError> + 'static,
    {
        self.state.notifier.try_subscribe(callback)
    }

    /// Removes a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.notifier.unsubscribe(id)
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.notifier.subscriber_count()
    }

    fn emit(&self, event: ChangeEvent<T>) -> Result<(), CollectionError> {
        tracing::trace!(
            action = %event.action(),
            index = ?event.index(),
            count = event.items().len(),
            "observable list changed"
        );
        self.state.notifier.notify(&event)
    }
}

impl<T: Clone + PartialEq + 'static> ObservableList<T> {
    /// Returns `true` if the list holds `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.state.items.borrow().contains(item)
    }

    /// Returns the position of the first occurrence of `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.state
            .items
            .borrow()
            .iter()
            .position(|candidate| candidate == item)
    }

    /// Removes the first occurrence of `item`, returning whether one was found.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a subscriber.
    pub fn remove_item(&self, item: &T) -> Result<bool, CollectionError> {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ObservableSource<T> for ObservableList<T> {
    fn snapshot(&self) -> Vec<T> {
        Self::snapshot(self)
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
        Self::push(self, item)
    }

    fn remove_item(&self, item: &T) -> Result<bool, CollectionError> {
        Self::remove_item(self, item)
    }

    fn clear(&self) -> Result<(), CollectionError> {
        Self::clear(self)
    }
}

impl<T: Clone + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ObservableList")
            .field("items", &*self.state.items.borrow())
            .field("subscribers", &self.state.notifier.subscriber_count())
            .finish()
    }
}
