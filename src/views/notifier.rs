//! Synchronous observer registration.
//!
//! [`ChangeNotifier`] keeps an ordered list of callbacks and invokes them in
//! registration order. It is single-threaded and shared through `&self`, so
//! callbacks may subscribe, unsubscribe or trigger further mutations while
//! a notification is running.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A subscriber removed during a notification is not called for the
//!    remainder of that notification.
//! 3. A subscriber added during a notification first hears the next one.
//! 4. The first subscriber error stops the notification and is returned to
//!    the caller that triggered it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::CollectionError;

type Callback<E> = Rc<RefCell<dyn FnMut(&E) -> Result<(), CollectionError>>>;

/// Handle identifying one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// An ordered registry of change callbacks.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use setview::views::ChangeNotifier;
///
/// let notifier = ChangeNotifier::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// let id = notifier.subscribe(move |value: &i32| sink.borrow_mut().push(*value));
///
/// notifier.notify(&1).unwrap();
/// assert!(notifier.unsubscribe(id));
/// notifier.notify(&2).unwrap();
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct ChangeNotifier<E> {
    subscribers: RefCell<Vec<(SubscriptionId, Callback<E>)>>,
    next_id: Cell<u64>,
}

impl<E> ChangeNotifier<E> {
    /// Creates a notifier without subscribers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers an infallible callback.
    pub fn subscribe<F>(&self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        self.try_subscribe(move |event| {
            callback(event);
            Ok(())
        })
    }

    /// Registers a callback whose error aborts the notification.
    pub fn try_subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) -> Result<(), CollectionError> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let callback: Callback<E> = Rc::new(RefCell::new(callback));
        self.subscribers.borrow_mut().push((id, callback));
        id
    }

    /// Removes a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(registered, _)| *registered != id);
        subscribers.len() != before
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Invokes every subscriber with `event`, in registration order.
    ///
    /// A failing subscriber does not stop delivery: every live subscriber
    /// sees the event before the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a subscriber, or
    /// [`CollectionError::ReentrantNotification`] if a subscriber that is
    /// still running would be invoked again.
    pub fn notify(&self, event: &E) -> Result<(), CollectionError> {
        let snapshot: Vec<(SubscriptionId, Callback<E>)> = self.subscribers.borrow().clone();
        let mut first_error = None;
        for (id, callback) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            let outcome = callback
                .try_borrow_mut()
                .map_err(|_| CollectionError::ReentrantNotification)
                .and_then(|mut callback| (&mut *callback)(event));
            if let Err(error) = outcome {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|(registered, _)| *registered == id)
    }
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Rc::clone(&log), log)
    }

    #[rstest]
    fn test_notifies_in_registration_order() {
        let notifier: ChangeNotifier<i32> = ChangeNotifier::new();
        let (log, sink) = recorder();

        let first = Rc::clone(&sink);
        notifier.subscribe(move |value| first.borrow_mut().push(format!("first {value}")));
        let second = Rc::clone(&sink);
        notifier.subscribe(move |value| second.borrow_mut().push(format!("second {value}")));

        notifier.notify(&7).unwrap();
        assert_eq!(*log.borrow(), vec!["first 7", "second 7"]);
    }

    #[rstest]
    fn test_unsubscribe_unknown_id_returns_false() {
        let notifier: ChangeNotifier<i32> = ChangeNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[rstest]
    fn test_error_is_returned_after_every_subscriber_ran() {
        let notifier: ChangeNotifier<i32> = ChangeNotifier::new();
        let (log, sink) = recorder();

        notifier.try_subscribe(|_| Err(CollectionError::ReentrantNotification));
        notifier.try_subscribe(|_| {
            Err(CollectionError::UnsupportedMutation {
                operation: "insert",
            })
        });
        notifier.subscribe(move |value| sink.borrow_mut().push(format!("late {value}")));

        assert_eq!(
            notifier.notify(&1),
            Err(CollectionError::ReentrantNotification)
        );
        assert_eq!(*log.borrow(), vec!["late 1"]);
    }

    #[rstest]
    fn test_subscriber_removed_mid_notification_is_skipped() {
        let notifier: Rc<ChangeNotifier<i32>> = Rc::new(ChangeNotifier::new());
        let (log, sink) = recorder();
        let victim = Rc::new(Cell::new(None::<SubscriptionId>));

        let remover_notifier = Rc::clone(&notifier);
        let remover_victim = Rc::clone(&victim);
        notifier.subscribe(move |_| {
            if let Some(id) = remover_victim.get() {
                remover_notifier.unsubscribe(id);
            }
        });
        let id = notifier.subscribe(move |_| sink.borrow_mut().push("victim".to_string()));
        victim.set(Some(id));

        notifier.notify(&1).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[rstest]
    fn test_reentrant_notification_is_reported() {
        let notifier: Rc<ChangeNotifier<i32>> = Rc::new(ChangeNotifier::new());
        let inner = Rc::clone(&notifier);
        notifier.try_subscribe(move |value| {
            if *value == 0 {
                inner.notify(&1)
            } else {
                Ok(())
            }
        });

        assert_eq!(
            notifier.notify(&0),
            Err(CollectionError::ReentrantNotification)
        );
    }
}
