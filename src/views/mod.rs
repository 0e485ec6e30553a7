//! Live, incrementally maintained views over observable lists.
//!
//! An [`ObservableList`] reports every mutation as a [`ChangeEvent`]. A
//! [`TransformedList`] subscribes to such a source, folds each event into a
//! [`Transformation`] and re-emits the resulting view changes, so the view
//! can itself be observed or used as the source of another view.
//!
//! Two transformations are provided:
//!
//! - [`FilteredList`]: the source items satisfying a predicate
//! - [`SortedList`]: the source items stably ordered by a key
//!
//! Views are single-threaded. All notifications are delivered synchronously
//! on the thread performing the source mutation, and errors raised while
//! handling them are returned to that mutation's caller.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use setview::views::{ChangeEvent, FilteredList, ObservableList};
//!
//! let source: ObservableList<i32> = (1..=5).collect();
//! let even = FilteredList::new(source.clone(), |value: &i32| value % 2 == 0);
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&events);
//! even.subscribe(move |event| sink.borrow_mut().push(event.clone()));
//!
//! source.push(6).unwrap();
//! source.remove_item(&2).unwrap();
//!
//! assert_eq!(even.to_vec(), vec![4, 6]);
//! assert_eq!(
//!     *events.borrow(),
//!     vec![
//!         ChangeEvent::add(Some(2), vec![6]),
//!         ChangeEvent::remove(Some(0), vec![2]),
//!     ]
//! );
//! ```

mod change;
mod error;
mod filtered;
mod index;
mod notifier;
mod observable;
mod sorted;
mod transformed;

pub use change::{ChangeAction, ChangeEvent};
pub use error::CollectionError;
pub use filtered::{FilterTransformation, FilteredList};
pub use notifier::{ChangeNotifier, SubscriptionId};
pub use observable::{ChangeCallback, ObservableList, ObservableSource};
pub use sorted::{SortTransformation, SortedList};
pub use transformed::{ModifiedResult, Transformation, TransformedList};

static_assertions::assert_not_impl_any!(ObservableList<i32>: Send, Sync);
static_assertions::assert_impl_all!(ChangeEvent<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(CollectionError: Copy, std::error::Error);
