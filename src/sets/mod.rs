//! Set algebra over ordered domains.
//!
//! This module provides a small, closed family of set representations and
//! a symmetric operator algebra over them:
//!
//! - [`Set::Empty`] and [`Set::Complete`]: contain nothing / everything
//! - [`Set::Inclusive`]: a finite list of members
//! - [`Set::Exclusive`]: everything except a finite list
//! - [`Set::RangeInclusive`]: everything within a [`Range`]
//! - [`Set::Composite`]: the fallback for pairs without a closed form
//!
//! Every operator result is itself a [`Set`] obeying the same membership
//! contract:
//!
//! - `a.union(&b).contains(x) == a.contains(x) || b.contains(x)`
//! - `a.intersect(&b).contains(x) == a.contains(x) && b.contains(x)`
//! - `a.subtract(&b).contains(x) == a.contains(x) && !b.contains(x)`
//! - `a.inverse().contains(x) == !a.contains(x)`
//!
//! # Examples
//!
//! ```rust
//! use setview::sets::{MultiSubtract, Range, Set};
//!
//! let weekdays = Set::inclusive([1, 2, 3, 4, 5]);
//! let holidays = Set::inclusive([3]);
//! let working = weekdays.subtract(&holidays);
//! assert_eq!(working, Set::inclusive([1, 2, 4, 5]));
//!
//! let office_hours = Set::range(Range::closed(9, 17).unwrap());
//! let lunch = Set::range(Range::open(12, 13).unwrap());
//! let pieces = office_hours.subtract_multi(&lunch);
//! assert_eq!(pieces.len(), 2);
//! assert!(pieces[0].contains(&12));
//! assert!(pieces[1].contains(&13));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted pointer used to share large element lists.
///
/// When the `arc` feature is enabled this is `std::sync::Arc`, which makes
/// sets `Send + Sync`. Otherwise it is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod element_list;
mod error;
mod multi;
mod operators;
mod range;
mod set;

pub use element_list::ElementList;
pub use error::SetError;
pub use multi::{MultiSubtract, SetCollection};
pub use operators::SetOperator;
pub use range::{Range, RangePieces};
pub use set::{Composite, Set, SetKind};

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Set<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Set<i32>: Send, Sync);

static_assertions::assert_impl_all!(Range<i32>: Send, Sync, Clone);
