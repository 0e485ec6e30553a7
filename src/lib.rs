//! # setview
//!
//! Set algebra over ordered domains, and live filtered/sorted views over
//! observable lists.
//!
//! ## Overview
//!
//! - **Sets**: a closed family of set representations (empty, complete,
//!   finite inclusive/exclusive lists, ranges, composites) with a symmetric
//!   union/intersect/subtract/inverse algebra that always returns a set
//! - **Views**: observable lists and incrementally maintained derived views
//!   that re-emit the minimal change notifications for their own contents
//!
//! ## Feature Flags
//!
//! - `sets`: Set algebra (enabled by default)
//! - `views`: Observable lists and transformed views (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for set values
//! - `arc`: Share set storage through `Arc`, making sets `Send + Sync`
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use setview::prelude::*;
//!
//! let small = Set::range(Range::closed(0, 9).unwrap());
//! let odd = Set::inclusive([1, 3, 5, 7, 9, 11]);
//! assert_eq!(small.intersect(&odd), Set::inclusive([1, 3, 5, 7, 9]));
//!
//! let source: ObservableList<i32> = [4, 1, 3].into_iter().collect();
//! let ordered = SortedList::new(source.clone(), |value: &i32| *value);
//! source.push(2).unwrap();
//! assert_eq!(ordered.to_vec(), vec![1, 2, 3, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the public surface of every enabled module.
///
/// # Usage
///
/// ```rust
/// use setview::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "sets")]
    pub use crate::sets::*;

    #[cfg(feature = "views")]
    pub use crate::views::*;
}

#[cfg(feature = "sets")]
pub mod sets;

#[cfg(feature = "views")]
pub mod views;
