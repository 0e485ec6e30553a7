//! Structured change notifications.
//!
//! A [`ChangeEvent`] describes one mutation of an observable sequence.
//! `Add` and `Remove` carry a contiguous batch of items sharing one
//! starting index; the index is `None` when the sender cannot tell where
//! the batch sits.

/// The kind of a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// Items were inserted.
    Add,
    /// Items were removed.
    Remove,
    /// Items were overwritten in place.
    Replace,
    /// An item changed position.
    Move,
    /// The contents changed wholesale and must be re-read.
    Reset,
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Move => "move",
            Self::Reset => "reset",
        };
        formatter.write_str(name)
    }
}

/// One mutation of an observable sequence.
///
/// # Examples
///
/// ```rust
/// use setview::views::{ChangeAction, ChangeEvent};
///
/// let event = ChangeEvent::Add { index: Some(2), items: vec!['a', 'b'] };
/// assert_eq!(event.action(), ChangeAction::Add);
/// assert_eq!(event.index(), Some(2));
/// assert_eq!(event.items(), &['a', 'b']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent<T> {
    /// `items` were inserted starting at `index`.
    Add {
        /// Position of the first inserted item, if known.
        index: Option<usize>,
        /// The inserted items, in order.
        items: Vec<T>,
    },
    /// `items` were removed starting at `index`.
    Remove {
        /// Position the first removed item occupied, if known.
        index: Option<usize>,
        /// The removed items, in order.
        items: Vec<T>,
    },
    /// `old_items` starting at `index` were overwritten by `new_items`.
    Replace {
        /// Position of the first replaced item.
        index: usize,
        /// The values before the write.
        old_items: Vec<T>,
        /// The values after the write.
        new_items: Vec<T>,
    },
    /// `items` moved from `old_index` to `new_index`.
    Move {
        /// Position before the move.
        old_index: usize,
        /// Position after the move.
        new_index: usize,
        /// The moved items.
        items: Vec<T>,
    },
    /// The sequence changed wholesale.
    Reset,
}

impl<T> ChangeEvent<T> {
    /// Creates an `Add` event.
    #[must_use]
    pub const fn add(index: Option<usize>, items: Vec<T>) -> Self {
        Self::Add { index, items }
    }

    /// Creates a `Remove` event.
    #[must_use]
    pub const fn remove(index: Option<usize>, items: Vec<T>) -> Self {
        Self::Remove { index, items }
    }

    /// Creates a `Replace` event.
    #[must_use]
    pub const fn replace(index: usize, old_items: Vec<T>, new_items: Vec<T>) -> Self {
        Self::Replace {
            index,
            old_items,
            new_items,
        }
    }

    /// Creates a `Move` event.
    #[must_use]
    pub const fn moved(old_index: usize, new_index: usize, items: Vec<T>) -> Self {
        Self::Move {
            old_index,
            new_index,
            items,
        }
    }

    /// Creates a `Reset` event.
    #[must_use]
    pub const fn reset() -> Self {
        Self::Reset
    }

    /// Returns the kind of the event.
    #[must_use]
    pub const fn action(&self) -> ChangeAction {
        match self {
            Self::Add { .. } => ChangeAction::Add,
            Self::Remove { .. } => ChangeAction::Remove,
            Self::Replace { .. } => ChangeAction::Replace,
            Self::Move { .. } => ChangeAction::Move,
            Self::Reset => ChangeAction::Reset,
        }
    }

    /// Returns the starting index of the affected batch, if any.
    ///
    /// For `Move` this is the new position.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Add { index, .. } | Self::Remove { index, .. } => *index,
            Self::Replace { index, .. } => Some(*index),
            Self::Move { new_index, .. } => Some(*new_index),
            Self::Reset => None,
        }
    }

    /// Returns the items the event introduces or removes.
    ///
    /// For `Replace` these are the new items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Add { items, .. } | Self::Remove { items, .. } | Self::Move { items, .. } => {
                items
            }
            Self::Replace { new_items, .. } => new_items,
            Self::Reset => &[],
        }
    }
}
