//! Index bookkeeping shared by the transformed views.
//!
//! A view processes a batched source event one item at a time, and each
//! step reports an index relative to the view state *at that step*. These
//! helpers translate such step-relative indices into positions that are
//! valid for re-emitted notifications, and coalesce them into contiguous
//! runs.

/// Direction of a source-index shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// An item was inserted before the shifted positions.
    Up,
    /// An item was removed before the shifted positions.
    Down,
}

/// Applies `shift` to every index yielded by `indices`.
pub fn shift_indices<'a, I>(indices: I, shift: Shift)
where
    I: IntoIterator<Item = &'a mut usize>,
{
    for index in indices {
        match shift {
            Shift::Up => *index += 1,
            Shift::Down => *index = index.saturating_sub(1),
        }
    }
}

/// Converts step-relative insertion positions into final positions.
///
/// `positions[k]` is where the k-th insertion landed in the state left by
/// the previous insertions. Every later insertion at or before an earlier
/// item's position pushes that item one slot to the right.
#[must_use]
pub fn rebase_insertions(positions: &[usize]) -> Vec<usize> {
    let mut finals: Vec<usize> = Vec::with_capacity(positions.len());
    for &position in positions {
        shift_indices(finals.iter_mut().filter(|existing| **existing >= position), Shift::Up);
        finals.push(position);
    }
    finals
}

/// Converts step-relative removal positions into original positions.
///
/// `positions[k]` is where the k-th removed item sat in the state left by
/// the previous removals; the result gives its position before any of the
/// removals happened.
#[must_use]
pub fn rebase_removals(positions: &[usize]) -> Vec<usize> {
    let mut removed: Vec<usize> = Vec::with_capacity(positions.len());
    let mut originals = Vec::with_capacity(positions.len());
    for &position in positions {
        let mut original = position;
        for &earlier in &removed {
            if earlier <= original {
                original += 1;
            } else {
                break;
            }
        }
        let slot = removed.partition_point(|&earlier| earlier < original);
        removed.insert(slot, original);
        originals.push(original);
    }
    originals
}

/// A run of items whose indices are consecutive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup<T> {
    /// Index of the first item, or `None` for items of unknown position.
    pub start: Option<usize>,
    /// The items of the run, in index order.
    pub items: Vec<T>,
}

/// Coalesces indexed items into runs of consecutive indices.
///
/// Entries are stably sorted by index; each run continues while the next
/// index is exactly one more than the previous. Entries whose index is
/// unknown form a single group of their own, which sorts first.
#[must_use]
pub fn group_contiguous<T>(mut entries: Vec<(Option<usize>, T)>) -> Vec<IndexGroup<T>> {
    entries.sort_by_key(|(index, _)| *index);

    let mut groups: Vec<IndexGroup<T>> = Vec::new();
    let mut previous: Option<usize> = None;
    for (index, item) in entries {
        let continues_run = match (groups.last(), index, previous) {
            (Some(group), None, _) => group.start.is_none(),
            (Some(group), Some(current), Some(last)) => {
                group.start.is_some() && current == last + 1
            }
            _ => false,
        };
        match groups.last_mut() {
            Some(group) if continues_run => group.items.push(item),
            _ => groups.push(IndexGroup {
                start: index,
                items: vec![item],
            }),
        }
        previous = index;
    }
    groups
}
