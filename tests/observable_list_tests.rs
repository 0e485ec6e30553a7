//! Integration tests for `ObservableList` and its notification stream.

#![cfg(feature = "views")]

use rstest::rstest;
use setview::views::{ChangeEvent, CollectionError, ObservableList, ObservableSource};
use std::cell::RefCell;
use std::rc::Rc;

type EventLog<T> = Rc<RefCell<Vec<ChangeEvent<T>>>>;

fn record<T: Clone + 'static>(list: &ObservableList<T>) -> EventLog<T> {
    let log: EventLog<T> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    list.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

/// Applies `event` to a plain vector the way a consumer would.
fn replay<T: Clone>(state: &mut Vec<T>, event: &ChangeEvent<T>, source: &[T]) {
    match event {
        ChangeEvent::Add {
            index: Some(index),
            items,
        } => {
            state.splice(*index..*index, items.iter().cloned());
        }
        ChangeEvent::Remove {
            index: Some(index),
            items,
        } => {
            state.drain(*index..*index + items.len());
        }
        ChangeEvent::Replace {
            index, new_items, ..
        } => {
            state.splice(*index..*index + new_items.len(), new_items.iter().cloned());
        }
        ChangeEvent::Move {
            old_index,
            new_index,
            ..
        } => {
            let item = state.remove(*old_index);
            state.insert(*new_index, item);
        }
        ChangeEvent::Add { index: None, .. }
        | ChangeEvent::Remove { index: None, .. }
        | ChangeEvent::Reset => *state = source.to_vec(),
    }
}

#[rstest]
fn test_every_mutation_replays_onto_a_mirror() {
    let list: ObservableList<char> = "abcdef".chars().collect();
    let mirror = Rc::new(RefCell::new(list.snapshot()));

    let target = Rc::clone(&mirror);
    let reader = list.clone();
    list.subscribe(move |event| replay(&mut target.borrow_mut(), event, &reader.snapshot()));

    list.push('g').unwrap();
    list.insert(0, 'z').unwrap();
    list.insert_many(3, ['x', 'y']).unwrap();
    list.remove_at(1).unwrap();
    list.remove_range(2..5).unwrap();
    list.set(0, 'q').unwrap();
    list.move_item(0, 3).unwrap();
    list.remove_item(&'g').unwrap();
    list.extend(['m', 'n']).unwrap();

    assert_eq!(*mirror.borrow(), list.snapshot());

    list.reset_with(['r']).unwrap();
    assert_eq!(*mirror.borrow(), vec!['r']);
}

#[rstest]
fn test_handles_share_state() {
    let list: ObservableList<i32> = ObservableList::new();
    let other = list.clone();
    other.push(1).unwrap();
    assert_eq!(list.snapshot(), vec![1]);
    assert!(list.contains(&1));
    assert_eq!(list.index_of(&1), Some(0));
}

#[rstest]
#[case(3, 0)]
#[case(0, 3)]
fn test_move_rejects_out_of_range(#[case] old_index: usize, #[case] new_index: usize) {
    let list: ObservableList<i32> = (0..3).collect();
    let log = record(&list);
    assert_eq!(
        list.move_item(old_index, new_index),
        Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert!(log.borrow().is_empty());
}

#[rstest]
fn test_set_out_of_range_leaves_list_untouched() {
    let list: ObservableList<i32> = (0..2).collect();
    assert_eq!(
        list.set(2, 9),
        Err(CollectionError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(list.snapshot(), vec![0, 1]);
}

#[rstest]
fn test_unsubscribed_callback_is_silent() {
    let list: ObservableList<i32> = ObservableList::new();
    let log: EventLog<i32> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let id = list.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    list.push(1).unwrap();
    assert!(list.unsubscribe(id));
    list.push(2).unwrap();

    assert_eq!(log.borrow().len(), 1);
    assert_eq!(list.subscriber_count(), 0);
}

#[rstest]
fn test_usable_through_the_source_trait() {
    let list: ObservableList<i32> = (1..=3).collect();
    let source: &dyn ObservableSource<i32> = &list;

    source.push(4).unwrap();
    assert!(source.remove_item(&1).unwrap());
    assert_eq!(source.len(), 3);
    assert_eq!(source.snapshot(), vec![2, 3, 4]);

    source.clear().unwrap();
    assert!(source.is_empty());
}

#[rstest]
fn test_nested_mutation_from_subscriber_reports_reentrancy() {
    let list: ObservableList<i32> = ObservableList::new();
    let nested = Rc::new(RefCell::new(None));

    let writer = list.clone();
    let outcome = Rc::clone(&nested);
    list.subscribe(move |event| {
        if let ChangeEvent::Add { items, .. } = event
            && items.first() == Some(&0)
        {
            *outcome.borrow_mut() = Some(writer.push(1));
        }
    });

    list.push(0).unwrap();
    assert_eq!(list.snapshot(), vec![0, 1]);
    assert_eq!(
        *nested.borrow(),
        Some(Err(CollectionError::ReentrantNotification))
    );
}
