// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `sightline_model` crate.
//!
//! These exercise `VecModel<T>` mutations and the events they broadcast, with a focus on
//! rejected mutations leaving both the rows and the event stream untouched.

use sightline_model::{Model, ModelError, ModelEvent, VecModel};

fn drain(sub: &sightline_model::ModelSubscription) -> Vec<ModelEvent> {
    sub.drain().collect()
}

#[test]
fn empty_model_basics() {
    let model = VecModel::<u32>::new();
    assert!(model.is_empty());
    assert_eq!(model.row_count(), 0);
    assert_eq!(model.row_data(0), None);
    assert_eq!(model.notify().revision(), 0);
}

#[test]
fn insert_and_remove_broadcast_index_events() {
    let mut model: VecModel<u32> = (0..5).collect();
    let sub = model.subscribe();

    model.insert(2, 100).unwrap();
    assert_eq!(model.as_slice(), &[0, 1, 100, 2, 3, 4]);
    assert_eq!(model.remove(0), Ok(0));
    model.push(7);

    assert_eq!(
        drain(&sub),
        [
            ModelEvent::Inserted { index: 2, count: 1 },
            ModelEvent::Removed { index: 0, count: 1 },
            ModelEvent::Inserted { index: 5, count: 1 },
        ]
    );
    assert_eq!(model.notify().revision(), 3);
}

#[test]
fn batch_mutations_are_single_events() {
    let mut model: VecModel<u32> = (0..4).collect();
    let sub = model.subscribe();

    model.insert_many(1, [10, 11, 12]).unwrap();
    assert_eq!(model.as_slice(), &[0, 10, 11, 12, 1, 2, 3]);
    model.remove_range(4, 3).unwrap();
    assert_eq!(model.as_slice(), &[0, 10, 11, 12]);

    assert_eq!(
        drain(&sub),
        [
            ModelEvent::Inserted { index: 1, count: 3 },
            ModelEvent::Removed { index: 4, count: 3 },
        ]
    );

    // Empty batches are not changes.
    model.insert_many(0, []).unwrap();
    model.remove_range(2, 0).unwrap();
    assert!(sub.is_empty());
}

#[test]
fn updates_broadcast_changed() {
    let mut model = VecModel::from(vec![String::from("a"), String::from("b")]);
    let sub = model.subscribe();

    let old = model.set_row_data(1, String::from("B")).unwrap();
    assert_eq!(old, "b");
    model.update(0, |row| row.push('!')).unwrap();

    assert_eq!(model.row_data(0).map(String::as_str), Some("a!"));
    assert_eq!(
        drain(&sub),
        [
            ModelEvent::Changed { index: 1 },
            ModelEvent::Changed { index: 0 },
        ]
    );
}

#[test]
fn out_of_range_mutations_are_rejected_without_events() {
    let mut model: VecModel<u32> = (0..3).collect();
    let sub = model.subscribe();

    let err = ModelError::IndexOutOfRange { index: 3, len: 3 };
    assert_eq!(model.remove(3), Err(err.clone()));
    assert_eq!(model.set_row_data(3, 9), Err(err.clone()));
    assert_eq!(model.update(3, |_| ()), Err(err));
    assert_eq!(
        model.insert(4, 9),
        Err(ModelError::IndexOutOfRange { index: 4, len: 3 })
    );
    assert_eq!(
        model.remove_range(2, 2),
        Err(ModelError::IndexOutOfRange { index: 2, len: 3 })
    );
    assert_eq!(
        model.remove_range(1, usize::MAX),
        Err(ModelError::IndexOutOfRange { index: 1, len: 3 })
    );

    assert_eq!(model.as_slice(), &[0, 1, 2]);
    assert!(sub.is_empty());
    assert_eq!(model.notify().revision(), 0);
}

#[test]
fn reset_supersedes_pending_events() {
    let mut model: VecModel<u32> = (0..3).collect();
    let sub = model.subscribe();

    model.push(3);
    model.set_vec(vec![9, 8]);
    assert_eq!(drain(&sub), [ModelEvent::Reset]);

    model.clear();
    assert!(model.is_empty());
    assert_eq!(drain(&sub), [ModelEvent::Reset]);
}

#[test]
fn error_messages_name_the_row() {
    let err = ModelError::IndexOutOfRange { index: 5, len: 2 };
    assert_eq!(
        err.to_string(),
        "row 5 is out of range for a model of 2 rows"
    );
}
