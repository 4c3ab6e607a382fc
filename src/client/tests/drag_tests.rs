//! Tests for drop planning.

use super::{column, drag, titles};
use crate::client::{ClientError, ItemRef, plan_list_drop, plan_task_drop};
use crate::ordering::OrderingError;
use crate::user::domain::UserId;
use rstest::rstest;

#[rstest]
fn drop_outside_any_list_is_ignored() {
    let columns = vec![column("Todo", &["a", "b"])];
    let todo = columns[0].id;

    let planned = plan_task_drop(&columns, &drag((todo, 0), None)).expect("plan");

    assert!(planned.is_none());
}

#[rstest]
fn same_column_drop_reorders_in_place() {
    let columns = vec![column("Todo", &["a", "b", "c"]), column("Done", &["d"])];
    let todo = columns[0].id;

    let planned = plan_task_drop(&columns, &drag((todo, 2), Some((todo, 0))))
        .expect("plan")
        .expect("drop has a destination");

    assert_eq!(titles(&planned.columns[0]), vec!["c", "a", "b"]);
    assert_eq!(titles(&planned.columns[1]), vec!["d"]);
    assert_eq!(planned.update.resource_section_id, todo);
    assert_eq!(planned.update.destination_section_id, todo);
    assert_eq!(planned.update.resource_list, planned.update.destination_list);
}

#[rstest]
fn cross_column_drop_moves_the_card() {
    let columns = vec![column("Todo", &["a", "b"]), column("Done", &["c"])];
    let (todo, done) = (columns[0].id, columns[1].id);
    let moved = columns[0].tasks[0].id;

    let planned = plan_task_drop(&columns, &drag((todo, 0), Some((done, 1))))
        .expect("plan")
        .expect("drop has a destination");

    assert_eq!(titles(&planned.columns[0]), vec!["b"]);
    assert_eq!(titles(&planned.columns[1]), vec!["c", "a"]);
    assert_eq!(
        planned.update.resource_list,
        vec![ItemRef {
            id: columns[0].tasks[1].id.into_inner()
        }]
    );
    assert_eq!(
        planned.update.destination_list.last(),
        Some(&ItemRef {
            id: moved.into_inner()
        })
    );
    assert_eq!(planned.update.destination_section_id, done);
}

#[rstest]
fn unknown_column_is_rejected() {
    let columns = vec![column("Todo", &["a"])];
    let stranger = column("Elsewhere", &[]).id;

    let err = plan_task_drop(&columns, &drag((columns[0].id, 0), Some((stranger, 0))))
        .expect_err("column is not on the board");

    assert!(matches!(err, ClientError::UnknownSection(id) if id == stranger));
}

#[rstest]
fn out_of_range_index_is_rejected() {
    let columns = vec![column("Todo", &["a"])];
    let todo = columns[0].id;

    let err = plan_task_drop(&columns, &drag((todo, 3), Some((todo, 0))))
        .expect_err("source index is past the end");

    assert!(matches!(
        err,
        ClientError::Ordering(OrderingError::IndexOutOfBounds { index: 3, len: 1 })
    ));
}

#[rstest]
#[case(0, 2, vec!["b", "c", "a"])]
#[case(2, 0, vec!["c", "a", "b"])]
#[case(1, 1, vec!["a", "b", "c"])]
fn list_drop_reorders(#[case] from: usize, #[case] to: usize, #[case] expected: Vec<&str>) {
    let owner = UserId::new();
    let items = vec!["a", "b", "c"];

    let planned = plan_list_drop(&items, &drag((owner, from), Some((owner, to))))
        .expect("plan")
        .expect("drop has a destination");

    assert_eq!(planned.items, expected);
}

#[rstest]
fn list_drop_without_destination_is_ignored() {
    let owner = UserId::new();

    let planned = plan_list_drop(&["a", "b"], &drag((owner, 0), None)).expect("plan");

    assert!(planned.is_none());
}
