//! Pure drop planning: from a drag result to new local lists and the
//! request that persists them.

use super::api::{ItemRef, TaskPositionUpdate};
use super::columns::{Column, TaskCard};
use super::error::ClientError;
use crate::board::domain::SectionId;
use crate::ordering::{OrderingError, move_between, reorder};

/// Where a drag started or ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation<P> {
    /// Group the item sits in.
    pub parent: P,
    /// Index within that group.
    pub index: usize,
}

/// The result of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd<P> {
    /// Where the item was picked up.
    pub source: DragLocation<P>,
    /// Where it was dropped, if on a valid target.
    pub destination: Option<DragLocation<P>>,
}

/// A planned task drop: the new columns and the request persisting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDrop {
    /// Columns after the splice.
    pub columns: Vec<Column>,
    /// Body for the position update.
    pub update: TaskPositionUpdate,
}

/// A planned single-list drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDrop<T> {
    /// List after the splice.
    pub items: Vec<T>,
}

/// Plans a task drop across the board's columns.
///
/// Returns `Ok(None)` when the drag has no destination.
///
/// # Errors
///
/// Returns [`ClientError::UnknownSection`] when a location names a column
/// that is not on the board, or [`ClientError::Ordering`] when an index is
/// outside its column.
pub fn plan_task_drop(
    columns: &[Column],
    drag: &DragEnd<SectionId>,
) -> Result<Option<TaskDrop>, ClientError> {
    let Some(destination) = drag.destination else {
        return Ok(None);
    };
    let source_index = column_index(columns, drag.source.parent)?;
    let destination_index = column_index(columns, destination.parent)?;
    let mut next = columns.to_vec();

    if source_index == destination_index {
        if let Some(column) = next.get_mut(source_index) {
            column.tasks = reorder(&column.tasks, drag.source.index, destination.index)?;
        }
    } else {
        let (remaining, extended) = move_between(
            tasks_of(columns, source_index),
            tasks_of(columns, destination_index),
            drag.source.index,
            destination.index,
        )?;
        if let Some(column) = next.get_mut(source_index) {
            column.tasks = remaining;
        }
        if let Some(column) = next.get_mut(destination_index) {
            column.tasks = extended;
        }
    }

    let update = TaskPositionUpdate {
        resource_list: refs(&next, source_index),
        destination_list: refs(&next, destination_index),
        resource_section_id: drag.source.parent,
        destination_section_id: destination.parent,
    };
    Ok(Some(TaskDrop {
        columns: next,
        update,
    }))
}

/// Plans a drop within a single list such as the sidebar or a board's
/// columns. Returns `Ok(None)` when the drag has no destination.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfBounds`] when either index is outside
/// the list.
pub fn plan_list_drop<T: Clone, P>(
    items: &[T],
    drag: &DragEnd<P>,
) -> Result<Option<ListDrop<T>>, OrderingError> {
    let Some(destination) = drag.destination.as_ref() else {
        return Ok(None);
    };
    let reordered = reorder(items, drag.source.index, destination.index)?;
    Ok(Some(ListDrop { items: reordered }))
}

fn column_index(columns: &[Column], id: SectionId) -> Result<usize, ClientError> {
    columns
        .iter()
        .position(|column| column.id == id)
        .ok_or(ClientError::UnknownSection(id))
}

fn tasks_of(columns: &[Column], index: usize) -> &[TaskCard] {
    columns
        .get(index)
        .map_or(&[][..], |column| column.tasks.as_slice())
}

fn refs(columns: &[Column], index: usize) -> Vec<ItemRef> {
    columns
        .get(index)
        .map(|column| {
            column
                .tasks
                .iter()
                .map(|task| ItemRef {
                    id: task.id.into_inner(),
                })
                .collect()
        })
        .unwrap_or_default()
}
