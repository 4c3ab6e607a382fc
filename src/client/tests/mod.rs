//! Tests for the client-side board state.

mod drag_tests;
mod view_tests;

use crate::board::domain::SectionId;
use crate::client::{Column, DragEnd, DragLocation, TaskCard};
use crate::task::domain::TaskId;

pub(super) fn card(title: &str) -> TaskCard {
    TaskCard {
        id: TaskId::new(),
        title: title.to_owned(),
    }
}

pub(super) fn column(title: &str, tasks: &[&str]) -> Column {
    Column {
        id: SectionId::new(),
        title: title.to_owned(),
        tasks: tasks.iter().map(|task| card(task)).collect(),
    }
}

pub(super) fn titles(column: &Column) -> Vec<&str> {
    column.tasks.iter().map(|task| task.title.as_str()).collect()
}

pub(super) fn drag<P: Copy>(from: (P, usize), to: Option<(P, usize)>) -> DragEnd<P> {
    DragEnd {
        source: DragLocation {
            parent: from.0,
            index: from.1,
        },
        destination: to.map(|(parent, index)| DragLocation { parent, index }),
    }
}
