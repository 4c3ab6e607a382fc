//! Client-side board state with optimistic drag-and-drop.
//!
//! The client mirrors the server's ordered lists. On drag end it splices the
//! local lists at once, sends the resulting order through [`BoardApi`], and
//! then either commits the new lists or reverts to the last committed ones.
//! Title and description edits go through [`BoardEditor`], which debounces
//! writes so only the last value typed within the delay is sent.

mod api;
mod columns;
mod debounce;
mod drag;
mod editor;
mod error;
mod http;
mod optimistic;
mod view;

pub use api::{BoardApi, BoardPatch, ItemRef, TaskPositionUpdate};
pub use columns::{BoardCard, Column, TaskCard};
pub use debounce::{AUTOSAVE_DELAY, Debouncer};
pub use drag::{DragEnd, DragLocation, ListDrop, TaskDrop, plan_list_drop, plan_task_drop};
pub use editor::{BoardEditor, EditField};
pub use error::ClientError;
pub use http::HttpBoardApi;
pub use optimistic::Optimistic;
pub use view::{BoardView, DropOutcome, SidebarView};

#[cfg(test)]
pub use api::MockBoardApi;

#[cfg(test)]
mod tests;
