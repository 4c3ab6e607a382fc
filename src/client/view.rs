//! Board and sidebar views that apply drops optimistically.

use super::api::{BoardApi, TaskPositionUpdate};
use super::columns::{BoardCard, Column};
use super::drag::{DragEnd, plan_list_drop, plan_task_drop};
use super::error::ClientError;
use super::optimistic::Optimistic;
use crate::board::domain::{BoardId, SectionId};
use crate::user::domain::UserId;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a drop did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drag ended outside any list; nothing changed.
    Ignored,
    /// The server accepted the new order and it is now committed.
    Committed,
}

/// The columns of one open board.
pub struct BoardView<A: BoardApi + ?Sized> {
    api: Arc<A>,
    board: BoardId,
    columns: Optimistic<Vec<Column>>,
}

impl<A: BoardApi + ?Sized> BoardView<A> {
    /// Creates a view over columns fetched from the server.
    #[must_use]
    pub const fn new(api: Arc<A>, board: BoardId, columns: Vec<Column>) -> Self {
        Self {
            api,
            board,
            columns: Optimistic::new(columns),
        }
    }

    /// Columns to render.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.columns.current()
    }

    /// Returns `true` while a drop awaits the server.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.columns.is_pending()
    }

    /// Replaces local state with a fresh server copy.
    pub fn refresh(&mut self, columns: Vec<Column>) {
        self.columns.reset(columns);
    }

    /// Splices a task drop into the pending columns and returns the request
    /// that persists it, or `None` when the drag had no destination.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the drag does not fit the current
    /// columns; local state is left untouched.
    pub fn stage_task_drop(
        &mut self,
        drag: &DragEnd<SectionId>,
    ) -> Result<Option<TaskPositionUpdate>, ClientError> {
        let Some(planned) = plan_task_drop(self.columns.current(), drag)? else {
            return Ok(None);
        };
        self.columns.stage(planned.columns);
        Ok(Some(planned.update))
    }

    /// Commits or reverts the pending columns according to the server's
    /// answer, passing the answer through.
    ///
    /// # Errors
    ///
    /// Returns the error it was given after reverting.
    pub fn settle(
        &mut self,
        result: Result<(), ClientError>,
    ) -> Result<DropOutcome, ClientError> {
        settle(&mut self.columns, result)
    }

    /// Applies a task drop optimistically and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the drag is invalid or the server
    /// rejects the new order. In the latter case the columns are reverted.
    pub async fn drop_task(
        &mut self,
        drag: &DragEnd<SectionId>,
    ) -> Result<DropOutcome, ClientError> {
        let Some(update) = self.stage_task_drop(drag)? else {
            return Ok(DropOutcome::Ignored);
        };
        let result = self.api.update_task_positions(self.board, &update).await;
        self.settle(result)
    }

    /// Applies a column drop optimistically and persists the new section
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the drag is invalid or the server
    /// rejects the new order. In the latter case the columns are reverted.
    pub async fn drop_section(
        &mut self,
        drag: &DragEnd<BoardId>,
    ) -> Result<DropOutcome, ClientError> {
        let Some(planned) = plan_list_drop(self.columns.current(), drag)? else {
            return Ok(DropOutcome::Ignored);
        };
        let order: Vec<SectionId> = planned.items.iter().map(|column| column.id).collect();
        self.columns.stage(planned.items);
        let result = self.api.update_section_positions(self.board, &order).await;
        self.settle(result)
    }
}

/// The signed-in user's board list.
pub struct SidebarView<A: BoardApi + ?Sized> {
    api: Arc<A>,
    boards: Optimistic<Vec<BoardCard>>,
}

impl<A: BoardApi + ?Sized> SidebarView<A> {
    /// Creates a view over boards fetched from the server.
    #[must_use]
    pub const fn new(api: Arc<A>, boards: Vec<BoardCard>) -> Self {
        Self {
            api,
            boards: Optimistic::new(boards),
        }
    }

    /// Boards to render.
    #[must_use]
    pub fn boards(&self) -> &[BoardCard] {
        self.boards.current()
    }

    /// Replaces local state with a fresh server copy.
    pub fn refresh(&mut self, boards: Vec<BoardCard>) {
        self.boards.reset(boards);
    }

    /// Applies a board drop optimistically and persists the new order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the drag is invalid or the server
    /// rejects the new order. In the latter case the list is reverted.
    pub async fn drop_board(
        &mut self,
        drag: &DragEnd<UserId>,
    ) -> Result<DropOutcome, ClientError> {
        let Some(planned) = plan_list_drop(self.boards.current(), drag)? else {
            return Ok(DropOutcome::Ignored);
        };
        let order: Vec<BoardId> = planned.items.iter().map(|board| board.id).collect();
        self.boards.stage(planned.items);
        let result = self.api.update_board_positions(&order).await;
        settle(&mut self.boards, result)
    }
}

fn settle<T>(
    state: &mut Optimistic<T>,
    result: Result<(), ClientError>,
) -> Result<DropOutcome, ClientError> {
    match result {
        Ok(()) => {
            state.commit();
            debug!("drop committed");
            Ok(DropOutcome::Committed)
        }
        Err(error) => {
            state.revert();
            warn!(%error, "drop rejected; reverted local order");
            Err(error)
        }
    }
}
