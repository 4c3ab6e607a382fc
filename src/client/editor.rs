//! Debounced autosave of board title and description.

use super::api::{BoardApi, BoardPatch};
use super::debounce::{AUTOSAVE_DELAY, Debouncer};
use crate::board::domain::BoardId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Editable board field. Each field debounces independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    /// Board title.
    Title,
    /// Board description.
    Description,
}

/// Sends board edits after the user stops typing.
pub struct BoardEditor<A: BoardApi + ?Sized + 'static> {
    api: Arc<A>,
    board: BoardId,
    debouncer: Debouncer<EditField>,
}

impl<A: BoardApi + ?Sized + 'static> BoardEditor<A> {
    /// Creates an editor with the standard autosave delay.
    #[must_use]
    pub fn new(api: Arc<A>, board: BoardId) -> Self {
        Self::with_delay(api, board, AUTOSAVE_DELAY)
    }

    /// Creates an editor with a custom quiet period.
    #[must_use]
    pub fn with_delay(api: Arc<A>, board: BoardId, delay: Duration) -> Self {
        Self {
            api,
            board,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Records a title keystroke.
    pub fn edit_title(&mut self, title: impl Into<String>) {
        let patch = BoardPatch {
            title: Some(title.into()),
            ..BoardPatch::default()
        };
        self.schedule(EditField::Title, patch);
    }

    /// Records a description keystroke.
    pub fn edit_description(&mut self, description: impl Into<String>) {
        let patch = BoardPatch {
            description: Some(description.into()),
            ..BoardPatch::default()
        };
        self.schedule(EditField::Description, patch);
    }

    /// Drops the unsent edit for `field`.
    pub fn discard(&mut self, field: EditField) -> bool {
        self.debouncer.cancel(&field)
    }

    /// Waits until every scheduled save has been sent.
    pub async fn flush(&mut self) {
        self.debouncer.flush().await;
    }

    fn schedule(&mut self, field: EditField, patch: BoardPatch) {
        let api = Arc::clone(&self.api);
        let board = self.board;
        self.debouncer.schedule(field, async move {
            match api.update_board(board, &patch).await {
                Ok(()) => debug!(%board, ?field, "autosaved board"),
                Err(error) => warn!(%board, ?field, %error, "autosave failed"),
            }
        });
    }
}
