//! reqwest-backed [`BoardApi`].

use super::api::{BoardApi, BoardPatch, ItemRef, TaskPositionUpdate};
use super::error::ClientError;
use crate::api::{API_PREFIX, USER_ID_HEADER};
use crate::board::domain::{BoardId, SectionId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Talks to the kanban API over HTTP as a single user.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: reqwest::Client,
    base_url: String,
    user: UserId,
}

#[derive(Serialize)]
struct SectionOrder<'a> {
    sections: &'a [ItemRef],
}

#[derive(Serialize)]
struct BoardOrder<'a> {
    boards: &'a [ItemRef],
}

impl HttpBoardApi {
    /// Creates a client for the server at `base_url`, e.g.
    /// `http://127.0.0.1:5000`.
    #[must_use]
    pub fn new(client: reqwest::Client, base: impl Into<String>, user: UserId) -> Self {
        Self {
            client,
            base_url: base.into().trim_end_matches('/').to_owned(),
            user,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let url = self.url(path);
        debug!(%url, "sending update");
        let response = self
            .client
            .put(&url)
            .header(USER_ID_HEADER, self.user.to_string())
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn refs<I: Copy>(ids: &[I], to_uuid: fn(I) -> uuid::Uuid) -> Vec<ItemRef> {
    ids.iter().map(|id| ItemRef { id: to_uuid(*id) }).collect()
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn update_task_positions(
        &self,
        board: BoardId,
        update: &TaskPositionUpdate,
    ) -> Result<(), ClientError> {
        self.put(&format!("/boards/{board}/tasks/update-position"), update)
            .await
    }

    async fn update_section_positions(
        &self,
        board: BoardId,
        sections: &[SectionId],
    ) -> Result<(), ClientError> {
        let sections = refs(sections, SectionId::into_inner);
        self.put(
            &format!("/boards/{board}/sections/update-position"),
            &SectionOrder {
                sections: &sections,
            },
        )
        .await
    }

    async fn update_board_positions(&self, boards: &[BoardId]) -> Result<(), ClientError> {
        let boards = refs(boards, BoardId::into_inner);
        self.put("/boards", &BoardOrder { boards: &boards }).await
    }

    async fn update_board(&self, board: BoardId, patch: &BoardPatch) -> Result<(), ClientError> {
        self.put(&format!("/boards/{board}"), patch).await
    }
}
