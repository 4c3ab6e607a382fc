//! Task routes under `/boards/{board_id}/tasks` plus `/tasks/assigned`.

use super::{ApiJson, BoardPath, DELETED, UPDATED, parse_id, parse_ordered};
use crate::api::dto::{
    CreateTaskBody, PopulatedTaskResponse, UpdateTaskBody, UpdateTaskPositionsRequest,
};
use crate::api::{ApiError, AppState, CurrentUser};
use crate::board::domain::{BoardId, SectionId};
use crate::task::domain::{TaskChanges, TaskId};
use crate::task::services::{CreateTaskRequest, TaskMove};
use crate::user::domain::UserId;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

/// Path parameters for `/boards/{board_id}/tasks/{task_id}`.
#[derive(Debug, Deserialize)]
pub struct TaskPath {
    /// Board identifier.
    pub board_id: String,
    /// Task identifier.
    pub task_id: String,
}

impl TaskPath {
    fn parse(&self) -> Result<(BoardId, TaskId), ApiError> {
        Ok((
            parse_id("boardId", &self.board_id, BoardId::from_uuid)?,
            parse_id("taskId", &self.task_id, TaskId::from_uuid)?,
        ))
    }
}

/// `PUT /boards/{board_id}/tasks/update-position`: persists one drag.
pub async fn update_positions(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
    ApiJson(body): ApiJson<UpdateTaskPositionsRequest>,
) -> Result<Json<&'static str>, ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let request = TaskMove {
        resource_section: parse_id(
            "resourceSectionId",
            &body.resource_section_id,
            SectionId::from_uuid,
        )?,
        resource: parse_ordered("resourceList", &body.resource_list, TaskId::from_uuid)?,
        destination_section: parse_id(
            "destinationSectionId",
            &body.destination_section_id,
            SectionId::from_uuid,
        )?,
        destination: parse_ordered("destinationList", &body.destination_list, TaskId::from_uuid)?,
    };
    state
        .tasks
        .update_positions(caller.actor(), board_id, &request)
        .await?;
    Ok(Json(UPDATED))
}

/// `POST /boards/{board_id}/tasks`
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
    ApiJson(body): ApiJson<CreateTaskBody>,
) -> Result<(StatusCode, Json<PopulatedTaskResponse>), ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let section_id = parse_id("sectionId", &body.section_id, SectionId::from_uuid)?;
    let mut request = CreateTaskRequest::new(section_id);
    if let Some(raw) = body.assignee.as_deref() {
        request = request.with_assignee(parse_id("assignee", raw, UserId::from_uuid)?);
    }
    let created = state
        .tasks
        .create_task(caller.actor(), board_id, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PopulatedTaskResponse::from(&created)),
    ))
}

/// `PUT /boards/{board_id}/tasks/{task_id}`
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<TaskPath>,
    ApiJson(body): ApiJson<UpdateTaskBody>,
) -> Result<Json<PopulatedTaskResponse>, ApiError> {
    let (board_id, task_id) = path.parse()?;
    let UpdateTaskBody {
        title,
        content,
        assignee: raw_assignee,
    } = body;
    let assignee = match raw_assignee {
        Some(Some(raw)) => Some(Some(parse_id("assignee", &raw, UserId::from_uuid)?)),
        Some(None) => Some(None),
        None => None,
    };
    let changes = TaskChanges {
        title,
        content,
        assignee,
    };
    let updated = state
        .tasks
        .update_task(caller.actor(), board_id, task_id, changes)
        .await?;
    Ok(Json(PopulatedTaskResponse::from(&updated)))
}

/// `DELETE /boards/{board_id}/tasks/{task_id}`
pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<TaskPath>,
) -> Result<Json<&'static str>, ApiError> {
    let (board_id, task_id) = path.parse()?;
    state
        .tasks
        .delete_task(caller.actor(), board_id, task_id)
        .await?;
    Ok(Json(DELETED))
}

/// `GET /tasks/assigned`
pub async fn assigned(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<Vec<PopulatedTaskResponse>>, ApiError> {
    let assigned = state.tasks.assigned_tasks(caller.actor()).await?;
    Ok(Json(
        assigned.iter().map(PopulatedTaskResponse::from).collect(),
    ))
}
