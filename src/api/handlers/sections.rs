//! `/boards/{board_id}/sections` routes.

use super::{ApiJson, BoardPath, DELETED, UPDATED, parse_id, parse_ordered};
use crate::api::dto::{
    ReorderSectionsBody, SectionResponse, SectionWithTasksResponse, UpdateSectionBody,
};
use crate::api::{ApiError, AppState, CurrentUser};
use crate::board::domain::{BoardId, SectionId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

/// Path parameters for `/boards/{board_id}/sections/{section_id}`.
#[derive(Debug, Deserialize)]
pub struct SectionPath {
    /// Board identifier.
    pub board_id: String,
    /// Section identifier.
    pub section_id: String,
}

impl SectionPath {
    fn parse(&self) -> Result<(BoardId, SectionId), ApiError> {
        Ok((
            parse_id("boardId", &self.board_id, BoardId::from_uuid)?,
            parse_id("sectionId", &self.section_id, SectionId::from_uuid)?,
        ))
    }
}

/// `POST /boards/{board_id}/sections`
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
) -> Result<(StatusCode, Json<SectionWithTasksResponse>), ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let section = state
        .sections
        .create_section(caller.actor(), board_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SectionWithTasksResponse::empty(&section)),
    ))
}

/// `PUT /boards/{board_id}/sections/{section_id}`: renames.
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<SectionPath>,
    ApiJson(body): ApiJson<UpdateSectionBody>,
) -> Result<Json<SectionResponse>, ApiError> {
    let (board_id, section_id) = path.parse()?;
    let section = state
        .sections
        .rename_section(caller.actor(), board_id, section_id, body.title)
        .await?;
    Ok(Json(SectionResponse::from(&section)))
}

/// `DELETE /boards/{board_id}/sections/{section_id}`
pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<SectionPath>,
) -> Result<Json<&'static str>, ApiError> {
    let (board_id, section_id) = path.parse()?;
    state
        .sections
        .delete_section(caller.actor(), board_id, section_id)
        .await?;
    Ok(Json(DELETED))
}

/// `PUT /boards/{board_id}/sections/update-position`
pub async fn update_positions(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
    ApiJson(body): ApiJson<ReorderSectionsBody>,
) -> Result<Json<&'static str>, ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let ordered = parse_ordered("sections", &body.sections, SectionId::from_uuid)?;
    state
        .sections
        .reorder_sections(caller.actor(), board_id, &ordered)
        .await?;
    Ok(Json(UPDATED))
}
