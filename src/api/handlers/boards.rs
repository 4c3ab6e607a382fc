//! `/boards` routes.

use super::{ApiJson, BoardPath, DELETED, UPDATED, parse_id, parse_ordered};
use crate::api::dto::{BoardDetailResponse, BoardResponse, ReorderBoardsBody, UpdateBoardBody};
use crate::api::{ApiError, AppState, CurrentUser};
use crate::board::domain::{BoardChanges, BoardId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

fn board_list(boards: &[crate::board::domain::Board]) -> Json<Vec<BoardResponse>> {
    Json(boards.iter().map(BoardResponse::from).collect())
}

/// `POST /boards`
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<(StatusCode, Json<BoardResponse>), ApiError> {
    let board = state.boards.create_board(caller.actor()).await?;
    Ok((StatusCode::CREATED, Json(BoardResponse::from(&board))))
}

/// `GET /boards`
pub async fn list(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<Vec<BoardResponse>>, ApiError> {
    let boards = state.boards.list_boards(caller.actor()).await?;
    Ok(board_list(&boards))
}

/// `PUT /boards`: rewrites the sidebar order.
pub async fn reorder(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(body): ApiJson<ReorderBoardsBody>,
) -> Result<Json<&'static str>, ApiError> {
    let ordered = parse_ordered("boards", &body.boards, BoardId::from_uuid)?;
    state.boards.reorder_boards(caller.actor(), &ordered).await?;
    Ok(Json(UPDATED))
}

/// `GET /boards/favourites`
pub async fn favourites(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<Vec<BoardResponse>>, ApiError> {
    let boards = state.boards.list_favourites(caller.actor()).await?;
    Ok(board_list(&boards))
}

/// `GET /boards/{board_id}`
pub async fn detail(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
) -> Result<Json<BoardDetailResponse>, ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let detail = state.boards.board_detail(caller.actor(), board_id).await?;
    Ok(Json(BoardDetailResponse::from(&detail)))
}

/// `PUT /boards/{board_id}`
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
    ApiJson(body): ApiJson<UpdateBoardBody>,
) -> Result<Json<BoardResponse>, ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    let UpdateBoardBody {
        title,
        description,
        icon,
        favourite,
    } = body;
    let changes = BoardChanges {
        title,
        description,
        icon,
        favourite,
    };
    let board = state
        .boards
        .update_board(caller.actor(), board_id, changes)
        .await?;
    Ok(Json(BoardResponse::from(&board)))
}

/// `DELETE /boards/{board_id}`
pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<BoardPath>,
) -> Result<Json<&'static str>, ApiError> {
    let board_id = parse_id("boardId", &path.board_id, BoardId::from_uuid)?;
    state.boards.delete_board(caller.actor(), board_id).await?;
    Ok(Json(DELETED))
}
