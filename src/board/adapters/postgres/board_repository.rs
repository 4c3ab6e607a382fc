//! `PostgreSQL` repository implementation for boards.

use super::{
    models::{BoardRow, NewBoardRow},
    schema::boards,
};
use crate::board::{
    domain::{Board, BoardId, PersistedBoardData},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::ordering::{Position, PositionPlan};
use crate::persistence::{
    ParentTable, PgPool, lock_parents, position_from_column, position_to_column,
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let new_row = to_new_row(board)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn append(&self, mut board: Board) -> BoardRepositoryResult<Board> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let owner = board.owner();
                lock_parents(tx, ParentTable::Users, &[owner.into_inner()])?;
                let held: i64 = boards::table
                    .filter(boards::owner_id.eq(owner.into_inner()))
                    .count()
                    .get_result(tx)?;
                let existing = u64::try_from(held).map_err(BoardRepositoryError::persistence)?;
                board.reposition(owner, Position::append_after(existing)?);
                diesel::insert_into(boards::table)
                    .values(&to_new_row(&board)?)
                    .execute(tx)?;
                Ok(board)
            })
        })
        .await
    }

    async fn update(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let title = board.title().to_owned();
        let description = board.description().to_owned();
        let icon = board.icon().to_owned();
        let favourite = board.favourite();
        let updated_at = board.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(boards::table.filter(boards::id.eq(board_id.into_inner())))
                    .set((
                        boards::title.eq(&title),
                        boards::description.eq(&description),
                        boards::icon.eq(&icon),
                        boards::favourite.eq(favourite),
                        boards::updated_at.eq(updated_at),
                    ))
                    .execute(connection)?;
            if updated_count == 0 {
                return Err(BoardRepositoryError::BoardNotFound(board_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner: UserId) -> BoardRepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .filter(boards::owner_id.eq(owner.into_inner()))
                .order((boards::position.asc(), boards::created_at.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)?;
            rows.into_iter().map(row_to_board).collect()
        })
        .await
    }

    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let owner: uuid::Uuid = boards::table
                    .filter(boards::id.eq(id.into_inner()))
                    .select(boards::owner_id)
                    .first(tx)
                    .optional()?
                    .ok_or(BoardRepositoryError::BoardNotFound(id))?;
                lock_parents(tx, ParentTable::Users, &[owner])?;
                let deleted = diesel::delete(boards::table.filter(boards::id.eq(id.into_inner())))
                    .execute(tx)?;
                if deleted == 0 {
                    return Err(BoardRepositoryError::BoardNotFound(id));
                }

                let remaining: Vec<uuid::Uuid> = boards::table
                    .filter(boards::owner_id.eq(owner))
                    .order((boards::position.asc(), boards::created_at.asc()))
                    .select(boards::id)
                    .load(tx)?;
                for (index, board_id) in remaining.into_iter().enumerate() {
                    let position = position_to_column(Position::from_index(index)?)
                        .map_err(BoardRepositoryError::persistence)?;
                    diesel::update(boards::table.filter(boards::id.eq(board_id)))
                        .set(boards::position.eq(position))
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<BoardId, UserId>,
    ) -> BoardRepositoryResult<()> {
        let owners: Vec<uuid::Uuid> = plan
            .parents()
            .iter()
            .copied()
            .map(UserId::into_inner)
            .collect();
        let writes = plan
            .assignments()
            .iter()
            .map(|assignment| {
                position_to_column(assignment.position)
                    .map(|position| (assignment.id, assignment.parent.into_inner(), position))
                    .map_err(BoardRepositoryError::persistence)
            })
            .collect::<BoardRepositoryResult<Vec<_>>>()?;
        let listed: Vec<uuid::Uuid> = writes.iter().map(|(id, _, _)| id.into_inner()).collect();
        let checked = plan.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                lock_parents(tx, ParentTable::Users, &owners)?;
                let held: HashMap<uuid::Uuid, uuid::Uuid> = boards::table
                    .filter(boards::id.eq_any(&listed))
                    .select((boards::id, boards::owner_id))
                    .load::<(uuid::Uuid, uuid::Uuid)>(tx)?
                    .into_iter()
                    .collect();
                let present: i64 = boards::table
                    .filter(boards::owner_id.eq_any(&owners))
                    .count()
                    .get_result(tx)?;
                checked.verify(
                    |id| held.get(&id.into_inner()).copied().map(UserId::from_uuid),
                    usize::try_from(present).map_err(BoardRepositoryError::persistence)?,
                )?;
                for (board_id, owner_id, position) in &writes {
                    diesel::update(boards::table.filter(boards::id.eq(board_id.into_inner())))
                        .set((boards::owner_id.eq(owner_id), boards::position.eq(position)))
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }
}

fn to_new_row(board: &Board) -> BoardRepositoryResult<NewBoardRow> {
    Ok(NewBoardRow {
        id: board.id().into_inner(),
        owner_id: board.owner().into_inner(),
        title: board.title().to_owned(),
        description: board.description().to_owned(),
        icon: board.icon().to_owned(),
        favourite: board.favourite(),
        position: position_to_column(board.position())
            .map_err(BoardRepositoryError::persistence)?,
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    })
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let position = position_from_column(row.position).map_err(BoardRepositoryError::persistence)?;
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        title: row.title,
        description: row.description,
        icon: row.icon,
        favourite: row.favourite,
        position,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
