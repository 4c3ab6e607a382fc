//! `PostgreSQL` repository implementation for sections.

use super::{
    models::{NewSectionRow, SectionRow},
    schema::sections,
};
use crate::board::{
    domain::{BoardId, PersistedSectionData, Section, SectionId},
    ports::{BoardRepositoryError, BoardRepositoryResult, SectionRepository},
};
use crate::ordering::{Position, PositionPlan};
use crate::persistence::{
    ParentTable, PgPool, lock_parents, position_from_column, position_to_column,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

/// `PostgreSQL`-backed section repository.
#[derive(Debug, Clone)]
pub struct PostgresSectionRepository {
    pool: PgPool,
}

impl PostgresSectionRepository {
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
impl SectionRepository for PostgresSectionRepository {
    async fn store(&self, section: &Section) -> BoardRepositoryResult<()> {
        let new_row = to_new_row(section)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(sections::table)
                .values(&new_row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn append(&self, mut section: Section) -> BoardRepositoryResult<Section> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let board = section.board();
                lock_parents(tx, ParentTable::Boards, &[board.into_inner()])?;
                let held: i64 = sections::table
                    .filter(sections::board_id.eq(board.into_inner()))
                    .count()
                    .get_result(tx)?;
                let existing = u64::try_from(held).map_err(BoardRepositoryError::persistence)?;
                section.reposition(board, Position::append_after(existing)?);
                diesel::insert_into(sections::table)
                    .values(&to_new_row(&section)?)
                    .execute(tx)?;
                Ok(section)
            })
        })
        .await
    }

    async fn update(&self, section: &Section) -> BoardRepositoryResult<()> {
        let section_id = section.id();
        let title = section.title().to_owned();
        let updated_at = section.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(sections::table.filter(sections::id.eq(section_id.into_inner())))
                    .set((sections::title.eq(&title), sections::updated_at.eq(updated_at)))
                    .execute(connection)?;
            if updated_count == 0 {
                return Err(BoardRepositoryError::SectionNotFound(section_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SectionId) -> BoardRepositoryResult<Option<Section>> {
        self.run_blocking(move |connection| {
            let row = sections::table
                .filter(sections::id.eq(id.into_inner()))
                .select(SectionRow::as_select())
                .first::<SectionRow>(connection)
                .optional()?;
            row.map(row_to_section).transpose()
        })
        .await
    }

    async fn list_by_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Section>> {
        self.run_blocking(move |connection| {
            let rows = sections::table
                .filter(sections::board_id.eq(board.into_inner()))
                .order((sections::position.asc(), sections::created_at.asc()))
                .select(SectionRow::as_select())
                .load::<SectionRow>(connection)?;
            rows.into_iter().map(row_to_section).collect()
        })
        .await
    }

    async fn delete(&self, id: SectionId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let board: uuid::Uuid = sections::table
                    .filter(sections::id.eq(id.into_inner()))
                    .select(sections::board_id)
                    .first(tx)
                    .optional()?
                    .ok_or(BoardRepositoryError::SectionNotFound(id))?;
                lock_parents(tx, ParentTable::Boards, &[board])?;
                let deleted =
                    diesel::delete(sections::table.filter(sections::id.eq(id.into_inner())))
                        .execute(tx)?;
                if deleted == 0 {
                    return Err(BoardRepositoryError::SectionNotFound(id));
                }

                let remaining: Vec<uuid::Uuid> = sections::table
                    .filter(sections::board_id.eq(board))
                    .order((sections::position.asc(), sections::created_at.asc()))
                    .select(sections::id)
                    .load(tx)?;
                for (index, section_id) in remaining.into_iter().enumerate() {
                    let position = position_to_column(Position::from_index(index)?)
                        .map_err(BoardRepositoryError::persistence)?;
                    diesel::update(sections::table.filter(sections::id.eq(section_id)))
                        .set(sections::position.eq(position))
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<SectionId, BoardId>,
    ) -> BoardRepositoryResult<()> {
        let boards: Vec<uuid::Uuid> = plan
            .parents()
            .iter()
            .copied()
            .map(BoardId::into_inner)
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
                lock_parents(tx, ParentTable::Boards, &boards)?;
                let held: HashMap<uuid::Uuid, uuid::Uuid> = sections::table
                    .filter(sections::id.eq_any(&listed))
                    .select((sections::id, sections::board_id))
                    .load::<(uuid::Uuid, uuid::Uuid)>(tx)?
                    .into_iter()
                    .collect();
                let present: i64 = sections::table
                    .filter(sections::board_id.eq_any(&boards))
                    .count()
                    .get_result(tx)?;
                checked.verify(
                    |id| held.get(&id.into_inner()).copied().map(BoardId::from_uuid),
                    usize::try_from(present).map_err(BoardRepositoryError::persistence)?,
                )?;
                for (section_id, board_id, position) in &writes {
                    diesel::update(sections::table.filter(sections::id.eq(section_id.into_inner())))
                        .set((sections::board_id.eq(board_id), sections::position.eq(position)))
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }
}

fn to_new_row(section: &Section) -> BoardRepositoryResult<NewSectionRow> {
    Ok(NewSectionRow {
        id: section.id().into_inner(),
        board_id: section.board().into_inner(),
        title: section.title().to_owned(),
        position: position_to_column(section.position())
            .map_err(BoardRepositoryError::persistence)?,
        created_at: section.created_at(),
        updated_at: section.updated_at(),
    })
}

fn row_to_section(row: SectionRow) -> BoardRepositoryResult<Section> {
    let position = position_from_column(row.position).map_err(BoardRepositoryError::persistence)?;
    Ok(Section::from_persisted(PersistedSectionData {
        id: SectionId::from_uuid(row.id),
        board: BoardId::from_uuid(row.board_id),
        title: row.title,
        position,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
