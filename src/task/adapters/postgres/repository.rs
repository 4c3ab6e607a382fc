//! `PostgreSQL` repository implementation for task storage and ordering.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::board::domain::SectionId;
use crate::ordering::{Position, PositionPlan};
use crate::persistence::{
    DELETE_ATTEMPTS, ParentTable, PgPool, lock_parents, position_from_column, position_to_column,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let new_row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn append(&self, mut task: Task) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let section = task.section();
                lock_parents(tx, ParentTable::Sections, &[section.into_inner()])?;
                let held: i64 = tasks::table
                    .filter(tasks::section_id.eq(section.into_inner()))
                    .count()
                    .get_result(tx)?;
                let existing = u64::try_from(held).map_err(TaskRepositoryError::persistence)?;
                task.reposition(section, Position::append_after(existing)?);
                diesel::insert_into(tasks::table)
                    .values(&to_new_row(&task)?)
                    .execute(tx)?;
                Ok(task)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let title = task.title().to_owned();
        let content = task.content().to_owned();
        let assignee = task.assignee().map(UserId::into_inner);
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::title.eq(&title),
                        tasks::content.eq(&content),
                        tasks::assignee_id.eq(assignee),
                        tasks::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_section(&self, section: SectionId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::section_id.eq(section.into_inner()))
                .order((tasks::position.asc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_id.eq(assignee.into_inner()))
                .order(tasks::updated_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            for _ in 0..DELETE_ATTEMPTS {
                if connection.transaction(|tx| remove_and_close_gap(tx, id))? {
                    return Ok(());
                }
            }
            Err(TaskRepositoryError::persistence(std::io::Error::other(
                format!("task {id} kept changing sections while being deleted"),
            )))
        })
        .await
    }

    async fn delete_by_section(&self, section: SectionId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(tasks::table.filter(tasks::section_id.eq(section.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(deleted).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<TaskId, SectionId>,
    ) -> TaskRepositoryResult<()> {
        let sections: Vec<uuid::Uuid> = plan
            .parents()
            .iter()
            .copied()
            .map(SectionId::into_inner)
            .collect();
        let writes = plan
            .assignments()
            .iter()
            .map(|assignment| {
                position_to_column(assignment.position)
                    .map(|position| (assignment.id, assignment.parent.into_inner(), position))
                    .map_err(TaskRepositoryError::persistence)
            })
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        let listed: Vec<uuid::Uuid> = writes.iter().map(|(id, _, _)| id.into_inner()).collect();
        let checked = plan.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                // Serializes concurrent drags touching the same sections.
                lock_parents(tx, ParentTable::Sections, &sections)?;
                let held: HashMap<uuid::Uuid, uuid::Uuid> = tasks::table
                    .filter(tasks::id.eq_any(&listed))
                    .select((tasks::id, tasks::section_id))
                    .load::<(uuid::Uuid, uuid::Uuid)>(tx)?
                    .into_iter()
                    .collect();
                let present: i64 = tasks::table
                    .filter(tasks::section_id.eq_any(&sections))
                    .count()
                    .get_result(tx)?;
                checked.verify(
                    |id| held.get(&id.into_inner()).copied().map(SectionId::from_uuid),
                    usize::try_from(present).map_err(TaskRepositoryError::persistence)?,
                )?;
                for (task_id, section_id, position) in &writes {
                    diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                        .set((
                            tasks::section_id.eq(section_id),
                            tasks::position.eq(position),
                        ))
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }
}

/// Deletes the task after locking its section, then renumbers the section.
///
/// Returns `false` when the task changed sections before the lock was taken.
fn remove_and_close_gap(tx: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<bool> {
    let section: uuid::Uuid = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(tasks::section_id)
        .first(tx)
        .optional()?
        .ok_or(TaskRepositoryError::NotFound(id))?;
    lock_parents(tx, ParentTable::Sections, &[section])?;
    let deleted = diesel::delete(
        tasks::table
            .filter(tasks::id.eq(id.into_inner()))
            .filter(tasks::section_id.eq(section)),
    )
    .execute(tx)?;
    if deleted == 0 {
        return Ok(false);
    }

    let remaining: Vec<uuid::Uuid> = tasks::table
        .filter(tasks::section_id.eq(section))
        .order((tasks::position.asc(), tasks::created_at.asc()))
        .select(tasks::id)
        .load(tx)?;
    for (index, task_id) in remaining.into_iter().enumerate() {
        let position = position_to_column(Position::from_index(index)?)
            .map_err(TaskRepositoryError::persistence)?;
        diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
            .set(tasks::position.eq(position))
            .execute(tx)?;
    }
    Ok(true)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        section_id: task.section().into_inner(),
        title: task.title().to_owned(),
        content: task.content().to_owned(),
        position: position_to_column(task.position()).map_err(TaskRepositoryError::persistence)?,
        assignee_id: task.assignee().map(UserId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        section_id,
        title,
        content,
        position: stored_position,
        assignee_id,
        created_at,
        updated_at,
    } = row;

    let position = position_from_column(stored_position).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        section: SectionId::from_uuid(section_id),
        title,
        content,
        position,
        assignee: assignee_id.map(UserId::from_uuid),
        created_at,
        updated_at,
    }))
}
