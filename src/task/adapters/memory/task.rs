//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::SectionId;
use crate::ordering::{Position, PositionPlan};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn count(len: usize) -> TaskRepositoryResult<u64> {
    u64::try_from(len).map_err(TaskRepositoryError::persistence)
}

fn close_gap(tasks: &mut HashMap<TaskId, Task>, section: SectionId) -> TaskRepositoryResult<()> {
    let mut column: Vec<(Position, chrono::DateTime<chrono::Utc>, TaskId)> = tasks
        .values()
        .filter(|task| task.section() == section)
        .map(|task| (task.position(), task.created_at(), task.id()))
        .collect();
    column.sort_by_key(|&(position, created_at, _)| (position, created_at));
    for (index, (_, _, id)) in column.into_iter().enumerate() {
        let position = Position::from_index(index)?;
        if let Some(task) = tasks.get_mut(&id) {
            task.reposition(section, position);
        }
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn append(&self, mut task: Task) -> TaskRepositoryResult<Task> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let section = task.section();
        let existing = count(tasks.values().filter(|held| held.section() == section).count())?;
        task.reposition(section, Position::append_after(existing)?);
        tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        let mut updated = task.clone();
        updated.reposition(slot.section(), slot.position());
        *slot = updated;
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_by_section(&self, section: SectionId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        let mut column: Vec<Task> = tasks
            .values()
            .filter(|task| task.section() == section)
            .cloned()
            .collect();
        column.sort_by_key(|task| (task.position(), task.created_at()));
        Ok(column)
    }

    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        let mut assigned: Vec<Task> = tasks
            .values()
            .filter(|task| task.is_assigned_to(assignee))
            .cloned()
            .collect();
        assigned.sort_by(|left, right| right.updated_at().cmp(&left.updated_at()));
        Ok(assigned)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let removed = tasks.remove(&id).ok_or(TaskRepositoryError::NotFound(id))?;
        close_gap(&mut tasks, removed.section())
    }

    async fn delete_by_section(&self, section: SectionId) -> TaskRepositoryResult<u64> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let before = tasks.len();
        tasks.retain(|_, task| task.section() != section);
        count(before - tasks.len())
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<TaskId, SectionId>,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let present = tasks
            .values()
            .filter(|task| plan.parents().contains(&task.section()))
            .count();
        plan.verify(|id| tasks.get(&id).map(Task::section), present)?;
        for assignment in plan.assignments() {
            if let Some(task) = tasks.get_mut(&assignment.id) {
                task.reposition(assignment.parent, assignment.position);
            }
        }
        Ok(())
    }
}
