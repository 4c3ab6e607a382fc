//! Task orchestration: creation, editing, deletion, and drag-and-drop moves.

use super::{TaskServiceError, TaskServiceResult};
use crate::board::{
    domain::{Board, BoardId, Section, SectionId},
    ports::{BoardRepository, SectionRepository},
};
use crate::ordering::{Position, PositionPlan};
use crate::task::{
    domain::{Task, TaskChanges, TaskId},
    ports::TaskRepository,
};
use crate::user::{
    domain::{Actor, UserId},
    ports::UserRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTaskRequest {
    section: SectionId,
    assignee: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request for an unassigned task in `section`.
    #[must_use]
    pub const fn new(section: SectionId) -> Self {
        Self {
            section,
            assignee: None,
        }
    }

    /// Requests an assignee. Ignored unless the caller is an admin.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// One drag-and-drop move, expressed as the full post-move order of the
/// affected sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    /// Section the task was dragged out of.
    pub resource_section: SectionId,
    /// Remaining order of `resource_section`.
    pub resource: Vec<TaskId>,
    /// Section the task was dropped into.
    pub destination_section: SectionId,
    /// New order of `destination_section`, including the moved task.
    pub destination: Vec<TaskId>,
}

/// A task together with the section that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithSection {
    /// The task.
    pub task: Task,
    /// Its section.
    pub section: Section,
}

/// A task assigned to the caller, annotated with where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTask {
    /// The task.
    pub task: Task,
    /// Its section.
    pub section: Section,
    /// The section's board.
    pub board: Board,
}

/// Task orchestration service.
pub struct TaskService<B, S, T, U, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    boards: Arc<B>,
    sections: Arc<S>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<B, S, T, U, C> Clone for TaskService<B, S, T, U, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            boards: Arc::clone(&self.boards),
            sections: Arc::clone(&self.sections),
            tasks: Arc::clone(&self.tasks),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, S, T, U, C> TaskService<B, S, T, U, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        boards: Arc<B>,
        sections: Arc<S>,
        tasks: Arc<T>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            boards,
            sections,
            tasks,
            users,
            clock,
        }
    }

    /// Appends an empty task to a section.
    ///
    /// A requested assignee is honoured only for admin callers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::BoardNotFound`],
    /// [`TaskServiceError::SectionNotFound`],
    /// [`TaskServiceError::SectionOutsideBoard`],
    /// [`TaskServiceError::UnknownAssignee`], or a repository error.
    pub async fn create_task(
        &self,
        actor: Actor,
        board: BoardId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskWithSection> {
        self.require_board(board).await?;
        let section = self.section_on_board(board, request.section).await?;
        let assignee = match request.assignee {
            Some(assignee) if actor.is_admin() => Some(self.require_user(assignee).await?),
            Some(_) => {
                debug!(caller = %actor.id(), "ignored assignee from non-admin caller");
                None
            }
            None => None,
        };

        let draft = Task::new(section.id(), Position::FIRST, assignee, &*self.clock);
        let task = self.tasks.append(draft).await?;
        info!(
            task_id = %task.id(),
            section_id = %section.id(),
            position = %task.position(),
            "created task"
        );
        Ok(TaskWithSection { task, section })
    }

    /// Applies a partial update to a task.
    ///
    /// Only the assignee or an admin may edit a task; an assignee change is
    /// dropped unless the caller is an admin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::Forbidden`],
    /// [`TaskServiceError::UnknownAssignee`], or a repository error.
    pub async fn update_task(
        &self,
        actor: Actor,
        board: BoardId,
        id: TaskId,
        changes: TaskChanges,
    ) -> TaskServiceResult<TaskWithSection> {
        let (mut task, section) = self.editable_task(actor, board, id).await?;
        let changes = if actor.is_admin() {
            if let Some(Some(assignee)) = changes.assignee {
                self.require_user(assignee).await?;
            }
            changes
        } else {
            changes.without_assignee()
        };

        task.apply(changes, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %id, "updated task");
        Ok(TaskWithSection { task, section })
    }

    /// Deletes a task and renumbers its section.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::Forbidden`], or a repository error.
    pub async fn delete_task(
        &self,
        actor: Actor,
        board: BoardId,
        id: TaskId,
    ) -> TaskServiceResult<()> {
        let (task, _) = self.editable_task(actor, board, id).await?;
        self.tasks.delete(id).await?;
        info!(task_id = %id, section_id = %task.section(), "deleted task");
        Ok(())
    }

    /// Persists a drag-and-drop move as one atomic batch.
    ///
    /// Every task in `destination` gets its index and the destination
    /// section. When the sections differ, every task in `resource` gets its
    /// index and the resource section too. The lists must hold exactly the
    /// tasks the named sections contain; no other task is touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Ordering`] for duplicate identifiers,
    /// [`TaskServiceError::BoardNotFound`],
    /// [`TaskServiceError::SectionNotFound`],
    /// [`TaskServiceError::SectionOutsideBoard`], or
    /// [`TaskServiceError::Repository`] for a missing task, a task from
    /// another section, or an omitted task. Nothing is written on error.
    pub async fn update_positions(
        &self,
        actor: Actor,
        board: BoardId,
        request: &TaskMove,
    ) -> TaskServiceResult<()> {
        self.require_board(board).await?;
        self.section_on_board(board, request.resource_section).await?;
        if request.destination_section != request.resource_section {
            self.section_on_board(board, request.destination_section)
                .await?;
        }

        let plan = PositionPlan::for_move(
            &request.resource,
            &request.destination,
            request.resource_section,
            request.destination_section,
        )?;
        self.tasks.apply_positions(&plan).await.inspect_err(|err| {
            warn!(board_id = %board, error = %err, "task reorder rolled back");
        })?;
        info!(
            caller = %actor.id(),
            board_id = %board,
            writes = plan.len(),
            "updated task positions"
        );
        Ok(())
    }

    /// Returns tasks assigned to the caller, most recently updated first.
    ///
    /// Tasks whose section or board has disappeared are skipped.
    ///
    /// # Errors
    ///
    /// Returns a repository error when lookup fails.
    pub async fn assigned_tasks(&self, actor: Actor) -> TaskServiceResult<Vec<AssignedTask>> {
        let tasks = self.tasks.list_by_assignee(actor.id()).await?;
        let mut assigned = Vec::with_capacity(tasks.len());
        for task in tasks {
            let Some(section) = self.sections.find_by_id(task.section()).await? else {
                continue;
            };
            let Some(board) = self.boards.find_by_id(section.board()).await? else {
                continue;
            };
            assigned.push(AssignedTask {
                task,
                section,
                board,
            });
        }
        debug!(caller = %actor.id(), count = assigned.len(), "listed assigned tasks");
        Ok(assigned)
    }

    async fn require_board(&self, id: BoardId) -> TaskServiceResult<Board> {
        self.boards
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::BoardNotFound(id))
    }

    async fn require_user(&self, id: UserId) -> TaskServiceResult<UserId> {
        self.users
            .find_by_id(id)
            .await?
            .map(|user| user.id())
            .ok_or(TaskServiceError::UnknownAssignee(id))
    }

    async fn section_on_board(
        &self,
        board: BoardId,
        id: SectionId,
    ) -> TaskServiceResult<Section> {
        let section = self
            .sections
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::SectionNotFound(id))?;
        if section.board() != board {
            return Err(TaskServiceError::SectionOutsideBoard { section: id, board });
        }
        Ok(section)
    }

    async fn editable_task(
        &self,
        actor: Actor,
        board: BoardId,
        id: TaskId,
    ) -> TaskServiceResult<(Task, Section)> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let section = self
            .sections
            .find_by_id(task.section())
            .await?
            .filter(|section| section.board() == board)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        if !(actor.is_admin() || task.is_assigned_to(actor.id())) {
            return Err(TaskServiceError::Forbidden(id));
        }
        Ok((task, section))
    }
}
