//! Application services for task orchestration.

mod error;
mod tasks;

pub use error::{TaskServiceError, TaskServiceResult};
pub use tasks::{AssignedTask, CreateTaskRequest, TaskMove, TaskService, TaskWithSection};
