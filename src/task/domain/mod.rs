//! Domain model for tasks.

mod ids;
mod task;

pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskChanges};
