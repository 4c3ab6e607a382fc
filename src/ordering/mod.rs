//! Dense sibling ordering shared by boards, sections, and tasks.
//!
//! Every ordered record carries a zero-based [`Position`] among the siblings
//! that share its parent. After any successful reorder, creation, or deletion
//! those positions form a dense permutation of `0..count`.
//!
//! The functions here are pure: [`reorder`] and [`move_between`] rearrange
//! in-memory sequences, and [`PositionPlan`] captures the `(id, parent,
//! position)` assignments that a repository then persists as one batch.

mod error;
mod plan;
mod position;
mod reorder;

pub use error::OrderingError;
pub use plan::{PlanMismatch, PositionAssignment, PositionPlan};
pub use position::Position;
pub use reorder::{is_dense, move_between, reorder};
