//! Tasks: the cards inside a board's sections.
//!
//! Tasks are ordered within their section and may be dragged within a
//! section or across sections of the same board. Every drag is persisted as
//! one [`crate::ordering::PositionPlan`]. Tasks may carry an assignee; only
//! the assignee or an admin may edit or delete them.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
