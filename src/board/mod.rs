//! Boards and their sections.
//!
//! A board belongs to one user and holds an ordered list of sections; each
//! section holds an ordered list of tasks (see [`crate::task`]). Boards are
//! themselves ordered within their owner's sidebar. Positions in every group
//! stay dense through creation, deletion, and drag-and-drop reordering.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
