//! Kanban: a multi-user kanban board service.
//!
//! Users own boards; boards hold ordered sections; sections hold ordered
//! tasks. Every ordered collection keeps dense zero-based positions, and
//! drag-and-drop reorders are persisted as one atomic batch.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Use cases combining domain rules and ports
//!
//! # Modules
//!
//! - [`ordering`]: Pure list reordering and position plans
//! - [`user`]: Accounts, roles, and the acting caller
//! - [`board`]: Boards and their sections
//! - [`task`]: Tasks and cross-section reordering
//! - [`api`]: `axum` HTTP surface
//! - [`client`]: Optimistic client-side drag state and debounced autosave
//! - [`config`], [`telemetry`], [`persistence`]: Runtime plumbing

pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod ordering;
pub mod persistence;
pub mod task;
pub mod telemetry;
pub mod user;
