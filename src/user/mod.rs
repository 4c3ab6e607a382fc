//! User accounts and roles.
//!
//! Users own boards and may be assigned tasks. The `admin` role may assign
//! tasks, manage other users, and act on any board. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
