//! Adapter implementations for board and section persistence.

pub mod memory;
pub mod postgres;
