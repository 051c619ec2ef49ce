//! Persistence layer for the Kerbside backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations owning all SQL, including the
//!   transactional pickup and reservation state transitions

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
