//! Shared utilities for the Kerbside backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT issuing and validation
//! - Password hashing with Argon2id
//! - Common validation logic
//! - Pagination query helpers

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
