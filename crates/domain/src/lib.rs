//! Domain layer for the Kerbside backend.
//!
//! This crate contains:
//! - Domain models (students, pickups, parkings, reservations)
//! - Pure business services (pricing, pickup authorization, scheduling)

pub mod models;
pub mod services;
