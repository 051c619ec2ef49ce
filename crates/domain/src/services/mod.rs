//! Pure domain services.
//!
//! These are side-effect free: the persistence layer supplies snapshots
//! and the HTTP layer applies the results.

pub mod authorization;
pub mod pricing;
pub mod scheduling;

pub use authorization::{is_staff, may_pickup, PickupPolicy};
pub use pricing::price_for_duration;
pub use scheduling::{duration_hours, intervals_overlap};
