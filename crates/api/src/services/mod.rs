//! Application services.
//!
//! The two stateful engines live here: the pickup workflow and the
//! reservation lifecycle. Handlers stay thin and delegate to these.

pub mod pickups;
pub mod reservations;

pub use pickups::PickupService;
pub use reservations::ReservationService;
