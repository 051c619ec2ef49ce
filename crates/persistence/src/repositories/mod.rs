//! Repository implementations for database operations.

pub mod address;
pub mod guardian;
pub mod parking;
pub mod pickup;
pub mod reservation;
pub mod school;
pub mod spot;
pub mod student;
pub mod user;

pub use address::{AddressFields, AddressRepository};
pub use guardian::GuardianRepository;
pub use parking::{NearbyParking, ParkingRepository, ParkingUpdate};
pub use pickup::{PickupRepository, RequestOutcome};
pub use reservation::{BookingOutcome, ReservationRepository};
pub use school::SchoolRepository;
pub use spot::SpotRepository;
pub use student::{GuardianSeed, StudentRepository};
pub use user::UserRepository;
