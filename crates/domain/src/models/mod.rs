//! Domain models for the Kerbside backend.

pub mod address;
pub mod guardian;
pub mod parking;
pub mod pickup;
pub mod reservation;
pub mod school;
pub mod spot;
pub mod student;
pub mod user;

pub use address::{Address, AddressInput};
pub use guardian::{AddGuardianRequest, GuardianLink};
pub use parking::{Parking, ParkingStatus, ParkingType};
pub use pickup::{GeoPoint, Pickup, PickupStatus, StudentExitStatus};
pub use reservation::{Reservation, ReservationStatus};
pub use school::School;
pub use spot::{ParkingSpot, SpotRates, SpotStatus, SpotType};
pub use student::Student;
pub use user::{User, UserType};
