//! Entity definitions (database row mappings).

pub mod address;
pub mod guardian;
pub mod parking;
pub mod pickup;
pub mod reservation;
pub mod school;
pub mod spot;
pub mod student;
pub mod user;

pub use address::AddressEntity;
pub use guardian::GuardianLinkEntity;
pub use parking::{ParkingEntity, ParkingStatusDb, ParkingTypeDb};
pub use pickup::{PickupEntity, PickupStatusDb};
pub use reservation::{ReservationEntity, ReservationStatusDb};
pub use school::SchoolEntity;
pub use spot::{SpotEntity, SpotStatusDb, SpotTypeDb};
pub use student::{ExitStatusDb, StudentEntity};
pub use user::{UserEntity, UserTypeDb};
