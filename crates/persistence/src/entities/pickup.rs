//! Pickup entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::pickup::{GeoPoint, Pickup, PickupStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for pickup status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "pickup_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatusDb {
    Requested,
    Released,
    Completed,
    Cancelled,
}

impl From<PickupStatusDb> for PickupStatus {
    fn from(s: PickupStatusDb) -> Self {
        match s {
            PickupStatusDb::Requested => PickupStatus::Requested,
            PickupStatusDb::Released => PickupStatus::Released,
            PickupStatusDb::Completed => PickupStatus::Completed,
            PickupStatusDb::Cancelled => PickupStatus::Cancelled,
        }
    }
}

impl From<PickupStatus> for PickupStatusDb {
    fn from(s: PickupStatus) -> Self {
        match s {
            PickupStatus::Requested => PickupStatusDb::Requested,
            PickupStatus::Released => PickupStatusDb::Released,
            PickupStatus::Completed => PickupStatusDb::Completed,
            PickupStatus::Cancelled => PickupStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the student_pickups table.
///
/// The guardian's reported position is stored as a lat/lon column pair;
/// both are set or both are null.
#[derive(Debug, Clone, FromRow)]
pub struct PickupEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub guardian_id: Uuid,
    pub school_id: Uuid,
    pub status: PickupStatusDb,
    pub request_time: DateTime<Utc>,
    pub release_time: Option<DateTime<Utc>>,
    pub pickup_time: Option<DateTime<Utc>>,
    pub wait_time: Option<i32>,
    pub guardian_latitude: Option<f64>,
    pub guardian_longitude: Option<f64>,
    pub staff_id: Option<Uuid>,
    pub confirmation_photos: Option<Vec<String>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PickupEntity> for Pickup {
    fn from(e: PickupEntity) -> Self {
        let guardian_location = match (e.guardian_latitude, e.guardian_longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Pickup {
            id: e.id,
            student_id: e.student_id,
            guardian_id: e.guardian_id,
            school_id: e.school_id,
            status: e.status.into(),
            request_time: e.request_time,
            release_time: e.release_time,
            pickup_time: e.pickup_time,
            wait_time: e.wait_time,
            guardian_location,
            staff_id: e.staff_id,
            confirmation_photos: e.confirmation_photos.unwrap_or_default(),
            notes: e.notes,
            created_at: e.created_at,
        }
    }
}
