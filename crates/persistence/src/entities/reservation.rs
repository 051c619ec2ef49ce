//! Reservation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Reservation, ReservationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatusDb {
    Scheduled,
    Active,
    Completed,
    Cancelled,
    Expired,
}

impl From<ReservationStatusDb> for ReservationStatus {
    fn from(s: ReservationStatusDb) -> Self {
        match s {
            ReservationStatusDb::Scheduled => ReservationStatus::Scheduled,
            ReservationStatusDb::Active => ReservationStatus::Active,
            ReservationStatusDb::Completed => ReservationStatus::Completed,
            ReservationStatusDb::Cancelled => ReservationStatus::Cancelled,
            ReservationStatusDb::Expired => ReservationStatus::Expired,
        }
    }
}

impl From<ReservationStatus> for ReservationStatusDb {
    fn from(s: ReservationStatus) -> Self {
        match s {
            ReservationStatus::Scheduled => ReservationStatusDb::Scheduled,
            ReservationStatus::Active => ReservationStatusDb::Active,
            ReservationStatus::Completed => ReservationStatusDb::Completed,
            ReservationStatus::Cancelled => ReservationStatusDb::Cancelled,
            ReservationStatus::Expired => ReservationStatusDb::Expired,
        }
    }
}

/// Database row mapping for the parking_reservations table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationEntity {
    pub id: Uuid,
    pub spot_id: Uuid,
    pub parking_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub status: ReservationStatusDb,
    pub estimated_price: f64,
    pub final_price: Option<f64>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationEntity> for Reservation {
    fn from(e: ReservationEntity) -> Self {
        Reservation {
            id: e.id,
            spot_id: e.spot_id,
            parking_id: e.parking_id,
            user_id: e.user_id,
            start_time: e.start_time,
            end_time: e.end_time,
            entry_time: e.entry_time,
            exit_time: e.exit_time,
            status: e.status.into(),
            estimated_price: e.estimated_price,
            final_price: e.final_price,
            payment_method: e.payment_method,
            transaction_id: e.transaction_id,
            notes: e.notes,
            created_at: e.created_at,
        }
    }
}
