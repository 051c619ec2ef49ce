//! Parking reservation lifecycle model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a reservation.
///
/// SCHEDULED -> ACTIVE -> COMPLETED, or SCHEDULED/ACTIVE -> CANCELLED.
/// EXPIRED exists as a value but is only ever set by an external sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
    Expired,
}

impl ReservationStatus {
    /// States that block other bookings on the same spot.
    pub fn holds_spot(&self) -> bool {
        matches!(self, ReservationStatus::Scheduled | ReservationStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Scheduled => "SCHEDULED",
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Expired => "EXPIRED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(ReservationStatus::Scheduled),
            "ACTIVE" => Some(ReservationStatus::Active),
            "COMPLETED" => Some(ReservationStatus::Completed),
            "CANCELLED" => Some(ReservationStatus::Cancelled),
            "EXPIRED" => Some(ReservationStatus::Expired),
            _ => None,
        }
    }
}

/// A reservation binding a spot, its facility and a user to a time window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub spot_id: Uuid,
    pub parking_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub status: ReservationStatus,
    /// Price quoted at booking from the requested window.
    pub estimated_price: f64,
    /// Price charged at checkout from the actual entry/exit duration.
    pub final_price: Option<f64>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for booking a spot.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub spot_id: Uuid,

    pub parking_id: Uuid,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    #[validate(length(max = 50, message = "Payment method must be at most 50 characters"))]
    pub payment_method: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for checkout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    pub transaction_id: Option<Uuid>,
}

/// Request payload for cancelling a reservation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationRequest {
    #[validate(length(max = 2000, message = "Reason must be at most 2000 characters"))]
    pub reason: Option<String>,
}

/// Query parameters for listing the caller's reservations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub status: Option<ReservationStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_spot() {
        assert!(ReservationStatus::Scheduled.holds_spot());
        assert!(ReservationStatus::Active.holds_spot());
        assert!(!ReservationStatus::Completed.holds_spot());
        assert!(!ReservationStatus::Cancelled.holds_spot());
        assert!(!ReservationStatus::Expired.holds_spot());
    }

    #[test]
    fn test_status_roundtrip() {
        for s in [
            ReservationStatus::Scheduled,
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            ReservationStatus::Expired,
        ] {
            assert_eq!(ReservationStatus::parse(s.as_str()), Some(s));
        }
    }
}
