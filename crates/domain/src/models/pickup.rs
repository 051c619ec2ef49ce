//! Student pickup lifecycle model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Where a student is in the exit process, as visible on the student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentExitStatus {
    AtSchool,
    WaitingExit,
    Released,
    PickedUp,
}

impl StudentExitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentExitStatus::AtSchool => "AT_SCHOOL",
            StudentExitStatus::WaitingExit => "WAITING_EXIT",
            StudentExitStatus::Released => "RELEASED",
            StudentExitStatus::PickedUp => "PICKED_UP",
        }
    }
}

/// Lifecycle state of one pickup attempt.
///
/// REQUESTED -> RELEASED -> COMPLETED, or REQUESTED/RELEASED -> CANCELLED.
/// COMPLETED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    Requested,
    Released,
    Completed,
    Cancelled,
}

impl PickupStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PickupStatus::Requested | PickupStatus::Released)
    }
}

/// A geographic point supplied by a guardian's device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,
}

/// One pickup attempt for a student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: Uuid,
    pub student_id: Uuid,
    pub guardian_id: Uuid,
    pub school_id: Uuid,
    pub status: PickupStatus,
    pub request_time: DateTime<Utc>,
    pub release_time: Option<DateTime<Utc>>,
    pub pickup_time: Option<DateTime<Utc>>,
    /// Whole minutes between request and confirmed pickup.
    pub wait_time: Option<i32>,
    pub guardian_location: Option<GeoPoint>,
    pub staff_id: Option<Uuid>,
    pub confirmation_photos: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for requesting a pickup.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestPickupRequest {
    pub student_id: Uuid,

    #[validate(nested)]
    pub location: Option<GeoPoint>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for releasing a student.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePickupRequest {
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for confirming a pickup.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPickupRequest {
    pub confirmation_photo: Option<String>,

    #[validate(nested)]
    pub location: Option<GeoPoint>,
}

/// Request payload for cancelling a pickup.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelPickupRequest {
    #[validate(length(max = 2000, message = "Reason must be at most 2000 characters"))]
    pub reason: Option<String>,
}

/// Computes the recorded wait time: whole minutes between the request and
/// the confirmed pickup, rounded to nearest.
pub fn wait_minutes(request_time: DateTime<Utc>, pickup_time: DateTime<Utc>) -> i32 {
    let millis = (pickup_time - request_time).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_wait_minutes_rounds_to_nearest() {
        let t = Utc::now();
        // 125 seconds is 2.08 minutes, rounds to 2
        assert_eq!(wait_minutes(t, t + Duration::seconds(125)), 2);
        // 150 seconds is exactly 2.5 minutes, rounds to 3
        assert_eq!(wait_minutes(t, t + Duration::seconds(150)), 3);
        assert_eq!(wait_minutes(t, t + Duration::seconds(29)), 0);
        assert_eq!(wait_minutes(t, t), 0);
    }

    #[test]
    fn test_pickup_status_active() {
        assert!(PickupStatus::Requested.is_active());
        assert!(PickupStatus::Released.is_active());
        assert!(!PickupStatus::Completed.is_active());
        assert!(!PickupStatus::Cancelled.is_active());
    }
}
