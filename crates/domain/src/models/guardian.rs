//! Guardian authorization link between a user and a student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Authorization for a user to act as a guardian of a student.
///
/// `can_pickup` gates the pickup workflow; `verified` and the validity
/// window are policy knobs (see `services::authorization`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianLink {
    pub id: Uuid,
    pub student_id: Uuid,
    pub user_id: Uuid,
    pub relation: String,
    pub is_primary: bool,
    pub verified: bool,
    pub can_pickup: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Guardian fields accepted when enrolling a student.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuardianInput {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Relation must be 1-50 characters"))]
    pub relation: String,

    #[serde(default)]
    pub is_primary: bool,

    #[serde(default = "default_can_pickup")]
    pub can_pickup: bool,

    pub end_date: Option<DateTime<Utc>>,
}

/// Request payload for adding a guardian to an existing student.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddGuardianRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Relation must be 1-50 characters"))]
    pub relation: String,

    #[serde(default)]
    pub is_primary: bool,

    #[serde(default = "default_can_pickup")]
    pub can_pickup: bool,

    pub end_date: Option<DateTime<Utc>>,
}

fn default_can_pickup() -> bool {
    true
}
