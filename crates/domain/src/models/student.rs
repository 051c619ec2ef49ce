//! Student domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::guardian::GuardianInput;
use super::pickup::StudentExitStatus;

/// A student enrolled at a school.
///
/// `exit_status` is mutated only by pickup workflow transitions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub photo: Option<String>,
    pub school_id: Uuid,
    pub class_id: Option<Uuid>,
    pub exit_status: StudentExitStatus,
    pub special_needs: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for enrolling a student, optionally with the initial
/// guardian links.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub birth_date: Option<NaiveDate>,

    pub photo: Option<String>,

    pub school_id: Uuid,

    pub class_id: Option<Uuid>,

    pub special_needs: Option<String>,

    pub notes: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub guardians: Vec<GuardianInput>,
}
