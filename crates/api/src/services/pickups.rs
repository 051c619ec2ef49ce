//! Pickup workflow engine.
//!
//! Orchestrates the pickup lifecycle: authorization checks against the
//! guardian link, staff checks for release, and the repository's
//! transactional transitions. Wrong-state transitions surface as
//! NotFound; only authorization failures become Forbidden.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::record_pickup_transition;
use domain::models::pickup::{GeoPoint, Pickup};
use domain::models::user::UserType;
use domain::services::{is_staff, may_pickup, PickupPolicy};
use persistence::repositories::{
    GuardianRepository, PickupRepository, RequestOutcome, StudentRepository, UserRepository,
};

/// Engine for the pickup workflow.
#[derive(Clone)]
pub struct PickupService {
    pool: PgPool,
    policy: PickupPolicy,
}

impl PickupService {
    pub fn new(pool: PgPool, policy: PickupPolicy) -> Self {
        Self { pool, policy }
    }

    /// A guardian requests the pickup of a student.
    pub async fn request(
        &self,
        guardian_id: Uuid,
        student_id: Uuid,
        location: Option<GeoPoint>,
        notes: Option<&str>,
    ) -> Result<Pickup, ApiError> {
        let student_repo = StudentRepository::new(self.pool.clone());
        student_repo
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

        let guardian_repo = GuardianRepository::new(self.pool.clone());
        let link = guardian_repo
            .find_link(student_id, guardian_id)
            .await?
            .ok_or_else(|| {
                ApiError::Forbidden("Not authorized to pick up this student".to_string())
            })?;

        if !may_pickup(&self.policy, &link.into(), Utc::now()) {
            return Err(ApiError::Forbidden(
                "Not authorized to pick up this student".to_string(),
            ));
        }

        let pickup_repo = PickupRepository::new(self.pool.clone());
        let outcome = pickup_repo
            .create_requested(
                student_id,
                guardian_id,
                location.map(|p| (p.latitude, p.longitude)),
                notes,
            )
            .await?;

        let entity = match outcome {
            RequestOutcome::Created(entity) => entity,
            RequestOutcome::StudentNotFound => {
                return Err(ApiError::NotFound("Student not found".to_string()));
            }
            RequestOutcome::DuplicateActive => {
                return Err(ApiError::Conflict(
                    "Student already has an active pickup".to_string(),
                ));
            }
        };

        record_pickup_transition("REQUESTED");
        info!(
            pickup_id = %entity.id,
            student_id = %student_id,
            guardian_id = %guardian_id,
            "Pickup requested"
        );
        Ok(entity.into())
    }

    /// Staff releases a requested student to the waiting guardian.
    pub async fn release(
        &self,
        pickup_id: Uuid,
        staff_id: Uuid,
        notes: Option<&str>,
    ) -> Result<Pickup, ApiError> {
        let user_repo = UserRepository::new(self.pool.clone());
        let staff = user_repo
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| ApiError::Forbidden("Not authorized to release students".to_string()))?;

        if !is_staff(staff.user_type.into()) {
            return Err(ApiError::Forbidden(
                "Not authorized to release students".to_string(),
            ));
        }

        let pickup_repo = PickupRepository::new(self.pool.clone());
        let entity = pickup_repo
            .release(pickup_id, staff_id, notes)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

        record_pickup_transition("RELEASED");
        info!(pickup_id = %pickup_id, staff_id = %staff_id, "Student released");
        Ok(entity.into())
    }

    /// The guardian confirms the pickup happened.
    pub async fn confirm(
        &self,
        pickup_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
        photo: Option<&str>,
        location: Option<GeoPoint>,
    ) -> Result<Pickup, ApiError> {
        let pickup_repo = PickupRepository::new(self.pool.clone());
        let existing = pickup_repo
            .find_by_id(pickup_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

        if existing.guardian_id != caller_id && !is_staff(caller_type) {
            return Err(ApiError::Forbidden(
                "Only the requesting guardian may confirm this pickup".to_string(),
            ));
        }

        let entity = pickup_repo
            .complete(
                pickup_id,
                photo,
                location.map(|p| (p.latitude, p.longitude)),
            )
            .await?
            .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

        record_pickup_transition("COMPLETED");
        info!(
            pickup_id = %pickup_id,
            wait_time = entity.wait_time,
            "Pickup confirmed"
        );
        Ok(entity.into())
    }

    /// Cancel an active pickup and return the student to the school.
    pub async fn cancel(
        &self,
        pickup_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
        reason: Option<&str>,
    ) -> Result<Pickup, ApiError> {
        let pickup_repo = PickupRepository::new(self.pool.clone());
        let existing = pickup_repo
            .find_by_id(pickup_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

        if existing.guardian_id != caller_id && !is_staff(caller_type) {
            return Err(ApiError::Forbidden(
                "Only the requesting guardian may cancel this pickup".to_string(),
            ));
        }

        let entity = pickup_repo
            .cancel(pickup_id, reason)
            .await?
            .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

        record_pickup_transition("CANCELLED");
        info!(pickup_id = %pickup_id, "Pickup cancelled");
        Ok(entity.into())
    }
}
