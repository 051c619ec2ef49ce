//! Reservation lifecycle engine.
//!
//! Booking, check-in, checkout and cancellation over the reservation
//! repository. Ownership is enforced here; availability and overlap are
//! enforced inside the booking transaction.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::record_reservation_transition;
use domain::models::user::UserType;
use domain::models::Reservation;
use domain::services::is_staff;
use persistence::entities::ReservationEntity;
use persistence::repositories::{BookingOutcome, ReservationRepository};

/// Engine for the reservation lifecycle.
#[derive(Clone)]
pub struct ReservationService {
    pool: PgPool,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Book a spot for a time window.
    pub async fn create(
        &self,
        user_id: Uuid,
        spot_id: Uuid,
        parking_id: Uuid,
        start_time: chrono::DateTime<chrono::Utc>,
        end_time: chrono::DateTime<chrono::Utc>,
        payment_method: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Reservation, ApiError> {
        if end_time <= start_time {
            return Err(ApiError::Validation(
                "End time must be after start time".to_string(),
            ));
        }

        let repo = ReservationRepository::new(self.pool.clone());
        let outcome = repo
            .create_scheduled(
                spot_id,
                parking_id,
                user_id,
                start_time,
                end_time,
                payment_method,
                notes,
            )
            .await?;

        let entity = match outcome {
            BookingOutcome::Created(entity) => entity,
            BookingOutcome::SpotUnavailable => {
                return Err(ApiError::NotFound("Spot not available".to_string()));
            }
            BookingOutcome::Overlap => {
                return Err(ApiError::Conflict(
                    "Spot is already reserved for this period".to_string(),
                ));
            }
        };

        record_reservation_transition("SCHEDULED");
        info!(
            reservation_id = %entity.id,
            spot_id = %spot_id,
            estimated_price = entity.estimated_price,
            "Reservation created"
        );
        Ok(entity.into())
    }

    /// Check a scheduled reservation in.
    pub async fn check_in(
        &self,
        reservation_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
    ) -> Result<Reservation, ApiError> {
        let repo = ReservationRepository::new(self.pool.clone());
        self.authorize(&repo, reservation_id, caller_id, caller_type)
            .await?;

        let entity = repo
            .check_in(reservation_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

        record_reservation_transition("ACTIVE");
        info!(reservation_id = %reservation_id, "Reservation checked in");
        Ok(entity.into())
    }

    /// Check an active reservation out, settling the final price.
    pub async fn check_out(
        &self,
        reservation_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
        transaction_id: Option<Uuid>,
    ) -> Result<Reservation, ApiError> {
        let repo = ReservationRepository::new(self.pool.clone());
        self.authorize(&repo, reservation_id, caller_id, caller_type)
            .await?;

        let entity = repo
            .check_out(reservation_id, transaction_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

        record_reservation_transition("COMPLETED");
        info!(
            reservation_id = %reservation_id,
            final_price = entity.final_price,
            "Reservation completed"
        );
        Ok(entity.into())
    }

    /// Cancel a scheduled or active reservation.
    pub async fn cancel(
        &self,
        reservation_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
        reason: Option<&str>,
    ) -> Result<Reservation, ApiError> {
        let repo = ReservationRepository::new(self.pool.clone());
        self.authorize(&repo, reservation_id, caller_id, caller_type)
            .await?;

        let entity = repo
            .cancel(reservation_id, reason)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

        record_reservation_transition("CANCELLED");
        info!(reservation_id = %reservation_id, "Reservation cancelled");
        Ok(entity.into())
    }

    /// The reservation must exist and belong to the caller, unless the
    /// caller is staff.
    async fn authorize(
        &self,
        repo: &ReservationRepository,
        reservation_id: Uuid,
        caller_id: Uuid,
        caller_type: UserType,
    ) -> Result<ReservationEntity, ApiError> {
        let entity = repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

        if entity.user_id != caller_id && !is_staff(caller_type) {
            return Err(ApiError::Forbidden(
                "Not authorized for this reservation".to_string(),
            ));
        }

        Ok(entity)
    }
}
