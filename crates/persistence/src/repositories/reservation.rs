//! Reservation repository for database operations.
//!
//! Booking locks the spot row before the overlap check so concurrent
//! bookings for the same spot serialize; of two racing calls with
//! intersecting windows exactly one inserts.

use chrono::{DateTime, Utc};
use domain::services::{duration_hours, price_for_duration};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ReservationEntity, ReservationStatusDb, SpotEntity};
use crate::metrics::QueryTimer;

const RESERVATION_COLUMNS: &str = "id, spot_id, parking_id, user_id, start_time, end_time, \
                                   entry_time, exit_time, status, estimated_price, final_price, \
                                   payment_method, transaction_id, notes, created_at";

const SPOT_COLUMNS: &str = "id, parking_id, identifier, spot_type, dimensions, price_minute, \
                            price_hour, price_day, price_month, status, created_at";

/// Outcome of a booking attempt.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(ReservationEntity),
    SpotUnavailable,
    Overlap,
}

/// Repository for reservation-related database operations.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Book a spot for [start, end]. The spot must be AVAILABLE in the
    /// given facility and free of SCHEDULED/ACTIVE reservations touching
    /// the window (closed intervals, shared endpoints collide). On
    /// success the reservation is SCHEDULED and the spot flips to
    /// RESERVED.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_scheduled(
        &self,
        spot_id: Uuid,
        parking_id: Uuid,
        user_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        payment_method: Option<&str>,
        notes: Option<&str>,
    ) -> Result<BookingOutcome, sqlx::Error> {
        let timer = QueryTimer::new("create_reservation");

        let mut tx = self.pool.begin().await?;

        let spot = sqlx::query_as::<_, SpotEntity>(&format!(
            r#"
            SELECT {SPOT_COLUMNS}
            FROM parking_spots
            WHERE id = $1 AND parking_id = $2 AND status = 'AVAILABLE'
            FOR UPDATE
            "#,
        ))
        .bind(spot_id)
        .bind(parking_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(spot) = spot else {
            return Ok(BookingOutcome::SpotUnavailable);
        };

        let (overlap,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM parking_reservations
                WHERE spot_id = $1
                  AND status IN ('SCHEDULED', 'ACTIVE')
                  AND start_time <= $3
                  AND end_time >= $2
            )
            "#,
        )
        .bind(spot_id)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&mut *tx)
        .await?;
        if overlap {
            return Ok(BookingOutcome::Overlap);
        }

        let estimated_price =
            price_for_duration(&spot.rates(), duration_hours(start_time, end_time));

        let reservation = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            INSERT INTO parking_reservations
                (spot_id, parking_id, user_id, start_time, end_time, status,
                 estimated_price, payment_method, notes)
            VALUES ($1, $2, $3, $4, $5, 'SCHEDULED', $6, $7, $8)
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(spot_id)
        .bind(parking_id)
        .bind(user_id)
        .bind(start_time)
        .bind(end_time)
        .bind(estimated_price)
        .bind(payment_method)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE parking_spots SET status = 'RESERVED' WHERE id = $1")
            .bind(spot_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(BookingOutcome::Created(reservation))
    }

    /// Check a SCHEDULED reservation in. Returns `None` when the
    /// reservation does not exist or is not SCHEDULED.
    pub async fn check_in(
        &self,
        reservation_id: Uuid,
    ) -> Result<Option<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("check_in_reservation");
        let result = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            UPDATE parking_reservations
            SET status = 'ACTIVE', entry_time = NOW()
            WHERE id = $1 AND status = 'SCHEDULED'
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check an ACTIVE reservation out. The final price is recomputed
    /// from the actual entry/exit duration and the spot returns to
    /// AVAILABLE. Returns `None` when the reservation does not exist or
    /// is not ACTIVE.
    pub async fn check_out(
        &self,
        reservation_id: Uuid,
        transaction_id: Option<Uuid>,
    ) -> Result<Option<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("check_out_reservation");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM parking_reservations
            WHERE id = $1 AND status = 'ACTIVE'
            FOR UPDATE
            "#,
        ))
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let spot = sqlx::query_as::<_, SpotEntity>(&format!(
            "SELECT {SPOT_COLUMNS} FROM parking_spots WHERE id = $1 FOR UPDATE",
        ))
        .bind(row.spot_id)
        .fetch_one(&mut *tx)
        .await?;

        let exit_time = Utc::now();
        let entry_time = row.entry_time.unwrap_or(row.start_time);
        let final_price =
            price_for_duration(&spot.rates(), duration_hours(entry_time, exit_time));

        let reservation = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            UPDATE parking_reservations
            SET status = 'COMPLETED',
                exit_time = $2,
                final_price = $3,
                transaction_id = COALESCE($4, transaction_id)
            WHERE id = $1
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(reservation_id)
        .bind(exit_time)
        .bind(final_price)
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE parking_spots SET status = 'AVAILABLE' WHERE id = $1")
            .bind(row.spot_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(reservation))
    }

    /// Cancel a SCHEDULED or ACTIVE reservation and free the spot.
    /// Returns `None` when the reservation does not exist or is terminal.
    pub async fn cancel(
        &self,
        reservation_id: Uuid,
        reason: Option<&str>,
    ) -> Result<Option<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("cancel_reservation");

        let note = reason.map(|r| format!("Cancelled: {r}"));

        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            UPDATE parking_reservations
            SET status = 'CANCELLED',
                notes = CASE
                    WHEN $2::text IS NULL THEN notes
                    WHEN notes IS NULL THEN $2
                    ELSE notes || E'\n' || $2
                END
            WHERE id = $1 AND status IN ('SCHEDULED', 'ACTIVE')
            RETURNING {RESERVATION_COLUMNS}
            "#,
        ))
        .bind(reservation_id)
        .bind(note)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(reservation) = reservation else {
            return Ok(None);
        };

        sqlx::query("UPDATE parking_spots SET status = 'AVAILABLE' WHERE id = $1")
            .bind(reservation.spot_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(reservation))
    }

    /// Find a reservation by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reservation_by_id");
        let result = sqlx::query_as::<_, ReservationEntity>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM parking_reservations WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's reservations, newest first, with an optional status
    /// filter.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<ReservationStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReservationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_reservations_for_user");
        let result = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM parking_reservations
            WHERE user_id = $1
              AND ($2::reservation_status IS NULL OR status = $2)
            ORDER BY start_time DESC
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
