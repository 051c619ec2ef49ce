//! Pickup repository for database operations.
//!
//! Every state transition pairs the pickup write with the matching
//! student exit_status write in one transaction. Preconditions are part
//! of the UPDATE predicate, so a pickup in the wrong state is simply not
//! matched and the caller sees `None`.

use chrono::{DateTime, Utc};
use domain::models::pickup::wait_minutes;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PickupEntity, PickupStatusDb};
use crate::metrics::QueryTimer;

const PICKUP_COLUMNS: &str = "id, student_id, guardian_id, school_id, status, request_time, \
                              release_time, pickup_time, wait_time, guardian_latitude, \
                              guardian_longitude, staff_id, confirmation_photos, notes, created_at";

/// Outcome of a pickup request attempt.
#[derive(Debug)]
pub enum RequestOutcome {
    Created(PickupEntity),
    StudentNotFound,
    DuplicateActive,
}

/// Repository for pickup-related database operations.
#[derive(Clone)]
pub struct PickupRepository {
    pool: PgPool,
}

impl PickupRepository {
    /// Creates a new PickupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pickup request for a student.
    ///
    /// Locks the student row before the duplicate check so two concurrent
    /// requests serialize and only one creates a pickup. The partial
    /// unique index on active pickups backstops the check.
    pub async fn create_requested(
        &self,
        student_id: Uuid,
        guardian_id: Uuid,
        guardian_location: Option<(f64, f64)>,
        notes: Option<&str>,
    ) -> Result<RequestOutcome, sqlx::Error> {
        let timer = QueryTimer::new("create_pickup_request");

        let mut tx = self.pool.begin().await?;

        let school_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT school_id FROM students WHERE id = $1 FOR UPDATE")
                .bind(student_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((school_id,)) = school_id else {
            return Ok(RequestOutcome::StudentNotFound);
        };

        let (active,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM student_pickups WHERE student_id = $1 AND status IN ('REQUESTED', 'RELEASED'))",
        )
        .bind(student_id)
        .fetch_one(&mut *tx)
        .await?;
        if active {
            return Ok(RequestOutcome::DuplicateActive);
        }

        let pickup = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            INSERT INTO student_pickups
                (student_id, guardian_id, school_id, status, request_time,
                 guardian_latitude, guardian_longitude, notes)
            VALUES ($1, $2, $3, 'REQUESTED', NOW(), $4, $5, $6)
            RETURNING {PICKUP_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(guardian_id)
        .bind(school_id)
        .bind(guardian_location.map(|(lat, _)| lat))
        .bind(guardian_location.map(|(_, lon)| lon))
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE students SET exit_status = 'WAITING_EXIT' WHERE id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(RequestOutcome::Created(pickup))
    }

    /// Release a REQUESTED pickup to the waiting guardian. Returns `None`
    /// when the pickup does not exist or is not REQUESTED.
    pub async fn release(
        &self,
        pickup_id: Uuid,
        staff_id: Uuid,
        notes: Option<&str>,
    ) -> Result<Option<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("release_pickup");

        let mut tx = self.pool.begin().await?;

        let pickup = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            UPDATE student_pickups
            SET status = 'RELEASED',
                release_time = NOW(),
                staff_id = $2,
                notes = CASE
                    WHEN $3::text IS NULL THEN notes
                    WHEN notes IS NULL THEN $3
                    ELSE notes || E'\n' || $3
                END
            WHERE id = $1 AND status = 'REQUESTED'
            RETURNING {PICKUP_COLUMNS}
            "#,
        ))
        .bind(pickup_id)
        .bind(staff_id)
        .bind(notes)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(pickup) = pickup else {
            return Ok(None);
        };

        sqlx::query("UPDATE students SET exit_status = 'RELEASED' WHERE id = $1")
            .bind(pickup.student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(pickup))
    }

    /// Confirm a RELEASED pickup as completed. `wait_time` is computed
    /// from the stored request time. Returns `None` when the pickup does
    /// not exist or is not RELEASED.
    pub async fn complete(
        &self,
        pickup_id: Uuid,
        photo: Option<&str>,
        guardian_location: Option<(f64, f64)>,
    ) -> Result<Option<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("complete_pickup");

        let mut tx = self.pool.begin().await?;

        let row: Option<(Uuid, DateTime<Utc>)> = sqlx::query_as(
            "SELECT student_id, request_time FROM student_pickups WHERE id = $1 AND status = 'RELEASED' FOR UPDATE",
        )
        .bind(pickup_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((student_id, request_time)) = row else {
            return Ok(None);
        };

        let pickup_time = Utc::now();
        let wait_time = wait_minutes(request_time, pickup_time);

        let pickup = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            UPDATE student_pickups
            SET status = 'COMPLETED',
                pickup_time = $2,
                wait_time = $3,
                confirmation_photos = CASE
                    WHEN $4::text IS NULL THEN confirmation_photos
                    ELSE array_append(COALESCE(confirmation_photos, '{{}}'), $4)
                END,
                guardian_latitude = COALESCE($5, guardian_latitude),
                guardian_longitude = COALESCE($6, guardian_longitude)
            WHERE id = $1
            RETURNING {PICKUP_COLUMNS}
            "#,
        ))
        .bind(pickup_id)
        .bind(pickup_time)
        .bind(wait_time)
        .bind(photo)
        .bind(guardian_location.map(|(lat, _)| lat))
        .bind(guardian_location.map(|(_, lon)| lon))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE students SET exit_status = 'PICKED_UP' WHERE id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(pickup))
    }

    /// Cancel an active pickup and return the student to AT_SCHOOL.
    /// Returns `None` when the pickup does not exist or is terminal.
    pub async fn cancel(
        &self,
        pickup_id: Uuid,
        reason: Option<&str>,
    ) -> Result<Option<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("cancel_pickup");

        let note = reason.map(|r| format!("Cancelled: {r}"));

        let mut tx = self.pool.begin().await?;

        let pickup = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            UPDATE student_pickups
            SET status = 'CANCELLED',
                notes = CASE
                    WHEN $2::text IS NULL THEN notes
                    WHEN notes IS NULL THEN $2
                    ELSE notes || E'\n' || $2
                END
            WHERE id = $1 AND status IN ('REQUESTED', 'RELEASED')
            RETURNING {PICKUP_COLUMNS}
            "#,
        ))
        .bind(pickup_id)
        .bind(note)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(pickup) = pickup else {
            return Ok(None);
        };

        sqlx::query("UPDATE students SET exit_status = 'AT_SCHOOL' WHERE id = $1")
            .bind(pickup.student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(pickup))
    }

    /// Find a pickup by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_pickup_by_id");
        let result = sqlx::query_as::<_, PickupEntity>(&format!(
            "SELECT {PICKUP_COLUMNS} FROM student_pickups WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List pickups for a school, newest first, with optional status and
    /// request-date filters.
    #[allow(clippy::too_many_arguments)]
    pub async fn list_by_school(
        &self,
        school_id: Uuid,
        status: Option<PickupStatusDb>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pickups_by_school");
        let result = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            SELECT {PICKUP_COLUMNS}
            FROM student_pickups
            WHERE school_id = $1
              AND ($2::pickup_status IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR request_time >= $3)
              AND ($4::timestamptz IS NULL OR request_time <= $4)
            ORDER BY request_time DESC
            LIMIT $5 OFFSET $6
            "#,
        ))
        .bind(school_id)
        .bind(status)
        .bind(from)
        .bind(to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Pickup history for a student, newest first, with an optional
    /// request-date window.
    pub async fn list_by_student(
        &self,
        student_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pickups_by_student");
        let result = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            SELECT {PICKUP_COLUMNS}
            FROM student_pickups
            WHERE student_id = $1
              AND ($2::timestamptz IS NULL OR request_time >= $2)
              AND ($3::timestamptz IS NULL OR request_time <= $3)
            ORDER BY request_time DESC
            "#,
        ))
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active (REQUESTED or RELEASED) pickups opened by a guardian.
    pub async fn list_active_by_guardian(
        &self,
        guardian_id: Uuid,
    ) -> Result<Vec<PickupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_pickups_by_guardian");
        let result = sqlx::query_as::<_, PickupEntity>(&format!(
            r#"
            SELECT {PICKUP_COLUMNS}
            FROM student_pickups
            WHERE guardian_id = $1 AND status IN ('REQUESTED', 'RELEASED')
            ORDER BY request_time DESC
            "#,
        ))
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
