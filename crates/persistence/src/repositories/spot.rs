//! Parking spot repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{SpotEntity, SpotTypeDb};
use crate::metrics::QueryTimer;

const SPOT_COLUMNS: &str = "id, parking_id, identifier, spot_type, dimensions, price_minute, \
                            price_hour, price_day, price_month, status, created_at";

/// Repository for parking-spot database operations.
#[derive(Clone)]
pub struct SpotRepository {
    pool: PgPool,
}

impl SpotRepository {
    /// Creates a new SpotRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a spot to a facility. New spots start AVAILABLE.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        parking_id: Uuid,
        identifier: Option<&str>,
        spot_type: SpotTypeDb,
        dimensions: Option<serde_json::Value>,
        price_minute: Option<f64>,
        price_hour: f64,
        price_day: Option<f64>,
        price_month: Option<f64>,
    ) -> Result<SpotEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_spot");
        let result = sqlx::query_as::<_, SpotEntity>(&format!(
            r#"
            INSERT INTO parking_spots
                (parking_id, identifier, spot_type, dimensions,
                 price_minute, price_hour, price_day, price_month, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'AVAILABLE')
            RETURNING {SPOT_COLUMNS}
            "#,
        ))
        .bind(parking_id)
        .bind(identifier)
        .bind(spot_type)
        .bind(dimensions)
        .bind(price_minute)
        .bind(price_hour)
        .bind(price_day)
        .bind(price_month)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a spot by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SpotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_spot_by_id");
        let result = sqlx::query_as::<_, SpotEntity>(&format!(
            "SELECT {SPOT_COLUMNS} FROM parking_spots WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// AVAILABLE spots in a facility. When a time window is given, spots
    /// with a SCHEDULED or ACTIVE reservation overlapping that window are
    /// excluded as well.
    pub async fn list_available(
        &self,
        parking_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<SpotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_available_spots");
        let (start, end) = match window {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, SpotEntity>(&format!(
            r#"
            SELECT {SPOT_COLUMNS}
            FROM parking_spots s
            WHERE s.parking_id = $1
              AND s.status = 'AVAILABLE'
              AND ($2::timestamptz IS NULL OR NOT EXISTS (
                  SELECT 1 FROM parking_reservations r
                  WHERE r.spot_id = s.id
                    AND r.status IN ('SCHEDULED', 'ACTIVE')
                    AND r.start_time <= $3
                    AND r.end_time >= $2
              ))
            ORDER BY s.identifier NULLS LAST, s.created_at
            "#,
        ))
        .bind(parking_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
