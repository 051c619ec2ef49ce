//! Parking facility repository for database operations.

use geo::{HaversineDistance, Point};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ParkingEntity, ParkingStatusDb, ParkingTypeDb};
use crate::metrics::QueryTimer;
use crate::repositories::address::AddressFields;

const PARKING_COLUMNS: &str = "id, owner_id, name, parking_type, latitude, longitude, photos, \
                               operation_hours, description, rules, status, created_at";

/// Partial update for a parking facility. `None` fields are left alone.
#[derive(Debug, Default)]
pub struct ParkingUpdate<'a> {
    pub name: Option<&'a str>,
    pub parking_type: Option<ParkingTypeDb>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<&'a str>,
    pub rules: Option<&'a str>,
    pub photos: Option<&'a [String]>,
    pub operation_hours: Option<serde_json::Value>,
    pub status: Option<ParkingStatusDb>,
}

/// A parking facility paired with its haversine distance from a search
/// origin, in meters.
#[derive(Debug, Clone)]
pub struct NearbyParking {
    pub parking: ParkingEntity,
    pub distance_meters: f64,
}

/// Repository for parking-facility database operations.
#[derive(Clone)]
pub struct ParkingRepository {
    pool: PgPool,
}

impl ParkingRepository {
    /// Creates a new ParkingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a facility, optionally with its address, in one
    /// transaction. New facilities always start PENDING_APPROVAL.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        parking_type: ParkingTypeDb,
        latitude: f64,
        longitude: f64,
        photos: &[String],
        operation_hours: Option<serde_json::Value>,
        description: Option<&str>,
        rules: Option<&str>,
        address: Option<&AddressFields<'_>>,
    ) -> Result<ParkingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_parking");

        let mut tx = self.pool.begin().await?;

        let parking = sqlx::query_as::<_, ParkingEntity>(&format!(
            r#"
            INSERT INTO parkings
                (owner_id, name, parking_type, latitude, longitude, photos,
                 operation_hours, description, rules, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'PENDING_APPROVAL')
            RETURNING {PARKING_COLUMNS}
            "#,
        ))
        .bind(owner_id)
        .bind(name)
        .bind(parking_type)
        .bind(latitude)
        .bind(longitude)
        .bind(photos)
        .bind(operation_hours)
        .bind(description)
        .bind(rules)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(addr) = address {
            sqlx::query(
                r#"
                INSERT INTO addresses
                    (parking_id, line1, line2, city, state, postal_code, country, latitude, longitude)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(parking.id)
            .bind(addr.line1)
            .bind(addr.line2)
            .bind(addr.city)
            .bind(addr.state)
            .bind(addr.postal_code)
            .bind(addr.country)
            .bind(addr.latitude)
            .bind(addr.longitude)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(parking)
    }

    /// Find a facility by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_parking_by_id");
        let result = sqlx::query_as::<_, ParkingEntity>(&format!(
            "SELECT {PARKING_COLUMNS} FROM parkings WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update. Returns `None` when the facility does not
    /// exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: ParkingUpdate<'_>,
    ) -> Result<Option<ParkingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_parking");
        let result = sqlx::query_as::<_, ParkingEntity>(&format!(
            r#"
            UPDATE parkings
            SET name = COALESCE($2, name),
                parking_type = COALESCE($3, parking_type),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                description = COALESCE($6, description),
                rules = COALESCE($7, rules),
                photos = COALESCE($8, photos),
                operation_hours = COALESCE($9, operation_hours),
                status = COALESCE($10, status)
            WHERE id = $1
            RETURNING {PARKING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.parking_type)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.description)
        .bind(update.rules)
        .bind(update.photos)
        .bind(update.operation_hours)
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// ACTIVE facilities within `radius_meters` of a point, closest
    /// first. Distance is computed in process from the stored
    /// coordinates.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<NearbyParking>, sqlx::Error> {
        let timer = QueryTimer::new("find_nearby_parkings");
        let candidates = sqlx::query_as::<_, ParkingEntity>(&format!(
            "SELECT {PARKING_COLUMNS} FROM parkings WHERE status = 'ACTIVE'",
        ))
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let origin = Point::new(longitude, latitude);
        let mut nearby: Vec<NearbyParking> = candidates
            .into_iter()
            .filter_map(|parking| {
                let distance_meters =
                    origin.haversine_distance(&Point::new(parking.longitude, parking.latitude));
                (distance_meters <= radius_meters).then_some(NearbyParking {
                    parking,
                    distance_meters,
                })
            })
            .collect();
        nearby.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        Ok(nearby)
    }
}
