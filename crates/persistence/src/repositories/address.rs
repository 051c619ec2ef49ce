//! Address repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AddressEntity;
use crate::metrics::QueryTimer;

const ADDRESS_COLUMNS: &str = "id, user_id, school_id, parking_id, line1, line2, city, state, \
                               postal_code, country, latitude, longitude, created_at";

/// Borrowed address fields for insert/update, shared by the owning
/// repositories.
#[derive(Debug, Clone, Copy)]
pub struct AddressFields<'a> {
    pub line1: &'a str,
    pub line2: Option<&'a str>,
    pub city: &'a str,
    pub state: &'a str,
    pub postal_code: &'a str,
    pub country: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Repository for address lookups and detachment.
#[derive(Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Creates a new AddressRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the address attached to a school.
    pub async fn find_by_school(
        &self,
        school_id: Uuid,
    ) -> Result<Option<AddressEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_address_by_school");
        let result = sqlx::query_as::<_, AddressEntity>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE school_id = $1",
        ))
        .bind(school_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the address attached to a parking facility.
    pub async fn find_by_parking(
        &self,
        parking_id: Uuid,
    ) -> Result<Option<AddressEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_address_by_parking");
        let result = sqlx::query_as::<_, AddressEntity>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE parking_id = $1",
        ))
        .bind(parking_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert or replace the address attached to a parking facility.
    pub async fn upsert_for_parking(
        &self,
        parking_id: Uuid,
        addr: &AddressFields<'_>,
    ) -> Result<AddressEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_address_for_parking");
        let result = sqlx::query_as::<_, AddressEntity>(&format!(
            r#"
            INSERT INTO addresses
                (parking_id, line1, line2, city, state, postal_code, country, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (parking_id) WHERE parking_id IS NOT NULL DO UPDATE SET
                line1 = EXCLUDED.line1,
                line2 = EXCLUDED.line2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                postal_code = EXCLUDED.postal_code,
                country = EXCLUDED.country,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude
            RETURNING {ADDRESS_COLUMNS}
            "#,
        ))
        .bind(parking_id)
        .bind(addr.line1)
        .bind(addr.line2)
        .bind(addr.city)
        .bind(addr.state)
        .bind(addr.postal_code)
        .bind(addr.country)
        .bind(addr.latitude)
        .bind(addr.longitude)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an unattached-owner address by ID. Returns whether a row was
    /// removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_address");
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
