//! School repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SchoolEntity;
use crate::metrics::QueryTimer;
use crate::repositories::address::AddressFields;

/// Repository for school-related database operations.
#[derive(Clone)]
pub struct SchoolRepository {
    pool: PgPool,
}

impl SchoolRepository {
    /// Creates a new SchoolRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a school, optionally with its address, in one transaction.
    pub async fn create(
        &self,
        name: &str,
        phone_number: Option<&str>,
        address: Option<&AddressFields<'_>>,
    ) -> Result<SchoolEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_school");

        let mut tx = self.pool.begin().await?;

        let school = sqlx::query_as::<_, SchoolEntity>(
            r#"
            INSERT INTO schools (name, phone_number)
            VALUES ($1, $2)
            RETURNING id, name, phone_number, created_at
            "#,
        )
        .bind(name)
        .bind(phone_number)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(addr) = address {
            sqlx::query(
                r#"
                INSERT INTO addresses (school_id, line1, line2, city, state, postal_code, country, latitude, longitude)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(school.id)
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
        Ok(school)
    }

    /// Find a school by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SchoolEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_school_by_id");
        let result = sqlx::query_as::<_, SchoolEntity>(
            "SELECT id, name, phone_number, created_at FROM schools WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
