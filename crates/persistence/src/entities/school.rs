//! School entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::School;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the schools table.
#[derive(Debug, Clone, FromRow)]
pub struct SchoolEntity {
    pub id: Uuid,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SchoolEntity> for School {
    fn from(e: SchoolEntity) -> Self {
        School {
            id: e.id,
            name: e.name,
            phone_number: e.phone_number,
            created_at: e.created_at,
            address: None,
        }
    }
}
