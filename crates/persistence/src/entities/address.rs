//! Address entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Address;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the addresses table.
///
/// Exactly one of the owner columns is set, enforced by a table check
/// constraint.
#[derive(Debug, Clone, FromRow)]
pub struct AddressEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub parking_id: Option<Uuid>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<AddressEntity> for Address {
    fn from(e: AddressEntity) -> Self {
        Address {
            id: e.id,
            line1: e.line1,
            line2: e.line2,
            city: e.city,
            state: e.state,
            postal_code: e.postal_code,
            country: e.country,
            latitude: e.latitude,
            longitude: e.longitude,
            created_at: e.created_at,
        }
    }
}
