//! Parking facility entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::pickup::GeoPoint;
use domain::models::{Parking, ParkingStatus, ParkingType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for parking type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "parking_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingTypeDb {
    Commercial,
    Residential,
    Land,
}

impl From<ParkingTypeDb> for ParkingType {
    fn from(t: ParkingTypeDb) -> Self {
        match t {
            ParkingTypeDb::Commercial => ParkingType::Commercial,
            ParkingTypeDb::Residential => ParkingType::Residential,
            ParkingTypeDb::Land => ParkingType::Land,
        }
    }
}

impl From<ParkingType> for ParkingTypeDb {
    fn from(t: ParkingType) -> Self {
        match t {
            ParkingType::Commercial => ParkingTypeDb::Commercial,
            ParkingType::Residential => ParkingTypeDb::Residential,
            ParkingType::Land => ParkingTypeDb::Land,
        }
    }
}

/// Database enum for parking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "parking_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingStatusDb {
    Active,
    Inactive,
    PendingApproval,
}

impl From<ParkingStatusDb> for ParkingStatus {
    fn from(s: ParkingStatusDb) -> Self {
        match s {
            ParkingStatusDb::Active => ParkingStatus::Active,
            ParkingStatusDb::Inactive => ParkingStatus::Inactive,
            ParkingStatusDb::PendingApproval => ParkingStatus::PendingApproval,
        }
    }
}

impl From<ParkingStatus> for ParkingStatusDb {
    fn from(s: ParkingStatus) -> Self {
        match s {
            ParkingStatus::Active => ParkingStatusDb::Active,
            ParkingStatus::Inactive => ParkingStatusDb::Inactive,
            ParkingStatus::PendingApproval => ParkingStatusDb::PendingApproval,
        }
    }
}

/// Database row mapping for the parkings table.
#[derive(Debug, Clone, FromRow)]
pub struct ParkingEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub parking_type: ParkingTypeDb,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Option<Vec<String>>,
    pub operation_hours: Option<serde_json::Value>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub status: ParkingStatusDb,
    pub created_at: DateTime<Utc>,
}

impl From<ParkingEntity> for Parking {
    fn from(e: ParkingEntity) -> Self {
        Parking {
            id: e.id,
            owner_id: e.owner_id,
            name: e.name,
            parking_type: e.parking_type.into(),
            coordinates: GeoPoint {
                latitude: e.latitude,
                longitude: e.longitude,
            },
            photos: e.photos.unwrap_or_default(),
            operation_hours: e.operation_hours,
            description: e.description,
            rules: e.rules,
            status: e.status.into(),
            created_at: e.created_at,
            address: None,
        }
    }
}
