//! Parking spot entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::spot::SpotRates;
use domain::models::{ParkingSpot, SpotStatus, SpotType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for spot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "spot_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotTypeDb {
    Standard,
    Accessible,
    Senior,
    Electric,
    Motorcycle,
}

impl From<SpotTypeDb> for SpotType {
    fn from(t: SpotTypeDb) -> Self {
        match t {
            SpotTypeDb::Standard => SpotType::Standard,
            SpotTypeDb::Accessible => SpotType::Accessible,
            SpotTypeDb::Senior => SpotType::Senior,
            SpotTypeDb::Electric => SpotType::Electric,
            SpotTypeDb::Motorcycle => SpotType::Motorcycle,
        }
    }
}

impl From<SpotType> for SpotTypeDb {
    fn from(t: SpotType) -> Self {
        match t {
            SpotType::Standard => SpotTypeDb::Standard,
            SpotType::Accessible => SpotTypeDb::Accessible,
            SpotType::Senior => SpotTypeDb::Senior,
            SpotType::Electric => SpotTypeDb::Electric,
            SpotType::Motorcycle => SpotTypeDb::Motorcycle,
        }
    }
}

/// Database enum for spot status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "spot_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatusDb {
    Available,
    Occupied,
    Reserved,
    Unavailable,
    Maintenance,
}

impl From<SpotStatusDb> for SpotStatus {
    fn from(s: SpotStatusDb) -> Self {
        match s {
            SpotStatusDb::Available => SpotStatus::Available,
            SpotStatusDb::Occupied => SpotStatus::Occupied,
            SpotStatusDb::Reserved => SpotStatus::Reserved,
            SpotStatusDb::Unavailable => SpotStatus::Unavailable,
            SpotStatusDb::Maintenance => SpotStatus::Maintenance,
        }
    }
}

/// Database row mapping for the parking_spots table.
#[derive(Debug, Clone, FromRow)]
pub struct SpotEntity {
    pub id: Uuid,
    pub parking_id: Uuid,
    pub identifier: Option<String>,
    pub spot_type: SpotTypeDb,
    pub dimensions: Option<serde_json::Value>,
    pub price_minute: Option<f64>,
    pub price_hour: f64,
    pub price_day: Option<f64>,
    pub price_month: Option<f64>,
    pub status: SpotStatusDb,
    pub created_at: DateTime<Utc>,
}

impl SpotEntity {
    /// Rates snapshot for the price calculator.
    pub fn rates(&self) -> SpotRates {
        SpotRates {
            price_minute: self.price_minute,
            price_hour: self.price_hour,
            price_day: self.price_day,
            price_month: self.price_month,
        }
    }
}

impl From<SpotEntity> for ParkingSpot {
    fn from(e: SpotEntity) -> Self {
        let rates = e.rates();
        ParkingSpot {
            id: e.id,
            parking_id: e.parking_id,
            identifier: e.identifier,
            spot_type: e.spot_type.into(),
            dimensions: e.dimensions,
            rates,
            status: e.status.into(),
            created_at: e.created_at,
        }
    }
}
