//! Parking spot domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Physical category of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotType {
    Standard,
    Accessible,
    Senior,
    Electric,
    Motorcycle,
}

/// Availability state of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
    Available,
    Occupied,
    Reserved,
    Unavailable,
    Maintenance,
}

/// Tiered rates for a spot. Hourly is mandatory, the rest optional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotRates {
    pub price_minute: Option<f64>,
    pub price_hour: f64,
    pub price_day: Option<f64>,
    pub price_month: Option<f64>,
}

/// A priced unit within a parking facility.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: Uuid,
    pub parking_id: Uuid,
    pub identifier: Option<String>,
    pub spot_type: SpotType,
    pub dimensions: Option<serde_json::Value>,
    #[serde(flatten)]
    pub rates: SpotRates,
    pub status: SpotStatus,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a spot to a facility.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotRequest {
    #[validate(length(max = 20, message = "Identifier must be at most 20 characters"))]
    pub identifier: Option<String>,

    #[serde(default = "default_spot_type")]
    pub spot_type: SpotType,

    pub dimensions: Option<serde_json::Value>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_minute: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_hour: f64,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_day: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_month: Option<f64>,
}

fn default_spot_type() -> SpotType {
    SpotType::Standard
}

/// Query parameters for listing available spots, optionally filtered by a
/// reservation window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpotsQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
