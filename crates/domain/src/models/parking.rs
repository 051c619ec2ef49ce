//! Parking facility domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::address::{Address, AddressInput};
use super::pickup::GeoPoint;

/// Kind of parking facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingType {
    Commercial,
    Residential,
    Land,
}

/// Facility lifecycle status. New facilities await approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingStatus {
    Active,
    Inactive,
    PendingApproval,
}

/// A parking facility owned by a PARKING_PROVIDER user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub parking_type: ParkingType,
    pub coordinates: GeoPoint,
    pub photos: Vec<String>,
    pub operation_hours: Option<serde_json::Value>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub status: ParkingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Request payload for registering a parking facility.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateParkingRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub parking_type: ParkingType,

    #[validate(nested)]
    pub coordinates: GeoPoint,

    #[serde(default)]
    pub photos: Vec<String>,

    pub operation_hours: Option<serde_json::Value>,

    pub description: Option<String>,

    pub rules: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressInput>,
}

/// Request payload for a partial facility update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParkingRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    pub parking_type: Option<ParkingType>,

    #[validate(nested)]
    pub coordinates: Option<GeoPoint>,

    pub photos: Option<Vec<String>>,

    pub operation_hours: Option<serde_json::Value>,

    pub description: Option<String>,

    pub rules: Option<String>,

    pub status: Option<ParkingStatus>,

    #[validate(nested)]
    pub address: Option<AddressInput>,
}

/// Query parameters for the nearby-facility search.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    /// Search radius in meters, default 1000.
    #[validate(custom(function = "shared::validation::validate_radius_meters"))]
    pub radius: Option<f64>,

    pub parking_type: Option<ParkingType>,
}
