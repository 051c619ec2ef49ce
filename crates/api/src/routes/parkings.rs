//! Parking facility and spot endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::routes::address_fields;
use domain::models::parking::{
    CreateParkingRequest, NearbyQuery, Parking, ParkingType, UpdateParkingRequest,
};
use domain::models::spot::{AvailableSpotsQuery, CreateSpotRequest, ParkingSpot};
use domain::models::user::UserType;
use domain::services::is_staff;
use persistence::repositories::{
    AddressRepository, ParkingRepository, ParkingUpdate, SpotRepository,
};

const DEFAULT_NEARBY_RADIUS_METERS: f64 = 1000.0;

/// A nearby facility with its distance from the search origin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyParkingResponse {
    #[serde(flatten)]
    pub parking: Parking,
    pub distance_meters: f64,
}

/// Register a parking facility. The caller must be a parking provider.
///
/// POST /api/v1/parkings
pub async fn create_parking(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateParkingRequest>,
) -> Result<(StatusCode, Json<Parking>), ApiError> {
    if caller.user_type != UserType::ParkingProvider {
        return Err(ApiError::Forbidden(
            "Only parking providers may register facilities".to_string(),
        ));
    }
    request.validate()?;

    let repo = ParkingRepository::new(state.pool.clone());
    let parking = repo
        .create(
            caller.user_id,
            &request.name,
            request.parking_type.into(),
            request.coordinates.latitude,
            request.coordinates.longitude,
            &request.photos,
            request.operation_hours.clone(),
            request.description.as_deref(),
            request.rules.as_deref(),
            request.address.as_ref().map(address_fields).as_ref(),
        )
        .await?;

    info!(parking_id = %parking.id, owner_id = %caller.user_id, "Parking registered");

    let mut response: Parking = parking.into();
    if request.address.is_some() {
        let address_repo = AddressRepository::new(state.pool.clone());
        response.address = address_repo
            .find_by_parking(response.id)
            .await?
            .map(Into::into);
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch a facility with its address.
///
/// GET /api/v1/parkings/:id
pub async fn get_parking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Parking>, ApiError> {
    let repo = ParkingRepository::new(state.pool.clone());
    let parking = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Parking not found".to_string()))?;

    let address_repo = AddressRepository::new(state.pool.clone());
    let mut response: Parking = parking.into();
    response.address = address_repo.find_by_parking(id).await?.map(Into::into);

    Ok(Json(response))
}

/// Partially update a facility. Owner or staff only.
///
/// PATCH /api/v1/parkings/:id
pub async fn update_parking(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateParkingRequest>,
) -> Result<Json<Parking>, ApiError> {
    request.validate()?;

    let repo = ParkingRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Parking not found".to_string()))?;

    if existing.owner_id != caller.user_id && !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to update this facility".to_string(),
        ));
    }

    let update = ParkingUpdate {
        name: request.name.as_deref(),
        parking_type: request.parking_type.map(Into::into),
        latitude: request.coordinates.map(|c| c.latitude),
        longitude: request.coordinates.map(|c| c.longitude),
        description: request.description.as_deref(),
        rules: request.rules.as_deref(),
        photos: request.photos.as_deref(),
        operation_hours: request.operation_hours.clone(),
        status: request.status.map(Into::into),
    };
    let parking = repo
        .update(id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Parking not found".to_string()))?;

    let address_repo = AddressRepository::new(state.pool.clone());
    if let Some(addr) = request.address.as_ref() {
        address_repo
            .upsert_for_parking(id, &address_fields(addr))
            .await?;
    }

    info!(parking_id = %id, "Parking updated");

    let mut response: Parking = parking.into();
    response.address = address_repo.find_by_parking(id).await?.map(Into::into);

    Ok(Json(response))
}

/// ACTIVE facilities within a radius of a point, closest first.
///
/// GET /api/v1/parkings/nearby
pub async fn nearby_parkings(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyParkingResponse>>, ApiError> {
    query.validate()?;

    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_METERS);
    let type_filter = query.parking_type;

    let repo = ParkingRepository::new(state.pool.clone());
    let nearby = repo
        .find_nearby(query.latitude, query.longitude, radius)
        .await?;

    let results = nearby
        .into_iter()
        .map(|n| NearbyParkingResponse {
            parking: n.parking.into(),
            distance_meters: n.distance_meters,
        })
        .filter(|n| matches_type(&n.parking, type_filter))
        .collect();

    Ok(Json(results))
}

fn matches_type(parking: &Parking, filter: Option<ParkingType>) -> bool {
    filter.map_or(true, |t| parking.parking_type == t)
}

/// Add a spot to a facility. Owner or staff only.
///
/// POST /api/v1/parkings/:id/spots
pub async fn add_spot(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateSpotRequest>,
) -> Result<(StatusCode, Json<ParkingSpot>), ApiError> {
    request.validate()?;

    let parking_repo = ParkingRepository::new(state.pool.clone());
    let parking = parking_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Parking not found".to_string()))?;

    if parking.owner_id != caller.user_id && !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to manage spots for this facility".to_string(),
        ));
    }

    let repo = SpotRepository::new(state.pool.clone());
    let spot = repo
        .create(
            id,
            request.identifier.as_deref(),
            request.spot_type.into(),
            request.dimensions.clone(),
            request.price_minute,
            request.price_hour,
            request.price_day,
            request.price_month,
        )
        .await?;

    info!(spot_id = %spot.id, parking_id = %id, "Spot added");

    Ok((StatusCode::CREATED, Json(spot.into())))
}

/// Spots of a facility free for a window. With no window, lists spots not
/// currently held.
///
/// GET /api/v1/parkings/:id/spots/available
pub async fn available_spots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailableSpotsQuery>,
) -> Result<Json<Vec<ParkingSpot>>, ApiError> {
    let window = match (query.start_time, query.end_time) {
        (Some(start), Some(end)) => {
            if end <= start {
                return Err(ApiError::Validation(
                    "End time must be after start time".to_string(),
                ));
            }
            Some((start, end))
        }
        (None, None) => None,
        _ => {
            return Err(ApiError::Validation(
                "Both startTime and endTime are required for a window".to_string(),
            ));
        }
    };

    let parking_repo = ParkingRepository::new(state.pool.clone());
    parking_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Parking not found".to_string()))?;

    let repo = SpotRepository::new(state.pool.clone());
    let spots = repo.list_available(id, window).await?;
    Ok(Json(spots.into_iter().map(Into::into).collect()))
}
