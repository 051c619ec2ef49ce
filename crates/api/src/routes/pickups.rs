//! Pickup workflow endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use domain::models::pickup::{
    CancelPickupRequest, ConfirmPickupRequest, Pickup, PickupStatus, ReleasePickupRequest,
    RequestPickupRequest,
};
use domain::services::is_staff;
use persistence::repositories::{GuardianRepository, PickupRepository};
use shared::pagination::Pagination;

/// Query parameters for a school's pickup feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolPickupsQuery {
    pub status: Option<PickupStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for a student's pickup history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPickupsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// A guardian opens a pickup request.
///
/// POST /api/v1/pickups
pub async fn request_pickup(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<RequestPickupRequest>,
) -> Result<(StatusCode, Json<Pickup>), ApiError> {
    request.validate()?;

    let pickup = state
        .pickups
        .request(
            caller.user_id,
            request.student_id,
            request.location,
            request.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(pickup)))
}

/// Staff releases the student to the waiting guardian.
///
/// POST /api/v1/pickups/:id/release
pub async fn release_pickup(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<ReleasePickupRequest>,
) -> Result<Json<Pickup>, ApiError> {
    request.validate()?;

    let pickup = state
        .pickups
        .release(id, caller.user_id, request.notes.as_deref())
        .await?;

    Ok(Json(pickup))
}

/// The guardian confirms the student was picked up.
///
/// POST /api/v1/pickups/:id/confirm
pub async fn confirm_pickup(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<ConfirmPickupRequest>,
) -> Result<Json<Pickup>, ApiError> {
    request.validate()?;

    let pickup = state
        .pickups
        .confirm(
            id,
            caller.user_id,
            caller.user_type,
            request.confirmation_photo.as_deref(),
            request.location,
        )
        .await?;

    Ok(Json(pickup))
}

/// Cancel an active pickup.
///
/// POST /api/v1/pickups/:id/cancel
pub async fn cancel_pickup(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelPickupRequest>,
) -> Result<Json<Pickup>, ApiError> {
    request.validate()?;

    let pickup = state
        .pickups
        .cancel(
            id,
            caller.user_id,
            caller.user_type,
            request.reason.as_deref(),
        )
        .await?;

    Ok(Json(pickup))
}

/// Fetch a single pickup. Visible to staff and the requesting guardian.
///
/// GET /api/v1/pickups/:id
pub async fn get_pickup(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Pickup>, ApiError> {
    let repo = PickupRepository::new(state.pool.clone());
    let pickup = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pickup not found".to_string()))?;

    if pickup.guardian_id != caller.user_id && !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to view this pickup".to_string(),
        ));
    }

    Ok(Json(pickup.into()))
}

/// The caller's open (REQUESTED or RELEASED) pickups.
///
/// GET /api/v1/pickups/active
pub async fn list_active_pickups(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Pickup>>, ApiError> {
    let repo = PickupRepository::new(state.pool.clone());
    let pickups = repo.list_active_by_guardian(caller.user_id).await?;
    Ok(Json(pickups.into_iter().map(Into::into).collect()))
}

/// Pickup feed for a school, filterable by status and request date. Staff
/// only.
///
/// GET /api/v1/schools/:id/pickups
pub async fn list_school_pickups(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(query): Query<SchoolPickupsQuery>,
) -> Result<Json<Vec<Pickup>>, ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to view school pickups".to_string(),
        ));
    }

    let page = Pagination {
        limit: query.limit,
        offset: query.offset,
    };
    let repo = PickupRepository::new(state.pool.clone());
    let pickups = repo
        .list_by_school(
            id,
            query.status.map(Into::into),
            query.from,
            query.to,
            page.limit(),
            page.offset(),
        )
        .await?;
    Ok(Json(pickups.into_iter().map(Into::into).collect()))
}

/// Pickup history for a student. Visible to staff and the student's
/// guardians.
///
/// GET /api/v1/students/:id/pickups
pub async fn list_student_pickups(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(query): Query<StudentPickupsQuery>,
) -> Result<Json<Vec<Pickup>>, ApiError> {
    if !is_staff(caller.user_type) {
        let guardian_repo = GuardianRepository::new(state.pool.clone());
        if guardian_repo.find_link(id, caller.user_id).await?.is_none() {
            return Err(ApiError::Forbidden(
                "Not authorized to view this student's pickups".to_string(),
            ));
        }
    }

    let repo = PickupRepository::new(state.pool.clone());
    let pickups = repo.list_by_student(id, query.from, query.to).await?;
    Ok(Json(pickups.into_iter().map(Into::into).collect()))
}
