//! Reservation endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use domain::models::reservation::{
    CancelReservationRequest, CheckOutRequest, CreateReservationRequest, Reservation,
    ReservationListQuery,
};
use persistence::repositories::ReservationRepository;
use shared::pagination::Pagination;

/// Book a spot for a time window.
///
/// POST /api/v1/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    request.validate()?;

    let reservation = state
        .reservations
        .create(
            caller.user_id,
            request.spot_id,
            request.parking_id,
            request.start_time,
            request.end_time,
            request.payment_method.as_deref(),
            request.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// The caller's reservations, newest first, with an optional status
/// filter.
///
/// GET /api/v1/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let page = Pagination {
        limit: query.limit,
        offset: query.offset,
    };
    let repo = ReservationRepository::new(state.pool.clone());
    let reservations = repo
        .list_for_user(
            caller.user_id,
            query.status.map(Into::into),
            page.limit(),
            page.offset(),
        )
        .await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's reservations.
///
/// GET /api/v1/reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, ApiError> {
    let repo = ReservationRepository::new(state.pool.clone());
    let reservation = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

    if reservation.user_id != caller.user_id && !domain::services::is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized for this reservation".to_string(),
        ));
    }

    Ok(Json(reservation.into()))
}

/// Check a scheduled reservation in.
///
/// POST /api/v1/reservations/:id/check-in
pub async fn check_in(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .reservations
        .check_in(id, caller.user_id, caller.user_type)
        .await?;
    Ok(Json(reservation))
}

/// Check an active reservation out, settling the final price.
///
/// POST /api/v1/reservations/:id/check-out
pub async fn check_out(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CheckOutRequest>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .reservations
        .check_out(id, caller.user_id, caller.user_type, request.transaction_id)
        .await?;
    Ok(Json(reservation))
}

/// Cancel a scheduled or active reservation.
///
/// POST /api/v1/reservations/:id/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelReservationRequest>,
) -> Result<Json<Reservation>, ApiError> {
    request.validate()?;

    let reservation = state
        .reservations
        .cancel(id, caller.user_id, caller.user_type, request.reason.as_deref())
        .await?;
    Ok(Json(reservation))
}
