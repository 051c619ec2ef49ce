//! School endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::routes::address_fields;
use domain::models::school::{CreateSchoolRequest, School};
use domain::services::is_staff;
use persistence::repositories::{AddressRepository, SchoolRepository};

/// Register a school. Staff only.
///
/// POST /api/v1/schools
pub async fn create_school(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<School>), ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to register schools".to_string(),
        ));
    }
    request.validate()?;

    let repo = SchoolRepository::new(state.pool.clone());
    let school = repo
        .create(
            &request.name,
            request.phone_number.as_deref(),
            request.address.as_ref().map(address_fields).as_ref(),
        )
        .await?;

    info!(school_id = %school.id, "School registered");

    let mut response: School = school.into();
    if request.address.is_some() {
        let address_repo = AddressRepository::new(state.pool.clone());
        response.address = address_repo
            .find_by_school(response.id)
            .await?
            .map(Into::into);
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch a school with its address.
///
/// GET /api/v1/schools/:id
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<School>, ApiError> {
    let repo = SchoolRepository::new(state.pool.clone());
    let school = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("School not found".to_string()))?;

    let address_repo = AddressRepository::new(state.pool.clone());
    let mut response: School = school.into();
    response.address = address_repo.find_by_school(id).await?.map(Into::into);

    Ok(Json(response))
}
