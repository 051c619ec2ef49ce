//! Student and guardian endpoint handlers.

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
use domain::models::guardian::{AddGuardianRequest, GuardianLink};
use domain::models::student::{CreateStudentRequest, Student};
use domain::services::is_staff;
use persistence::repositories::{
    GuardianRepository, GuardianSeed, SchoolRepository, StudentRepository,
};

/// Enroll a student, optionally with the initial guardian links. Staff
/// only.
///
/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to enroll students".to_string(),
        ));
    }
    request.validate()?;

    let school_repo = SchoolRepository::new(state.pool.clone());
    school_repo
        .find_by_id(request.school_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("School not found".to_string()))?;

    let seeds: Vec<GuardianSeed> = request
        .guardians
        .iter()
        .map(|g| GuardianSeed {
            user_id: g.user_id,
            relation: g.relation.clone(),
            is_primary: g.is_primary,
            can_pickup: g.can_pickup,
            end_date: g.end_date,
        })
        .collect();

    let repo = StudentRepository::new(state.pool.clone());
    let student = repo
        .create(
            &request.name,
            request.birth_date,
            request.photo.as_deref(),
            request.school_id,
            request.class_id,
            request.special_needs.as_deref(),
            request.notes.as_deref(),
            &seeds,
        )
        .await?;

    info!(
        student_id = %student.id,
        school_id = %request.school_id,
        guardians = seeds.len(),
        "Student enrolled"
    );

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Fetch a student. Visible to staff and to the student's guardians.
///
/// GET /api/v1/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let student = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if !is_staff(caller.user_type) {
        let guardian_repo = GuardianRepository::new(state.pool.clone());
        if guardian_repo.find_link(id, caller.user_id).await?.is_none() {
            return Err(ApiError::Forbidden(
                "Not authorized to view this student".to_string(),
            ));
        }
    }

    Ok(Json(student.into()))
}

/// Students the caller is linked to as guardian.
///
/// GET /api/v1/students/mine
pub async fn list_my_students(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Student>>, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let students = repo.list_by_guardian(caller.user_id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Guardian links for a student. Staff only.
///
/// GET /api/v1/students/:id/guardians
pub async fn list_guardians(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GuardianLink>>, ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to view guardians".to_string(),
        ));
    }

    let student_repo = StudentRepository::new(state.pool.clone());
    student_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let repo = GuardianRepository::new(state.pool.clone());
    let links = repo.list_for_student(id).await?;
    Ok(Json(links.into_iter().map(Into::into).collect()))
}

/// Link a guardian to a student. Staff only.
///
/// POST /api/v1/students/:id/guardians
pub async fn add_guardian(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<AddGuardianRequest>,
) -> Result<(StatusCode, Json<GuardianLink>), ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to manage guardians".to_string(),
        ));
    }
    request.validate()?;

    let student_repo = StudentRepository::new(state.pool.clone());
    student_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let repo = GuardianRepository::new(state.pool.clone());
    let link = repo
        .add_link(
            id,
            request.user_id,
            &request.relation,
            request.is_primary,
            request.can_pickup,
            request.end_date,
        )
        .await?;

    info!(student_id = %id, guardian_user_id = %request.user_id, "Guardian linked");

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Unlink a guardian from a student. Staff only.
///
/// DELETE /api/v1/students/:id/guardians/:user_id
pub async fn remove_guardian(
    State(state): State<AppState>,
    caller: Caller,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    if !is_staff(caller.user_type) {
        return Err(ApiError::Forbidden(
            "Not authorized to manage guardians".to_string(),
        ));
    }

    let repo = GuardianRepository::new(state.pool.clone());
    let removed = repo.remove_link(id, user_id).await?;
    if !removed {
        return Err(ApiError::NotFound("Guardian link not found".to_string()));
    }

    info!(student_id = %id, guardian_user_id = %user_id, "Guardian unlinked");

    Ok(StatusCode::NO_CONTENT)
}
