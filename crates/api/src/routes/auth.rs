//! Authentication endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use domain::models::user::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User};
use persistence::entities::UserEntity;
use persistence::repositories::UserRepository;
use shared::jwt::JwtConfig;
use shared::password::{hash_password, verify_password};
use uuid::Uuid;

/// Response for registration: the created user plus the initial tokens.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenResponse,
}

fn issue_tokens(jwt: &JwtConfig, user: &UserEntity) -> Result<TokenResponse, ApiError> {
    let user_type: domain::models::user::UserType = user.user_type.into();
    let access_token = jwt
        .generate_access_token(user.id, &user.email, user_type.as_str())
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;
    let refresh_token = jwt
        .generate_refresh_token(user.id, &user.email, user_type.as_str())
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt.access_token_expiry_secs,
    })
}

/// Register a new account.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());

    if user_repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = user_repo
        .create(
            &request.name,
            &request.last_name,
            &request.email,
            &password_hash,
            request.phone_number.as_deref(),
            request.user_type.into(),
        )
        .await?;

    let tokens = issue_tokens(&state.jwt, &user)?;

    info!(user_id = %user.id, user_type = ?request.user_type, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            tokens,
        }),
    ))
}

/// Exchange email and password for a token pair.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());
    let user = user_repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = verify_password(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let tokens = issue_tokens(&state.jwt, &user)?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// Exchange a refresh token for a fresh token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let claims = state
        .jwt
        .validate_refresh_token(&request.refresh_token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    // The account must still exist
    let user_repo = UserRepository::new(state.pool.clone());
    let user = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    let tokens = issue_tokens(&state.jwt, &user)?;
    Ok(Json(tokens))
}

/// The calling user's own profile.
///
/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, caller: Caller) -> Result<Json<User>, ApiError> {
    let user_repo = UserRepository::new(state.pool.clone());
    let user = user_repo
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
