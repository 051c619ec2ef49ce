//! Authenticated caller extractor.
//!
//! Resolves the caller from JWT claims, either via the auth middleware's
//! request extension or by validating the Bearer token directly.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;
use domain::models::user::UserType;

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Caller {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Email carried in the claims.
    pub email: String,
    /// Account role carried in the claims.
    pub user_type: UserType,
}

impl From<UserAuth> for Caller {
    fn from(auth: UserAuth) -> Self {
        Self {
            user_id: auth.user_id,
            email: auth.email,
            user_type: auth.user_type,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Auth middleware normally runs first and leaves the caller here
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(auth.clone().into());
        }

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                ApiError::Unauthorized("Invalid Authorization header format".to_string())
            })?;

        let auth = UserAuth::validate(&state.jwt, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth.into())
    }
}
