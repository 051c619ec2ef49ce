//! JWT authentication middleware.
//!
//! Validates the Bearer token on protected routes and stores the caller's
//! identity in request extensions for downstream handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use domain::models::user::UserType;
use shared::jwt::JwtConfig;

/// Authenticated caller information extracted from JWT claims.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Email carried in the claims.
    pub email: String,
    /// Account role carried in the claims.
    pub user_type: UserType,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl UserAuth {
    /// Validates an access token and returns caller info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token".to_string())?;

        let user_type = UserType::parse(&claims.user_type)
            .ok_or_else(|| "Invalid user type in token".to_string())?;

        Ok(UserAuth {
            user_id,
            email: claims.email,
            user_type,
            jti: claims.jti,
        })
    }
}

/// Middleware that requires JWT authentication.
///
/// Rejects requests without a valid Bearer token. Caller information is
/// stored in request extensions for handlers and the rate limiter.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig::new("test-secret-at-least-32-bytes-long!!", 900, 604_800)
    }

    #[test]
    fn test_validate_accepts_valid_token() {
        let config = jwt();
        let user_id = Uuid::new_v4();
        let token = config
            .generate_access_token(user_id, "parent@example.com", "PARENT")
            .unwrap();

        let auth = UserAuth::validate(&config, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.email, "parent@example.com");
        assert_eq!(auth.user_type, UserType::Parent);
    }

    #[test]
    fn test_validate_rejects_refresh_token() {
        let config = jwt();
        let token = config
            .generate_refresh_token(Uuid::new_v4(), "a@b.com", "PARENT")
            .unwrap();

        assert!(UserAuth::validate(&config, &token).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_user_type() {
        let config = jwt();
        let token = config
            .generate_access_token(Uuid::new_v4(), "a@b.com", "TEACHER")
            .unwrap();

        assert!(UserAuth::validate(&config, &token).is_err());
    }

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized_response("Missing or invalid Authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
