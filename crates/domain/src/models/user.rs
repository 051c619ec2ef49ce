//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Account role, determines which workflows a user may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Parent,
    School,
    Admin,
    ParkingProvider,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Parent => "PARENT",
            UserType::School => "SCHOOL",
            UserType::Admin => "ADMIN",
            UserType::ParkingProvider => "PARKING_PROVIDER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PARENT" => Some(UserType::Parent),
            "SCHOOL" => Some(UserType::School),
            "ADMIN" => Some(UserType::Admin),
            "PARKING_PROVIDER" => Some(UserType::ParkingProvider),
            _ => None,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub photo: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    pub phone_number: Option<String>,

    pub user_type: UserType,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request payload for refreshing a token pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_roundtrip() {
        for t in [
            UserType::Parent,
            UserType::School,
            UserType::Admin,
            UserType::ParkingProvider,
        ] {
            assert_eq!(UserType::parse(t.as_str()), Some(t));
        }
        assert_eq!(UserType::parse("TEACHER"), None);
    }

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            name: "Ana".into(),
            last_name: "Souza".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            phone_number: None,
            user_type: UserType::Parent,
        };
        let err = validator::Validate::validate(&req).unwrap_err();
        assert!(err.field_errors().contains_key("email"));
        assert!(err.field_errors().contains_key("password"));
    }
}
