//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::user::{User, UserType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserTypeDb {
    Parent,
    School,
    Admin,
    ParkingProvider,
}

impl From<UserTypeDb> for UserType {
    fn from(t: UserTypeDb) -> Self {
        match t {
            UserTypeDb::Parent => UserType::Parent,
            UserTypeDb::School => UserType::School,
            UserTypeDb::Admin => UserType::Admin,
            UserTypeDb::ParkingProvider => UserType::ParkingProvider,
        }
    }
}

impl From<UserType> for UserTypeDb {
    fn from(t: UserType) -> Self {
        match t {
            UserType::Parent => UserTypeDb::Parent,
            UserType::School => UserTypeDb::School,
            UserType::Admin => UserTypeDb::Admin,
            UserType::ParkingProvider => UserTypeDb::ParkingProvider,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub photo: Option<String>,
    pub user_type: UserTypeDb,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        User {
            id: e.id,
            name: e.name,
            last_name: e.last_name,
            email: e.email,
            phone_number: e.phone_number,
            photo: e.photo,
            user_type: e.user_type.into(),
            created_at: e.created_at,
        }
    }
}
