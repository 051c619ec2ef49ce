//! Guardian link entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::GuardianLink;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the student_guardians table.
#[derive(Debug, Clone, FromRow)]
pub struct GuardianLinkEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub user_id: Uuid,
    pub relation: String,
    pub is_primary: bool,
    pub verified: bool,
    pub can_pickup: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<GuardianLinkEntity> for GuardianLink {
    fn from(e: GuardianLinkEntity) -> Self {
        GuardianLink {
            id: e.id,
            student_id: e.student_id,
            user_id: e.user_id,
            relation: e.relation,
            is_primary: e.is_primary,
            verified: e.verified,
            can_pickup: e.can_pickup,
            start_date: e.start_date,
            end_date: e.end_date,
            created_at: e.created_at,
        }
    }
}
