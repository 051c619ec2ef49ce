//! Student entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::pickup::StudentExitStatus;
use domain::models::Student;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for the student exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "exit_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitStatusDb {
    AtSchool,
    WaitingExit,
    Released,
    PickedUp,
}

impl From<ExitStatusDb> for StudentExitStatus {
    fn from(s: ExitStatusDb) -> Self {
        match s {
            ExitStatusDb::AtSchool => StudentExitStatus::AtSchool,
            ExitStatusDb::WaitingExit => StudentExitStatus::WaitingExit,
            ExitStatusDb::Released => StudentExitStatus::Released,
            ExitStatusDb::PickedUp => StudentExitStatus::PickedUp,
        }
    }
}

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub photo: Option<String>,
    pub school_id: Uuid,
    pub class_id: Option<Uuid>,
    pub exit_status: ExitStatusDb,
    pub special_needs: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentEntity> for Student {
    fn from(e: StudentEntity) -> Self {
        Student {
            id: e.id,
            name: e.name,
            birth_date: e.birth_date,
            photo: e.photo,
            school_id: e.school_id,
            class_id: e.class_id,
            exit_status: e.exit_status.into(),
            special_needs: e.special_needs,
            notes: e.notes,
            created_at: e.created_at,
        }
    }
}
