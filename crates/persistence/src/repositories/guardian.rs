//! Guardian-link repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GuardianLinkEntity;
use crate::metrics::QueryTimer;

const GUARDIAN_COLUMNS: &str = "id, student_id, user_id, relation, is_primary, can_pickup, \
                                verified, start_date, end_date, created_at";

/// Repository for guardian-link database operations.
#[derive(Clone)]
pub struct GuardianRepository {
    pool: PgPool,
}

impl GuardianRepository {
    /// Creates a new GuardianRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Link a guardian to a student. When the new link is primary, any
    /// existing primary link for the student is demoted first so the
    /// single-primary index cannot reject the insert.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_link(
        &self,
        student_id: Uuid,
        user_id: Uuid,
        relation: &str,
        is_primary: bool,
        can_pickup: bool,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<GuardianLinkEntity, sqlx::Error> {
        let timer = QueryTimer::new("add_guardian_link");

        let mut tx = self.pool.begin().await?;

        if is_primary {
            sqlx::query("UPDATE student_guardians SET is_primary = FALSE WHERE student_id = $1 AND is_primary")
                .bind(student_id)
                .execute(&mut *tx)
                .await?;
        }

        let link = sqlx::query_as::<_, GuardianLinkEntity>(&format!(
            r#"
            INSERT INTO student_guardians (student_id, user_id, relation, is_primary, can_pickup, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {GUARDIAN_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(user_id)
        .bind(relation)
        .bind(is_primary)
        .bind(can_pickup)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(link)
    }

    /// Remove a guardian link. Returns whether a row was removed.
    pub async fn remove_link(&self, student_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("remove_guardian_link");
        let result = sqlx::query(
            "DELETE FROM student_guardians WHERE student_id = $1 AND user_id = $2",
        )
        .bind(student_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Find the link between a student and a user, if any.
    pub async fn find_link(
        &self,
        student_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<GuardianLinkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guardian_link");
        let result = sqlx::query_as::<_, GuardianLinkEntity>(&format!(
            "SELECT {GUARDIAN_COLUMNS} FROM student_guardians WHERE student_id = $1 AND user_id = $2",
        ))
        .bind(student_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all guardian links for a student.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GuardianLinkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_guardians_for_student");
        let result = sqlx::query_as::<_, GuardianLinkEntity>(&format!(
            "SELECT {GUARDIAN_COLUMNS} FROM student_guardians WHERE student_id = $1 ORDER BY is_primary DESC, created_at",
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
