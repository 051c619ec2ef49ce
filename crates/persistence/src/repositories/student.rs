//! Student repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::StudentEntity;
use crate::metrics::QueryTimer;

const STUDENT_COLUMNS: &str = "id, name, birth_date, photo, school_id, class_id, exit_status, \
                               special_needs, notes, created_at";

/// Guardian fields accepted when enrolling a student.
#[derive(Debug, Clone)]
pub struct GuardianSeed {
    pub user_id: Uuid,
    pub relation: String,
    pub is_primary: bool,
    pub can_pickup: bool,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Repository for student-related database operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enroll a student and create the initial guardian links atomically.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        birth_date: Option<chrono::NaiveDate>,
        photo: Option<&str>,
        school_id: Uuid,
        class_id: Option<Uuid>,
        special_needs: Option<&str>,
        notes: Option<&str>,
        guardians: &[GuardianSeed],
    ) -> Result<StudentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_student");

        let mut tx = self.pool.begin().await?;

        let student = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            INSERT INTO students (name, birth_date, photo, school_id, class_id, special_needs, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {STUDENT_COLUMNS}
            "#,
        ))
        .bind(name)
        .bind(birth_date)
        .bind(photo)
        .bind(school_id)
        .bind(class_id)
        .bind(special_needs)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        for guardian in guardians {
            sqlx::query(
                r#"
                INSERT INTO student_guardians (student_id, user_id, relation, is_primary, can_pickup, end_date)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(student.id)
            .bind(guardian.user_id)
            .bind(&guardian.relation)
            .bind(guardian.is_primary)
            .bind(guardian.can_pickup)
            .bind(guardian.end_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(student)
    }

    /// Find a student by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_id");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List students a user is linked to as guardian.
    pub async fn list_by_guardian(
        &self,
        guardian_id: Uuid,
    ) -> Result<Vec<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_students_by_guardian");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            SELECT s.{STUDENT_COLUMNS}
            FROM students s
            JOIN student_guardians sg ON sg.student_id = s.id
            WHERE sg.user_id = $1
            ORDER BY s.name
            "#,
        ))
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
