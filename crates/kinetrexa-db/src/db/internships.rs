use kinetrexa_core::models::{CreateInternshipRequest, Internship};
use kinetrexa_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for internship tracks.
#[derive(Clone)]
pub struct InternshipRepository {
    pool: PgPool,
}

impl InternshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateInternshipRequest) -> Result<Internship, AppError> {
        let result = sqlx::query_as::<_, Internship>(
            r#"
            INSERT INTO internships (id, title, description, duration_weeks, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.duration_weeks)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.is_active)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(internship) => Ok(internship),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_internships_title") =>
            {
                Err(AppError::Conflict(format!(
                    "An internship titled '{}' already exists",
                    request.title
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &CreateInternshipRequest,
    ) -> Result<Option<Internship>, AppError> {
        let row = sqlx::query_as::<_, Internship>(
            r#"
            UPDATE internships
            SET title = $2,
                description = $3,
                duration_weeks = $4,
                start_date = $5,
                end_date = $6,
                is_active = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.duration_weeks)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Internship>, AppError> {
        let row = sqlx::query_as::<_, Internship>("SELECT * FROM internships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Active internships for the public application form.
    pub async fn list_active(&self) -> Result<Vec<Internship>, AppError> {
        let rows = sqlx::query_as::<_, Internship>(
            "SELECT * FROM internships WHERE is_active = TRUE ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<Internship>, AppError> {
        let rows =
            sqlx::query_as::<_, Internship>("SELECT * FROM internships ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }
}
