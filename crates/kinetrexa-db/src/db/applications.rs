use chrono::Utc;
use kinetrexa_core::models::{Application, ApplicationStatus, CreateApplicationRequest, DocumentKind};
use kinetrexa_core::AppError;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Name of the unique index guaranteeing one application per (email, domain).
/// The pre-insert duplicate check is advisory; this constraint is the
/// authority under concurrent submissions.
const UNIQUE_EMAIL_INTERNSHIP: &str = "uq_applications_email_internship";

const UNIQUE_PUBLIC_ID: &str = "uq_applications_public_id";

/// Repository for application records.
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an existing application for the same (email, internship) pair.
    /// Email comparison is case-insensitive; any status counts as a duplicate.
    pub async fn find_duplicate(
        &self,
        email: &str,
        internship_id: Uuid,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE email = LOWER($1) AND internship_id = $2
            "#,
        )
        .bind(email)
        .bind(internship_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a new application. The caller supplies the already-normalized
    /// email. A violation of the (email, internship) unique index maps to
    /// `AppError::Conflict` so the check-then-create race can never yield two
    /// rows. Public ids are short, so a collision on that index is retried
    /// with a fresh id.
    pub async fn create(
        &self,
        email: &str,
        request: &CreateApplicationRequest,
    ) -> Result<Application, AppError> {
        const MAX_PUBLIC_ID_ATTEMPTS: usize = 3;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let public_id = kinetrexa_core::ids::generate_application_id(Utc::now());

            let result = sqlx::query_as::<_, Application>(
                r#"
                INSERT INTO applications (
                    id, public_id, first_name, last_name, email, phone,
                    college, degree, graduation_year, skills, resume_url,
                    internship_id, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'applied')
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&public_id)
            .bind(&request.first_name)
            .bind(&request.last_name)
            .bind(email)
            .bind(&request.phone)
            .bind(&request.college)
            .bind(&request.degree)
            .bind(request.graduation_year)
            .bind(&request.skills)
            .bind(&request.resume_url)
            .bind(request.internship_id)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(application) => return Ok(application),
                Err(sqlx::Error::Database(db_err))
                    if db_err.constraint() == Some(UNIQUE_EMAIL_INTERNSHIP) =>
                {
                    return Err(AppError::Conflict(
                        "You have already applied for this domain".to_string(),
                    ))
                }
                Err(sqlx::Error::Database(db_err))
                    if db_err.constraint() == Some(UNIQUE_PUBLIC_ID)
                        && attempt < MAX_PUBLIC_ID_ATTEMPTS =>
                {
                    tracing::warn!(
                        public_id = %public_id,
                        attempt,
                        "Application public id collision, regenerating"
                    );
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_by_public_id(&self, public_id: &str) -> Result<Option<Application>, AppError> {
        let row =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE public_id = $1")
                .bind(public_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    /// Two-factor lookup for the public status checker: both the email and
    /// the public id must match the same row.
    pub async fn find_by_email_and_public_id(
        &self,
        email: &str,
        public_id: &str,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE email = LOWER($1) AND public_id = $2
            "#,
        )
        .bind(email)
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_certificate_id(
        &self,
        certificate_id: &str,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE certificate_id = $1",
        )
        .bind(certificate_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Tracker view: applications for an email joined with their domain
    /// title, newest first (the "my applications" view).
    pub async fn list_by_email_with_domain(
        &self,
        email: &str,
    ) -> Result<Vec<(Application, String)>, AppError> {
        use sqlx::{FromRow, Row};

        let rows = sqlx::query(
            r#"
            SELECT a.*, i.title AS domain_title
            FROM applications a
            JOIN internships i ON i.id = a.internship_id
            WHERE a.email = LOWER($1)
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let application = Application::from_row(&row)?;
                let domain: String = row.get("domain_title");
                Ok((application, domain))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    /// Admin listing with optional internship/status filters.
    pub async fn list(
        &self,
        internship_id: Option<Uuid>,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, AppError> {
        let rows = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE ($1::uuid IS NULL OR internship_id = $1)
              AND ($2::application_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(internship_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Replace the status atomically. When the new status is `completed` and
    /// no certificate exists yet, the supplied candidate id is assigned and
    /// the issue time stamped; an existing certificate id is never replaced.
    ///
    /// Returns `None` if the application does not exist. Any status may
    /// overwrite any other; last write wins under concurrent admin updates.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        certificate_candidate: &str,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2,
                status_updated_at = NOW(),
                certificate_id = CASE
                    WHEN $2 = 'completed' THEN COALESCE(certificate_id, $3)
                    ELSE certificate_id
                END,
                certificate_issued_at = CASE
                    WHEN $2 = 'completed' AND certificate_id IS NULL THEN NOW()
                    ELSE certificate_issued_at
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(certificate_candidate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn set_task_assignment(
        &self,
        id: Uuid,
        enabled: bool,
        details: Option<&str>,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET task_assignment_enabled = $2,
                task_assignment_details = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(enabled)
        .bind(details)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn set_payment(
        &self,
        id: Uuid,
        amount: Option<Decimal>,
        status: Option<&str>,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET payment_amount = $2,
                payment_status = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Record the first download of a document kind. Set-if-unset at the
    /// statement level: concurrent duplicate downloads cannot clobber the
    /// first timestamp. Returns `true` if this call recorded the download,
    /// `false` if it was already recorded (which is still success).
    pub async fn record_download(&self, id: Uuid, kind: DocumentKind) -> Result<bool, AppError> {
        let query = match kind {
            DocumentKind::OfferLetter => {
                r#"
                UPDATE applications
                SET offer_letter_downloaded = TRUE,
                    offer_letter_downloaded_at = NOW(),
                    updated_at = NOW()
                WHERE id = $1 AND offer_letter_downloaded = FALSE
                "#
            }
            DocumentKind::TaskAssignment => {
                r#"
                UPDATE applications
                SET task_downloaded = TRUE,
                    task_downloaded_at = NOW(),
                    updated_at = NOW()
                WHERE id = $1 AND task_downloaded = FALSE
                "#
            }
            DocumentKind::Certificate => {
                r#"
                UPDATE applications
                SET certificate_downloaded = TRUE,
                    certificate_downloaded_at = NOW(),
                    updated_at = NOW()
                WHERE id = $1 AND certificate_downloaded = FALSE
                "#
            }
        };

        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Admin correction of applicant fields after submission.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_applicant(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: &str,
        college: &str,
        degree: &str,
        graduation_year: i32,
        resume_url: Option<&str>,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET first_name = $2,
                last_name = $3,
                phone = $4,
                college = $5,
                degree = $6,
                graduation_year = $7,
                resume_url = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(college)
        .bind(degree)
        .bind(graduation_year)
        .bind(resume_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
