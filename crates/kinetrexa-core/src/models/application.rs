use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle stage of an application.
///
/// Parsed case-insensitively at the API edge and stored canonically
/// (lowercase Postgres enum). Transitions are deliberately unrestricted:
/// an administrator may set any status from any other status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Selected,
    Rejected,
    Completed,
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ApplicationStatus::Applied => write!(f, "applied"),
            ApplicationStatus::Shortlisted => write!(f, "shortlisted"),
            ApplicationStatus::Selected => write!(f, "selected"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
            ApplicationStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "selected" => Ok(ApplicationStatus::Selected),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "completed" => Ok(ApplicationStatus::Completed),
            _ => Err(anyhow::anyhow!("Invalid application status: {}", s)),
        }
    }
}

/// Applicant details captured at submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub degree: String,
    pub graduation_year: i32,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One candidate's submission for one internship domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    /// Human-presentable identifier, e.g. `KT-2026-7MQX4D`. Immutable.
    pub public_id: String,
    pub applicant: Applicant,
    pub internship_id: Uuid,
    pub status: ApplicationStatus,
    pub status_updated_at: DateTime<Utc>,
    pub task_assignment_enabled: bool,
    pub task_assignment_details: Option<String>,
    pub payment_amount: Option<Decimal>,
    pub payment_status: Option<String>,
    pub offer_letter_downloaded: bool,
    pub offer_letter_downloaded_at: Option<DateTime<Utc>>,
    pub task_downloaded: bool,
    pub task_downloaded_at: Option<DateTime<Utc>>,
    pub certificate_downloaded: bool,
    pub certificate_downloaded_at: Option<DateTime<Utc>>,
    /// Minted once, when status first becomes `completed`. Never regenerated.
    pub certificate_id: Option<String>,
    pub certificate_issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for Application {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(Application {
            id: row.get("id"),
            public_id: row.get("public_id"),
            applicant: Applicant {
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                email: row.get("email"),
                phone: row.get("phone"),
                college: row.get("college"),
                degree: row.get("degree"),
                graduation_year: row.get("graduation_year"),
                skills: row.get("skills"),
                resume_url: row.get("resume_url"),
            },
            internship_id: row.get("internship_id"),
            status: row.get("status"),
            status_updated_at: row.get("status_updated_at"),
            task_assignment_enabled: row.get("task_assignment_enabled"),
            task_assignment_details: row.get("task_assignment_details"),
            payment_amount: row.get("payment_amount"),
            payment_status: row.get("payment_status"),
            offer_letter_downloaded: row.get("offer_letter_downloaded"),
            offer_letter_downloaded_at: row.get("offer_letter_downloaded_at"),
            task_downloaded: row.get("task_downloaded"),
            task_downloaded_at: row.get("task_downloaded_at"),
            certificate_downloaded: row.get("certificate_downloaded"),
            certificate_downloaded_at: row.get("certificate_downloaded_at"),
            certificate_id: row.get("certificate_id"),
            certificate_issued_at: row.get("certificate_issued_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

/// Application submission payload (public form).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = crate::validation::validate_phone))]
    pub phone: String,

    #[validate(length(min = 1, max = 200))]
    pub college: String,

    #[validate(length(min = 1, max = 200))]
    pub degree: String,

    #[validate(range(min = 1990, max = 2100))]
    pub graduation_year: i32,

    #[validate(length(max = 30))]
    pub skills: Vec<String>,

    #[validate(url)]
    pub resume_url: Option<String>,

    /// Internship/domain the candidate is applying to.
    pub internship_id: Uuid,
}

/// Full application view (submission response and admin listing).
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub application_id: String,
    pub applicant: Applicant,
    pub internship_id: Uuid,
    pub status: ApplicationStatus,
    pub status_updated_at: DateTime<Utc>,
    pub task_assignment_enabled: bool,
    pub task_assignment_details: Option<String>,
    pub payment_amount: Option<Decimal>,
    pub payment_status: Option<String>,
    pub certificate_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        ApplicationResponse {
            application_id: app.public_id,
            applicant: app.applicant,
            internship_id: app.internship_id,
            status: app.status,
            status_updated_at: app.status_updated_at,
            task_assignment_enabled: app.task_assignment_enabled,
            task_assignment_details: app.task_assignment_details,
            payment_amount: app.payment_amount,
            payment_status: app.payment_status,
            certificate_id: app.certificate_id,
            created_at: app.created_at,
        }
    }
}

/// Status-only projection for the "my applications" tracker.
/// No document gating is applied on this path.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrackedApplication {
    pub application_id: String,
    pub internship_id: Uuid,
    pub domain: String,
    pub status: ApplicationStatus,
    pub status_updated_at: DateTime<Utc>,
    pub applied_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            "Applied".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Applied
        );
        assert_eq!(
            "SHORTLISTED".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert_eq!(
            "completed".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Completed
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!("pending".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
        assert!("complete".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_display_is_canonical_lowercase() {
        assert_eq!(ApplicationStatus::Selected.to_string(), "selected");
        assert_eq!(
            "Rejected"
                .parse::<ApplicationStatus>()
                .unwrap()
                .to_string(),
            "rejected"
        );
    }

    #[test]
    fn test_applicant_full_name() {
        let applicant = Applicant {
            first_name: "Asha".to_string(),
            last_name: "Nair".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+919876543210".to_string(),
            college: "NIT Calicut".to_string(),
            degree: "B.Tech CSE".to_string(),
            graduation_year: 2026,
            skills: vec!["rust".to_string()],
            resume_url: None,
        };
        assert_eq!(applicant.full_name(), "Asha Nair");
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateApplicationRequest {
            first_name: "Asha".to_string(),
            last_name: "Nair".to_string(),
            email: "not-an-email".to_string(),
            phone: "+919876543210".to_string(),
            college: "NIT Calicut".to_string(),
            degree: "B.Tech CSE".to_string(),
            graduation_year: 2026,
            skills: vec![],
            resume_url: None,
            internship_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_err());
    }
}
