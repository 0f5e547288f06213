use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An internship track/domain candidates apply to.
///
/// `end_date` is the program's official end and feeds the certificate gate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInternshipRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    #[validate(range(min = 1, max = 104))]
    pub duration_weeks: i32,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl CreateInternshipRequest {
    /// End date must not precede the start date.
    pub fn check_dates(&self) -> Result<(), crate::AppError> {
        if self.end_date < self.start_date {
            return Err(crate::AppError::InvalidInput(
                "end_date must not be before start_date".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternshipResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl From<Internship> for InternshipResponse {
    fn from(internship: Internship) -> Self {
        InternshipResponse {
            id: internship.id,
            title: internship.title,
            description: internship.description,
            duration_weeks: internship.duration_weeks,
            start_date: internship.start_date,
            end_date: internship.end_date,
            is_active: internship.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dates_rejects_inverted_range() {
        let request = CreateInternshipRequest {
            title: "Full Stack Dev".to_string(),
            description: None,
            duration_weeks: 12,
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            is_active: true,
        };
        assert!(request.check_dates().is_err());
    }

    #[test]
    fn test_check_dates_accepts_same_day() {
        let day = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let request = CreateInternshipRequest {
            title: "Bootcamp".to_string(),
            description: None,
            duration_weeks: 1,
            start_date: day,
            end_date: day,
            is_active: true,
        };
        assert!(request.check_dates().is_ok());
    }
}
