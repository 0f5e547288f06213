//! Public verification projections.
//!
//! These are the only shapes the unauthenticated verify endpoint returns.
//! The certificate projection deliberately excludes applicant contact details
//! (phone, resume URL): a certificate id is meant to be shared with third
//! parties, the applicant's PII is not.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::application::{Application, ApplicationStatus};
use super::document::{DocumentAccess, DocumentKind};
use super::internship::Internship;

/// Verification request: either a two-factor status lookup or a
/// certificate-id lookup.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum VerifyRequest {
    Status {
        email: String,
        application_id: String,
    },
    Certificate {
        certificate_id: String,
    },
}

/// Per-document view: gate state plus download bookkeeping.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DocumentStatus {
    pub unlocked: bool,
    pub downloaded: bool,
    pub downloaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentStatusSet {
    pub offer_letter: DocumentStatus,
    pub task_assignment: DocumentStatus,
    pub certificate: DocumentStatus,
}

impl DocumentStatusSet {
    pub fn build(application: &Application, access: DocumentAccess) -> Self {
        let status_for = |kind: DocumentKind| {
            let (downloaded, downloaded_at) = match kind {
                DocumentKind::OfferLetter => (
                    application.offer_letter_downloaded,
                    application.offer_letter_downloaded_at,
                ),
                DocumentKind::TaskAssignment => {
                    (application.task_downloaded, application.task_downloaded_at)
                }
                DocumentKind::Certificate => (
                    application.certificate_downloaded,
                    application.certificate_downloaded_at,
                ),
            };
            DocumentStatus {
                unlocked: access.allows(kind),
                downloaded,
                downloaded_at,
            }
        };

        DocumentStatusSet {
            offer_letter: status_for(DocumentKind::OfferLetter),
            task_assignment: status_for(DocumentKind::TaskAssignment),
            certificate: status_for(DocumentKind::Certificate),
        }
    }
}

/// Status-mode projection: what the candidate sees on the status checker.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusProjection {
    pub application_id: String,
    pub applicant_name: String,
    pub domain: String,
    pub status: ApplicationStatus,
    pub status_updated_at: DateTime<Utc>,
    pub applied_at: DateTime<Utc>,
    pub documents: DocumentStatusSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
}

impl StatusProjection {
    pub fn build(application: Application, internship: &Internship, now: DateTime<Utc>) -> Self {
        let access = DocumentAccess::evaluate(
            application.status,
            application.task_assignment_enabled,
            internship.end_date,
            now,
        );
        let documents = DocumentStatusSet::build(&application, access);

        StatusProjection {
            application_id: application.public_id,
            applicant_name: application.applicant.full_name(),
            domain: internship.title.clone(),
            status: application.status,
            status_updated_at: application.status_updated_at,
            applied_at: application.created_at,
            documents,
            certificate_id: application.certificate_id,
        }
    }
}

/// Certificate-mode projection for third-party verification.
#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateProjection {
    pub certificate_id: String,
    pub applicant_name: String,
    pub domain: String,
    pub status: ApplicationStatus,
    pub issued_at: Option<DateTime<Utc>>,
    pub internship_end_date: NaiveDate,
    /// True once the certificate gate is open; a certificate looked up before
    /// the program's end date reports `valid: false`.
    pub valid: bool,
}

impl CertificateProjection {
    pub fn build(application: Application, internship: &Internship, now: DateTime<Utc>) -> Self {
        let access = DocumentAccess::evaluate(
            application.status,
            application.task_assignment_enabled,
            internship.end_date,
            now,
        );

        CertificateProjection {
            certificate_id: application.certificate_id.unwrap_or_default(),
            applicant_name: application.applicant.full_name(),
            domain: internship.title.clone(),
            status: application.status,
            issued_at: application.certificate_issued_at,
            internship_end_date: internship.end_date,
            valid: access.certificate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::Applicant;
    use chrono::Duration;
    use uuid::Uuid;

    fn test_internship(end_date: NaiveDate) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            title: "Full Stack Dev".to_string(),
            description: None,
            duration_weeks: 12,
            start_date: end_date - Duration::days(84),
            end_date,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_application(status: ApplicationStatus, internship_id: Uuid) -> Application {
        let now = Utc::now();
        Application {
            id: Uuid::new_v4(),
            public_id: "KT-2026-7MQX4D".to_string(),
            applicant: Applicant {
                first_name: "Asha".to_string(),
                last_name: "Nair".to_string(),
                email: "asha@example.com".to_string(),
                phone: "+919876543210".to_string(),
                college: "NIT Calicut".to_string(),
                degree: "B.Tech CSE".to_string(),
                graduation_year: 2026,
                skills: vec!["rust".to_string(), "sql".to_string()],
                resume_url: Some("https://example.com/resume.pdf".to_string()),
            },
            internship_id,
            status,
            status_updated_at: now,
            task_assignment_enabled: false,
            task_assignment_details: None,
            payment_amount: None,
            payment_status: None,
            offer_letter_downloaded: false,
            offer_letter_downloaded_at: None,
            task_downloaded: false,
            task_downloaded_at: None,
            certificate_downloaded: false,
            certificate_downloaded_at: None,
            certificate_id: Some("KTC-0011223344556677889900aabbccdd".to_string()),
            certificate_issued_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_projection_reflects_gate() {
        let now = Utc::now();
        let internship = test_internship((now - Duration::days(1)).date_naive());
        let application = test_application(ApplicationStatus::Completed, internship.id);

        let projection = StatusProjection::build(application, &internship, now);

        assert!(projection.documents.offer_letter.unlocked);
        assert!(!projection.documents.task_assignment.unlocked);
        assert!(projection.documents.certificate.unlocked);
        assert_eq!(projection.domain, "Full Stack Dev");
        assert_eq!(projection.applicant_name, "Asha Nair");
    }

    #[test]
    fn test_certificate_projection_invalid_before_end_date() {
        let now = Utc::now();
        let internship = test_internship((now + Duration::days(7)).date_naive());
        let application = test_application(ApplicationStatus::Completed, internship.id);

        let projection = CertificateProjection::build(application, &internship, now);

        assert!(!projection.valid);
        assert_eq!(projection.status, ApplicationStatus::Completed);
    }

    #[test]
    fn test_certificate_projection_omits_contact_details() {
        let now = Utc::now();
        let internship = test_internship((now - Duration::days(1)).date_naive());
        let application = test_application(ApplicationStatus::Completed, internship.id);

        let json = serde_json::to_value(CertificateProjection::build(
            application,
            &internship,
            now,
        ))
        .expect("serialize");

        assert!(json.get("phone").is_none());
        assert!(json.get("resume_url").is_none());
        assert!(json.get("email").is_none());
        assert_eq!(
            json.get("applicant_name").and_then(|v| v.as_str()),
            Some("Asha Nair")
        );
    }

    #[test]
    fn test_verify_request_deserializes_both_modes() {
        let status: VerifyRequest = serde_json::from_str(
            r#"{"email":"asha@example.com","application_id":"KT-2026-7MQX4D"}"#,
        )
        .expect("status mode");
        assert!(matches!(status, VerifyRequest::Status { .. }));

        let cert: VerifyRequest =
            serde_json::from_str(r#"{"certificate_id":"KTC-00112233"}"#).expect("certificate mode");
        assert!(matches!(cert, VerifyRequest::Certificate { .. }));
    }
}
