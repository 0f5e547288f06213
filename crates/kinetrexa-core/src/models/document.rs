use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

use super::application::ApplicationStatus;

/// Generated document kinds gated by the application lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    OfferLetter,
    TaskAssignment,
    Certificate,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::OfferLetter,
        DocumentKind::TaskAssignment,
        DocumentKind::Certificate,
    ];
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentKind::OfferLetter => write!(f, "offer-letter"),
            DocumentKind::TaskAssignment => write!(f, "task-assignment"),
            DocumentKind::Certificate => write!(f, "certificate"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer-letter" => Ok(DocumentKind::OfferLetter),
            "task-assignment" => Ok(DocumentKind::TaskAssignment),
            "certificate" => Ok(DocumentKind::Certificate),
            _ => Err(anyhow::anyhow!("Invalid document kind: {}", s)),
        }
    }
}

/// Which documents an application may currently download.
///
/// Pure evaluation over (status, task-assignment flag, internship end date).
/// Recomputed on every read, never cached, since the certificate rule depends
/// on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DocumentAccess {
    pub offer_letter: bool,
    pub task_assignment: bool,
    pub certificate: bool,
}

impl DocumentAccess {
    /// Evaluate the gate.
    ///
    /// - Offer letter unlocks at `selected` and stays unlocked at `completed`.
    /// - Task assignment follows the admin flag, independent of status.
    /// - Certificate requires BOTH `completed` status AND the internship end
    ///   date having passed; a completion marked early stays locked until the
    ///   program officially ends.
    pub fn evaluate(
        status: ApplicationStatus,
        task_assignment_enabled: bool,
        internship_end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let offer_letter = matches!(
            status,
            ApplicationStatus::Selected | ApplicationStatus::Completed
        );
        let certificate =
            status == ApplicationStatus::Completed && now.date_naive() >= internship_end_date;

        DocumentAccess {
            offer_letter,
            task_assignment: task_assignment_enabled,
            certificate,
        }
    }

    /// Whether the given document kind is currently unlocked.
    pub fn allows(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::OfferLetter => self.offer_letter,
            DocumentKind::TaskAssignment => self.task_assignment,
            DocumentKind::Certificate => self.certificate,
        }
    }
}
