//! Domain models for the application lifecycle.

pub mod application;
pub mod document;
pub mod internship;
pub mod verification;

pub use application::{
    Applicant, Application, ApplicationResponse, ApplicationStatus, CreateApplicationRequest,
    TrackedApplication,
};
pub use document::{DocumentAccess, DocumentKind};
pub use internship::{CreateInternshipRequest, Internship, InternshipResponse};
pub use verification::{
    CertificateProjection, DocumentStatus, DocumentStatusSet, StatusProjection, VerifyRequest,
};
