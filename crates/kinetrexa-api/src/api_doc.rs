//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::api_key::{AdminKeyResponse, CreateAdminKeyRequest, CreateAdminKeyResponse};
use crate::error::ErrorResponse;
use crate::handlers;
use crate::handlers::admin::{
    CorrectApplicantRequest, UpdatePaymentRequest, UpdateStatusRequest,
    UpdateTaskAssignmentRequest,
};
use crate::handlers::documents::DepositDocumentResponse;
use kinetrexa_core::models::{
    Applicant, ApplicationResponse, ApplicationStatus, CertificateProjection,
    CreateApplicationRequest, CreateInternshipRequest, DocumentKind, DocumentStatus,
    DocumentStatusSet, InternshipResponse, StatusProjection, TrackedApplication, VerifyRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::applications::submit_application,
        handlers::applications::track_applications,
        handlers::verify::verify,
        handlers::documents::download_document,
        handlers::documents::deposit_document,
        handlers::internships::list_internships,
        handlers::internships::create_internship,
        handlers::internships::update_internship,
        handlers::admin::update_status,
        handlers::admin::update_task_assignment,
        handlers::admin::update_payment,
        handlers::admin::list_applications,
        handlers::admin::correct_applicant,
        handlers::admin_keys::create_admin_key,
        handlers::admin_keys::list_admin_keys,
        handlers::admin_keys::revoke_admin_key,
        handlers::health::health,
    ),
    components(schemas(
        Applicant,
        ApplicationResponse,
        ApplicationStatus,
        CertificateProjection,
        CreateApplicationRequest,
        CreateInternshipRequest,
        DocumentKind,
        DocumentStatus,
        DocumentStatusSet,
        InternshipResponse,
        StatusProjection,
        TrackedApplication,
        VerifyRequest,
        UpdateStatusRequest,
        UpdateTaskAssignmentRequest,
        UpdatePaymentRequest,
        CorrectApplicantRequest,
        DepositDocumentResponse,
        CreateAdminKeyRequest,
        CreateAdminKeyResponse,
        AdminKeyResponse,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "applications", description = "Application submission and tracking"),
        (name = "verification", description = "Public status and certificate verification"),
        (name = "documents", description = "Gated document downloads"),
        (name = "internships", description = "Internship tracks"),
        (name = "admin", description = "Administrative operations"),
        (name = "health", description = "Health checks"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = get_openapi_spec();
        let json = serde_json::to_value(&spec).expect("serialize spec");
        assert!(json.get("paths").is_some());
    }
}
