//! Shared key generation for storage backends.

use kinetrexa_core::models::DocumentKind;

/// Generate the storage key for a generated document.
///
/// Format: `documents/{application_public_id}/{kind}.pdf`. All backends must
/// use this format for consistency.
pub fn document_key(application_public_id: &str, kind: DocumentKind) -> String {
    format!("documents/{}/{}.pdf", application_public_id, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_format() {
        assert_eq!(
            document_key("KT-2026-7MQX4D", DocumentKind::OfferLetter),
            "documents/KT-2026-7MQX4D/offer-letter.pdf"
        );
        assert_eq!(
            document_key("KT-2026-7MQX4D", DocumentKind::Certificate),
            "documents/KT-2026-7MQX4D/certificate.pdf"
        );
    }
}
