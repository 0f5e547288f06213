//! Public identifier generation.
//!
//! Application ids are short and human-presentable (they appear in emails and
//! on the status tracker); certificate ids are long random tokens meant to be
//! unguessable, since knowing one is sufficient for third-party verification.

use chrono::{DateTime, Datelike, Utc};

/// Alphabet for application ids. Excludes 0/O/1/I/L to keep ids readable
/// when typed from a printed offer letter.
const PUBLIC_ID_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTVWXYZ23456789";

const PUBLIC_ID_RANDOM_LEN: usize = 6;

/// Generate a human-presentable application id, e.g. `KT-2026-7MQX4D`.
pub fn generate_application_id(now: DateTime<Utc>) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let suffix: String = (0..PUBLIC_ID_RANDOM_LEN)
        .map(|_| PUBLIC_ID_ALPHABET[rng.random_range(0..PUBLIC_ID_ALPHABET.len())] as char)
        .collect();

    format!("KT-{}-{}", now.year(), suffix)
}

/// Generate an unguessable certificate id, e.g. `KTC-<32 hex chars>`.
pub fn generate_certificate_id() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..16).map(|_| rng.random()).collect();

    format!("KTC-{}", hex::encode(random_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_id_format() {
        let now = Utc::now();
        let id = generate_application_id(now);

        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "KT");
        assert_eq!(parts[1], now.year().to_string());
        assert_eq!(parts[2].len(), PUBLIC_ID_RANDOM_LEN);
        assert!(parts[2]
            .bytes()
            .all(|b| PUBLIC_ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_application_id_avoids_lookalike_characters() {
        for _ in 0..50 {
            let id = generate_application_id(Utc::now());
            assert!(!id.contains('0'));
            assert!(!id.contains('O'));
            assert!(!id.contains('1'));
            assert!(!id.contains('I'));
            assert!(!id.contains('L'));
        }
    }

    #[test]
    fn test_certificate_id_format() {
        let id = generate_certificate_id();
        assert!(id.starts_with("KTC-"));
        assert_eq!(id.len(), 4 + 32);
        assert!(id[4..].bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_certificate_ids_are_distinct() {
        let a = generate_certificate_id();
        let b = generate_certificate_id();
        assert_ne!(a, b);
    }
}
