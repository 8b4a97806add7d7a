//! Submission fingerprints for log correlation
//!
//! Logs never carry the email in clear; they carry a SHA-256 of the
//! validated input instead. Nothing is stored.

use crate::models::FinancialInput;
use sha2::{Digest, Sha256};
use std::io::Write;

/// Compute SHA256 hash of a validated input
/// Uses streaming serialization into the hasher
pub fn fingerprint(input: &FinancialInput) -> String {
    let mut hasher = Sha256::new();

    if serde_json::to_writer(&mut HashWriter(&mut hasher), input).is_err() {
        return String::new();
    }

    hex::encode(hasher.finalize())
}

/// Short prefix of the fingerprint for log lines
pub fn short_fingerprint(input: &FinancialInput) -> String {
    fingerprint(input).chars().take(12).collect()
}

/// Adapter to allow writing into Sha256 via std::io::Write
struct HashWriter<'a, H: Digest>(&'a mut H);

impl<'a, H: Digest> Write for HashWriter<'a, H> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFormValues;
    use crate::validation::create_default_validator;

    fn validated(email: &str, turnover: &str) -> FinancialInput {
        let form = RawFormValues {
            turnover: turnover.to_string(),
            expenses: "0".to_string(),
            ownership: "owner".to_string(),
            email: email.to_string(),
            ..RawFormValues::default()
        };
        create_default_validator().validate(&form).unwrap()
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = validated("jane@example.com", "10000");
        let b = validated("jane@example.com", "10 000");

        let hash = fingerprint(&a);
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, fingerprint(&b));
        assert_eq!(short_fingerprint(&a).len(), 12);
    }

    #[test]
    fn test_fingerprint_hides_email() {
        let a = validated("jane@example.com", "10000");
        let b = validated("john@example.com", "10000");

        let hash = fingerprint(&a);
        assert!(!hash.contains("jane"));
        assert_ne!(hash, fingerprint(&b));
    }
}
