//! Anonymization. Replaces contact details with one-way digests and mints an
//! opaque record identifier.
//!
//! LIMITATION: digests are unsalted SHA-256. Equal inputs always produce equal
//! digests, which keeps duplicate candidates detectable across records but
//! leaves low-entropy values (short phone numbers) open to dictionary attacks.
//! The storage directory is assumed to be access-controlled.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::models::candidate::{AnonymizedRecord, CandidateRecord};

/// Bytes of entropy in a record identifier.
const ID_BYTES: usize = 16;

/// Hex SHA-256 of `value`. Absent and empty values stay absent.
pub fn hash_sensitive(value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    Some(format!("{:x}", hasher.finalize()))
}

/// URL-safe random token, 22 characters for 16 bytes.
pub fn generate_anonymized_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Builds the persisted form of `record` stamped with `now`.
pub fn anonymize(record: &CandidateRecord, now: DateTime<Utc>) -> AnonymizedRecord {
    AnonymizedRecord {
        id: generate_anonymized_id(),
        full_name: record.full_name.clone(),
        email: hash_sensitive(record.email.as_deref()),
        phone: hash_sensitive(record.phone.as_deref()),
        years_experience: record.years_experience,
        desired_positions: record.desired_positions.clone(),
        current_location: record.current_location.clone(),
        tech_stack: record.tech_stack.clone(),
        technical_questions: record.technical_questions.clone(),
        technical_answers: record.technical_answers.clone(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}
