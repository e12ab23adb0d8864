use serde::{Deserialize, Serialize};

/// The in-flight intake record. Owned by exactly one conversation.
/// It carries no identifier; one is minted when the record is anonymized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: Option<u8>,
    pub desired_positions: Option<String>,
    pub current_location: Option<String>,
    pub tech_stack: Option<String>,
    pub technical_questions: Vec<String>,
    /// Parallel to `technical_questions`: `technical_answers[i]` answers question `i`.
    pub technical_answers: Vec<String>,
}

/// Persisted form of a finished intake. Contact fields hold SHA-256 hex
/// digests, never raw values. Written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedRecord {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: Option<u8>,
    pub desired_positions: Option<String>,
    pub current_location: Option<String>,
    pub tech_stack: Option<String>,
    pub technical_questions: Vec<String>,
    pub technical_answers: Vec<String>,
    /// RFC 3339, always UTC.
    pub timestamp: String,
}
