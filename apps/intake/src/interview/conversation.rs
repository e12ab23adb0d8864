//! Conversation controller. Owns one candidate record and walks it through
//! the intake stages, one input at a time.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::interview::questions::{fallback_questions, QuestionGenerator};
use crate::interview::stage::{advance, normalize, Stage, Step};
use crate::models::candidate::CandidateRecord;
use crate::storage::RecordStore;

/// Closing message used when the record could not be persisted.
pub const GENERIC_CLOSING: &str = "Thank you for your interest. Our team will be in touch soon.";

fn closing_message(record_id: &str) -> String {
    format!(
        "Thank you for completing the initial screening!\n\n\
         Your privacy is assured:\n\
         - A unique, anonymized identifier has been generated: {record_id}\n\
         - Your contact details are stored only as one-way hashes\n\n\
         Next steps:\n\
         - Our recruitment team will review your application\n\
         - We'll contact you via email if you match our current openings\n\
         - Expected response time: 3-5 business days\n\n\
         We appreciate your interest in joining our talent network!"
    )
}

pub struct Conversation {
    stage: Stage,
    record: CandidateRecord,
    generator: Arc<dyn QuestionGenerator>,
    store: RecordStore,
    /// Anonymized id and closing text of the first successful termination.
    receipt: Option<(String, String)>,
}

impl Conversation {
    pub fn new(generator: Arc<dyn QuestionGenerator>, store: RecordStore) -> Self {
        Self {
            stage: Stage::Greeting,
            record: CandidateRecord::default(),
            generator,
            store,
            receipt: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn record(&self) -> &CandidateRecord {
        &self.record
    }

    /// Identifier of the persisted record, once the conversation has ended.
    pub fn record_id(&self) -> Option<&str> {
        self.receipt.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    /// Feeds one line of user text through the state machine and returns the
    /// assistant's reply. Never fails: every error path has a reply.
    pub async fn process_user_input(&mut self, raw: &str) -> String {
        let input = normalize(raw);
        match advance(self.stage, &mut self.record, &input) {
            Step::Advance { next, reply } => {
                info!(from = %self.stage, to = %next, "Intake stage advanced");
                self.stage = next;
                reply
            }
            Step::Reject { reply } | Step::NextQuestion { reply } => reply,
            Step::GenerateQuestions => self.start_technical_questions().await,
            Step::Terminate => self.end_conversation().await,
        }
    }

    async fn start_technical_questions(&mut self) -> String {
        let tech_stack = self.record.tech_stack.clone().unwrap_or_default();
        let mut questions = self.generator.generate(&tech_stack).await;
        if questions.is_empty() {
            warn!("Question generator returned no questions; using fallback questions");
            questions = fallback_questions();
        }

        let first = questions[0].clone();
        self.record.technical_questions = questions;
        self.record.technical_answers.clear();
        self.stage = Stage::TechnicalQuestions;
        first
    }

    /// Persists the record and returns the closing message.
    ///
    /// After a successful write the same message is returned for every later
    /// call without writing again. A failed write is retried on the next call.
    async fn end_conversation(&mut self) -> String {
        self.stage = Stage::Complete;

        if let Some((_, message)) = &self.receipt {
            return message.clone();
        }

        match self.store.finalize(&self.record).await {
            Ok(saved) => {
                info!(
                    record_id = %saved.id,
                    answers = saved.technical_answers.len(),
                    "Intake conversation finished"
                );
                let message = closing_message(&saved.id);
                self.receipt = Some((saved.id, message.clone()));
                message
            }
            Err(e) => {
                error!("Failed to persist candidate record: {e}");
                GENERIC_CLOSING.to_string()
            }
        }
    }
}
