use std::sync::Arc;

use crate::interview::questions::QuestionGenerator;
use crate::sessions::SessionRegistry;
use crate::storage::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    /// Pluggable question source. Default: LlmQuestionGenerator.
    pub generator: Arc<dyn QuestionGenerator>,
    pub store: RecordStore,
}
