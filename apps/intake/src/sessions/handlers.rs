use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::interview::conversation::Conversation;
use crate::interview::stage::Stage;
use crate::models::candidate::AnonymizedRecord;
use crate::sessions::registry::SessionHandle;
use crate::state::AppState;
use crate::storage::StoreError;

const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub stage: Stage,
}

#[derive(Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub stage: Stage,
    pub completed: bool,
    /// Anonymized record id once the intake has been persisted.
    pub record_id: Option<String>,
}

#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub session_id: Uuid,
    pub stage: Stage,
    pub questions_answered: usize,
    pub questions_total: usize,
    pub record_id: Option<String>,
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let conversation = Conversation::new(state.generator.clone(), state.store.clone());
    let session_id = state.sessions.insert(conversation).await;
    info!(%session_id, "Intake session created");
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id,
            stage: Stage::Greeting,
        }),
    )
}

/// POST /api/v1/sessions/:id/messages
pub async fn handle_post_message(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let handle = find_session(&state, session_id).await?;
    let mut conversation = handle.lock().await;
    let reply = conversation.process_user_input(&req.text).await;
    let record_id = conversation.record_id().map(str::to_string);

    // A persisted session leaves the registry. One whose write failed stays
    // so its next message retries the write.
    if record_id.is_some() {
        state.sessions.remove(session_id).await;
        info!(%session_id, "Intake session closed");
    }

    Ok(Json(MessageResponse {
        session_id,
        reply,
        stage: conversation.stage(),
        completed: conversation.is_complete(),
        record_id,
    }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<Json<SessionStatusResponse>, AppError> {
    let handle = find_session(&state, session_id).await?;
    let conversation = handle.lock().await;
    let record = conversation.record();

    Ok(Json(SessionStatusResponse {
        session_id,
        stage: conversation.stage(),
        questions_answered: record.technical_answers.len(),
        questions_total: record.technical_questions.len(),
        record_id: conversation.record_id().map(str::to_string),
    }))
}

/// DELETE /api/v1/sessions/:id
/// Drops the session without persisting anything.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("session {session_id}")));
    }
    info!(%session_id, "Intake session discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/records/:id
pub async fn handle_get_record(
    State(state): State<AppState>,
    ApiPath(record_id): ApiPath<String>,
) -> Result<Json<AnonymizedRecord>, AppError> {
    match state.store.load(&record_id).await {
        Ok(record) => Ok(Json(record)),
        Err(StoreError::NotFound(id)) => Err(AppError::NotFound(format!("record {id}"))),
        Err(StoreError::InvalidId(id)) => {
            Err(AppError::Validation(format!("invalid record id {id:?}")))
        }
        Err(e) => Err(e.into()),
    }
}
