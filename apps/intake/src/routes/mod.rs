pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::sessions::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake conversation
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/messages",
            post(handlers::handle_post_message),
        )
        // Persisted records (anonymized)
        .route("/api/v1/records/:id", get(handlers::handle_get_record))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::interview::questions::StaticQuestionGenerator;
    use crate::sessions::SessionRegistry;
    use crate::storage::RecordStore;

    fn test_app() -> (Router, TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState {
            sessions: SessionRegistry::new(),
            generator: Arc::new(StaticQuestionGenerator::new(vec![
                "What is a lifetime?".to_string(),
                "When do you use Box<dyn Trait>?".to_string(),
            ])),
            store: RecordStore::new(tmp.path()),
        };
        (build_router(state), tmp)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn say(app: &Router, session: &str, text: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/v1/sessions/{session}/messages"),
            Some(json!({ "text": text })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _tmp) = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_full_intake_over_http() {
        let (app, _tmp) = test_app();

        let (status, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["stage"], "greeting");
        let session = created["session_id"].as_str().unwrap().to_string();

        let welcome = say(&app, &session, "hi").await;
        assert_eq!(welcome["stage"], "name");

        for text in [
            "Jane Doe",
            "jane@example.com",
            "+14155551234",
            "4",
            "sre",
            "oslo",
        ] {
            say(&app, &session, text).await;
        }
        let first = say(&app, &session, "rust").await;
        assert_eq!(first["reply"], "What is a lifetime?");
        assert_eq!(first["stage"], "technical_questions");

        let (_, status_body) = send(&app, "GET", &format!("/api/v1/sessions/{session}"), None).await;
        assert_eq!(status_body["questions_total"], 2);
        assert_eq!(status_body["questions_answered"], 0);

        say(&app, &session, "borrowed data scope").await;
        let done = say(&app, &session, "for heterogeneous collections").await;
        assert_eq!(done["completed"], true);
        assert_eq!(done["stage"], "complete");
        let record_id = done["record_id"].as_str().unwrap().to_string();
        assert!(done["reply"].as_str().unwrap().contains(&record_id));

        let (status, record) = send(&app, "GET", &format!("/api/v1/records/{record_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["id"], record_id.as_str());
        assert_eq!(
            record["technical_answers"],
            json!(["borrowed data scope", "for heterogeneous collections"])
        );
        assert_ne!(record["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _tmp) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/sessions/7d0c8c3e-8a43-4f5e-9d51-2f7f2e1c4b11/messages",
            Some(json!({ "text": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_message_is_rejected() {
        let (app, _tmp) = test_app();
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let session = created["session_id"].as_str().unwrap();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{session}/messages"),
            Some(json!({ "text": "x".repeat(5000) })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_session_id_is_json_error() {
        let (app, _tmp) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/sessions/not-a-uuid/messages",
            Some(json!({ "text": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());

        let (status, body) = send(&app, "GET", "/api/v1/sessions/123", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_message_without_text_is_json_error() {
        let (app, _tmp) = test_app();
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let session = created["session_id"].as_str().unwrap();
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{session}/messages"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn test_completed_sessions_are_evicted() {
        let (app, tmp) = test_app();
        let mut sessions = Vec::new();
        for _ in 0..3 {
            let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
            sessions.push(created["session_id"].as_str().unwrap().to_string());
        }
        let (_, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(health["active_sessions"], 3);

        for session in &sessions {
            let done = say(&app, session, "bye").await;
            assert_eq!(done["completed"], true);
            assert!(done["record_id"].is_string());
        }

        let (_, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(health["active_sessions"], 0);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 3);

        let (status, body) =
            send(&app, "GET", &format!("/api/v1/sessions/{}", sessions[0]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_session_kept_when_record_write_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("occupied");
        std::fs::write(&blocker, b"x").unwrap();
        let app = build_router(AppState {
            sessions: SessionRegistry::new(),
            generator: Arc::new(StaticQuestionGenerator::new(vec!["q?".to_string()])),
            store: RecordStore::new(blocker.join("records")),
        });

        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let session = created["session_id"].as_str().unwrap();
        let done = say(&app, session, "quit").await;
        assert_eq!(done["completed"], true);
        assert!(done["record_id"].is_null());

        let (_, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(health["active_sessions"], 1);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (app, tmp) = test_app();
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let uri = format!("/api/v1/sessions/{}", created["session_id"].as_str().unwrap());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_record_lookup_errors() {
        let (app, _tmp) = test_app();
        let (status, _) = send(&app, "GET", "/api/v1/records/missingRecord", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "GET", "/api/v1/records/bad.id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
