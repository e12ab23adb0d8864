use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::interview::conversation::Conversation;

pub type SessionHandle = Arc<Mutex<Conversation>>;

/// Live conversations keyed by session id.
///
/// Each conversation sits behind its own mutex, so one session processes a
/// single input at a time while other sessions proceed independently.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, conversation: Conversation) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(conversation)));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::questions::StaticQuestionGenerator;
    use crate::interview::stage::Stage;
    use crate::storage::RecordStore;

    fn conversation() -> Conversation {
        Conversation::new(
            Arc::new(StaticQuestionGenerator::new(vec!["q?".to_string()])),
            RecordStore::new(std::env::temp_dir().join("intake-registry-tests")),
        )
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.insert(conversation()).await;
        let b = registry.insert(conversation()).await;
        assert_ne!(a, b);
        assert_eq!(registry.count().await, 2);

        let handle = registry.get(a).await.unwrap();
        handle.lock().await.process_user_input("hi").await;

        assert_eq!(registry.get(a).await.unwrap().lock().await.stage(), Stage::Name);
        assert_eq!(
            registry.get(b).await.unwrap().lock().await.stage(),
            Stage::Greeting
        );
    }

    #[tokio::test]
    async fn test_remove_unknown_session() {
        let registry = SessionRegistry::new();
        let id = registry.insert(conversation()).await;
        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
    }
}
