use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::chat_service::ChatService;

/// In-memory registry of chat sessions keyed by session id.
///
/// Each entry owns its own `SessionState`; nothing is shared between
/// sessions, so one user's selection or chat never leaks into another's.
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Arc<ChatService>>>>,
}

impl SessionRegistry {
    /// Creates a new empty SessionRegistry.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a session under a fresh id and returns the id.
    pub async fn open(&self, service: ChatService) -> String {
        let session_id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), Arc::new(service));
        tracing::debug!("[Registry] Opened session {}", session_id);
        session_id
    }

    /// Gets a session by id.
    pub async fn get(&self, session_id: &str) -> Option<Arc<ChatService>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Removes a session, returning it if it existed.
    pub async fn close(&self, session_id: &str) -> Option<Arc<ChatService>> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
