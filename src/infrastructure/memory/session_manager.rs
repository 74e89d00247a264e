//! In-Memory Reader Session Manager

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{ReaderSession, ReaderSessionManagerPort, SessionError};
use crate::domain::reader::ReadingPosition;

/// 内存阅读会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, ReaderSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderSessionManagerPort for InMemorySessionManager {
    fn create(&self, session: ReaderSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        let book_id = session.book.id.clone();
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, book_id = %book_id, "Session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<ReaderSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn update_position(&self, id: &str, position: ReadingPosition) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.position = position;
        session.last_activity = Utc::now();
        Ok(())
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn touch(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter(|entry| now - entry.last_activity > timeout)
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}
