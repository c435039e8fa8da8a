//! In-memory session store.
//!
//! Keeps every session and its per-question state in process memory.
//! Used for tests and credential-less development runs; state is lost on
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::domain::timeline::{SelectionSet, Tweet};
use crate::ports::{SessionStore, StoreError};

/// Everything stored under one session.
#[derive(Debug, Clone)]
struct SessionRecord {
    session: Session,
    timelines: HashMap<u8, Vec<Tweet>>,
    selections: HashMap<u8, SelectionSet>,
}

/// In-memory storage for survey sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (useful for tests).
    pub async fn session_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(
            *session.id(),
            SessionRecord {
                session: session.clone(),
                timelines: HashMap::new(),
                selections: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).map(|record| record.session.clone()))
    }

    async fn update_progress(&self, id: &SessionId, progress: u8) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or(StoreError::SessionNotFound(*id))?;
        record.session = Session::reconstitute(
            *record.session.id(),
            record.session.user().clone(),
            record.session.friends().to_vec(),
            record.session.token().clone(),
            progress,
            record.session.created_at(),
        );
        Ok(())
    }

    async fn save_timeline(
        &self,
        id: &SessionId,
        question: u8,
        timeline: &[Tweet],
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or(StoreError::SessionNotFound(*id))?;
        record.timelines.insert(question, timeline.to_vec());
        Ok(())
    }

    async fn load_timeline(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<Vec<Tweet>>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .and_then(|record| record.timelines.get(&question))
            .cloned())
    }

    async fn save_selections(
        &self,
        id: &SessionId,
        question: u8,
        selections: &SelectionSet,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or(StoreError::SessionNotFound(*id))?;
        record.selections.insert(question, selections.clone());
        Ok(())
    }

    async fn load_selections(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<SelectionSet>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .and_then(|record| record.selections.get(&question))
            .cloned())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), StoreError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
