//! EndSessionHandler - logout/finish teardown.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::SurveyError;

/// Deletes the server-side session record; the HTTP layer separately
/// clears the cookie session. Safe to call twice (finish then logout).
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<(), SurveyError> {
        self.store.delete_session(session_id).await?;
        tracing::info!(%session_id, "survey session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::survey::testing::profile;
    use crate::domain::session::{AccessToken, Session};

    #[tokio::test]
    async fn ending_removes_the_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = Session::new(
            SessionId::new(),
            profile(100, "me", 50),
            Vec::new(),
            AccessToken::new("k", "s"),
        );
        let id = *session.id();
        store.create_session(&session).await.unwrap();

        let handler = EndSessionHandler::new(store.clone());
        handler.handle(&id).await.unwrap();

        assert!(store.find_session(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ending_twice_is_idempotent() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = EndSessionHandler::new(store);

        let id = SessionId::new();
        handler.handle(&id).await.unwrap();
        handler.handle(&id).await.unwrap();
    }
}
