//! RecordSelectionsHandler - persisting per-tweet choices.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TweetId};
use crate::domain::timeline::SelectionSet;
use crate::ports::SessionStore;

use super::SurveyError;

/// Command to record choices for one question.
///
/// Selections arrive as an explicit list of pairs; the HTTP layer is
/// responsible for zipping its two positional form fields into this shape
/// and rejecting mismatched lengths before the command is built.
#[derive(Debug, Clone)]
pub struct RecordSelectionsCommand {
    pub session_id: SessionId,
    pub question: u8,
    pub selections: Vec<(TweetId, bool)>,
}

/// Handler persisting recorded selections.
pub struct RecordSelectionsHandler {
    store: Arc<dyn SessionStore>,
}

impl RecordSelectionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Record selections for a question the session has already reached.
    ///
    /// # Errors
    ///
    /// - `SessionExpired` if the session no longer exists
    /// - `QuestionNotReached` if `question` is 0 or past current progress
    /// - `Store` if persistence fails
    pub async fn handle(&self, cmd: RecordSelectionsCommand) -> Result<(), SurveyError> {
        let session = self
            .store
            .find_session(&cmd.session_id)
            .await?
            .ok_or(SurveyError::SessionExpired)?;

        if cmd.question == 0 || cmd.question > session.progress() {
            return Err(SurveyError::QuestionNotReached {
                requested: cmd.question,
                progress: session.progress(),
            });
        }

        let selections = SelectionSet::from_pairs(cmd.selections);
        self.store
            .save_selections(&cmd.session_id, cmd.question, &selections)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::survey::testing::profile;
    use crate::domain::session::{AccessToken, Session};

    async fn seeded_session(store: &InMemorySessionStore, progress: u8) -> SessionId {
        let session = Session::new(
            SessionId::new(),
            profile(100, "me", 50),
            vec![profile(1, "friend", 10)],
            AccessToken::new("k", "s"),
        );
        let id = *session.id();
        store.create_session(&session).await.unwrap();
        if progress > 0 {
            store.update_progress(&id, progress).await.unwrap();
        }
        id
    }

    fn command(id: SessionId, question: u8) -> RecordSelectionsCommand {
        RecordSelectionsCommand {
            session_id: id,
            question,
            selections: vec![(TweetId::new(10), true), (TweetId::new(11), false)],
        }
    }

    #[tokio::test]
    async fn records_for_a_reached_question() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = seeded_session(&store, 2).await;
        let handler = RecordSelectionsHandler::new(store.clone());

        handler.handle(command(id, 1)).await.unwrap();
        handler.handle(command(id, 2)).await.unwrap();

        let stored = store.load_selections(&id, 2).await.unwrap().unwrap();
        assert_eq!(stored.get(TweetId::new(10)), Some(true));
        assert_eq!(stored.get(TweetId::new(11)), Some(false));
    }

    #[tokio::test]
    async fn rejects_questions_beyond_progress() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = seeded_session(&store, 1).await;
        let handler = RecordSelectionsHandler::new(store.clone());

        let result = handler.handle(command(id, 2)).await;
        assert!(matches!(
            result,
            Err(SurveyError::QuestionNotReached {
                requested: 2,
                progress: 1
            })
        ));
        assert!(store.load_selections(&id, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_question_zero() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = seeded_session(&store, 3).await;
        let handler = RecordSelectionsHandler::new(store);

        let result = handler.handle(command(id, 0)).await;
        assert!(matches!(
            result,
            Err(SurveyError::QuestionNotReached { requested: 0, .. })
        ));
    }

    #[tokio::test]
    async fn rerecording_overwrites_the_previous_choices() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = seeded_session(&store, 1).await;
        let handler = RecordSelectionsHandler::new(store.clone());

        handler.handle(command(id, 1)).await.unwrap();
        handler
            .handle(RecordSelectionsCommand {
                session_id: id,
                question: 1,
                selections: vec![(TweetId::new(10), false)],
            })
            .await
            .unwrap();

        let stored = store.load_selections(&id, 1).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.get(TweetId::new(10)), Some(false));
    }

    #[tokio::test]
    async fn unknown_session_is_expired() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = RecordSelectionsHandler::new(store);

        let result = handler.handle(command(SessionId::new(), 1)).await;
        assert!(matches!(result, Err(SurveyError::SessionExpired)));
    }
}
