//! Session store port.
//!
//! Defines the contract for persisting sessions, the timelines generated
//! for each question, and the selections users record over them.
//!
//! # Design
//!
//! - Timelines are written once per (session, question) and replayed
//!   verbatim afterwards; the store never regenerates them.
//! - Concurrent writes for the same session are last-write-wins; the only
//!   actor is the single end user.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::domain::timeline::{SelectionSet, Tweet};

/// Errors surfaced by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Persistence port for sessions and per-question survey state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly created session.
    ///
    /// # Errors
    ///
    /// - `Database` on persistence failure
    async fn create_session(&self, session: &Session) -> Result<(), StoreError>;

    /// Load a session by id. Returns `None` if it does not exist (e.g. a
    /// stale cookie after logout).
    async fn find_session(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Overwrite the stored progress index for a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `Database` on persistence failure
    async fn update_progress(&self, id: &SessionId, progress: u8) -> Result<(), StoreError>;

    /// Persist the timeline generated for a question.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `Database` on persistence failure
    async fn save_timeline(
        &self,
        id: &SessionId,
        question: u8,
        timeline: &[Tweet],
    ) -> Result<(), StoreError>;

    /// Load the timeline stored for a question, if one was generated.
    async fn load_timeline(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<Vec<Tweet>>, StoreError>;

    /// Persist the selections recorded for a question, replacing any
    /// earlier recording.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `Database` on persistence failure
    async fn save_selections(
        &self,
        id: &SessionId,
        question: u8,
        selections: &SelectionSet,
    ) -> Result<(), StoreError>;

    /// Load the selections recorded for a question, if any.
    async fn load_selections(
        &self,
        id: &SessionId,
        question: u8,
    ) -> Result<Option<SelectionSet>, StoreError>;

    /// Delete a session and everything recorded under it.
    ///
    /// Deleting an unknown session is not an error; logout and finish are
    /// idempotent.
    async fn delete_session(&self, id: &SessionId) -> Result<(), StoreError>;
}
