//! Errors surfaced by the survey command handlers.

use thiserror::Error;

use crate::domain::session::SessionError;
use crate::ports::{GatewayError, StoreError};

/// Failures the HTTP layer maps to redirects or JSON error envelopes.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The cookie referenced a session the store no longer has.
    #[error("session no longer exists")]
    SessionExpired,

    /// Tried to record selections for a question past current progress.
    #[error("question {requested} not reached yet (progress {progress})")]
    QuestionNotReached { requested: u8, progress: u8 },

    /// Progress says a timeline was generated but the store has none.
    #[error("no stored timeline for question {question}")]
    MissingTimeline { question: u8 },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
