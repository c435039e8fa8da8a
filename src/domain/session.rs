//! Survey session aggregate.
//!
//! A session binds one authenticated user to their survey progress. It is
//! created at a successful OAuth callback and destroyed at logout/finish.
//!
//! # Invariants
//!
//! - `id` is globally unique
//! - `progress` starts at 0 and only ever advances by exactly 1
//! - the owner profile and friend list are immutable after creation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::foundation::SessionId;
use super::user::UserProfile;

/// Long-lived OAuth access credential pair for one user.
///
/// Stored server-side with the session; never sent back to the browser.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub key: String,
    pub secret: String,
}

impl AccessToken {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

// Keep the secret out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("key", &self.key)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Errors raised by session mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("progress can only advance to {expected}, got {requested}")]
    NonSequentialAdvance { expected: u8, requested: u8 },
}

/// Survey session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Profile of the owning user, snapshotted at login.
    user: UserProfile,

    /// Friends fetched at login, in API order (unsorted).
    friends: Vec<UserProfile>,

    /// OAuth access credential pair.
    token: AccessToken,

    /// Highest question index a timeline has been generated for.
    progress: u8,

    /// When the session was created.
    created_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at question progress 0.
    pub fn new(
        id: SessionId,
        user: UserProfile,
        friends: Vec<UserProfile>,
        token: AccessToken,
    ) -> Self {
        Self {
            id,
            user,
            friends,
            token,
            progress: 0,
            created_at: Utc::now(),
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        user: UserProfile,
        friends: Vec<UserProfile>,
        token: AccessToken,
        progress: u8,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            friends,
            token,
            progress,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the owning user's profile.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns the friends fetched at login, in API order.
    pub fn friends(&self) -> &[UserProfile] {
        &self.friends
    }

    /// Returns the friend list sorted ascending by follower count, the
    /// order the question-engine rules are defined over.
    pub fn friends_by_followers_ascending(&self) -> Vec<UserProfile> {
        let mut sorted = self.friends.clone();
        UserProfile::sort_by_followers_ascending(&mut sorted);
        sorted
    }

    /// Returns the OAuth access credential pair.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Highest question index a timeline has been generated for.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance progress to the next question.
    ///
    /// # Errors
    ///
    /// - `NonSequentialAdvance` unless `question == progress + 1`
    pub fn advance_to(&mut self, question: u8) -> Result<(), SessionError> {
        let expected = self.progress + 1;
        if question != expected {
            return Err(SessionError::NonSequentialAdvance {
                expected,
                requested: question,
            });
        }
        self.progress = question;
        Ok(())
    }
}
