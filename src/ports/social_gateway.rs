//! Social gateway port.
//!
//! Wraps the third-party OAuth 1.0a + REST API behind a trait so the
//! application layer never sees HTTP. Every operation returns a typed
//! `GatewayError`; callers pattern-match failures and resolve them to a
//! redirect instead of letting them fall through.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::TwitterUserId;
use crate::domain::session::AccessToken;
use crate::domain::timeline::Tweet;
use crate::domain::user::UserProfile;

/// Transient request-token pair from the first OAuth leg.
///
/// Lives in the visitor's cookie session until the callback exchanges it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestToken {
    pub key: String,
    pub secret: String,
}

/// Where to send the user, plus the token pair to remember for the
/// callback.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub authorize_url: String,
    pub token: RequestToken,
}

/// The authenticated profile and its friends, fetched together at login.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub user: UserProfile,
    pub friends: Vec<UserProfile>,
}

/// Errors surfaced by gateway implementations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error talking to the API: {0}")]
    Network(String),

    #[error("the API rejected our credentials")]
    Denied,

    #[error("unexpected API payload: {0}")]
    UnexpectedPayload(String),
}

/// Port over the third-party OAuth + REST API.
#[async_trait]
pub trait SocialGateway: Send + Sync {
    /// First OAuth leg: obtain a request token and the authorization URL
    /// to redirect the user to.
    async fn request_authorization(&self) -> Result<AuthorizationRequest, GatewayError>;

    /// Final OAuth leg: exchange the request token plus the verifier the
    /// provider sent back for a long-lived access token.
    async fn exchange_verifier(
        &self,
        token: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken, GatewayError>;

    /// Fetch the authenticated profile and up to the configured number of
    /// friends (100 in the reference deployment).
    async fn fetch_account(&self, token: &AccessToken) -> Result<AccountSnapshot, GatewayError>;

    /// The authenticated user's merged home timeline (self + friends).
    async fn home_timeline(&self, token: &AccessToken) -> Result<Vec<Tweet>, GatewayError>;

    /// One specific user's timeline.
    async fn user_timeline(
        &self,
        token: &AccessToken,
        user: TwitterUserId,
    ) -> Result<Vec<Tweet>, GatewayError>;
}
