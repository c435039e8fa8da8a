//! Login handlers - the two OAuth legs the service drives.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{
    AuthorizationRequest, GatewayError, RequestToken, SessionStore, SocialGateway,
};

use super::SurveyError;

/// First leg: obtain a request token and the URL to send the visitor to.
///
/// The returned token pair must be remembered (cookie session) until the
/// provider redirects back to the callback.
pub struct BeginLoginHandler {
    gateway: Arc<dyn SocialGateway>,
}

impl BeginLoginHandler {
    pub fn new(gateway: Arc<dyn SocialGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self) -> Result<AuthorizationRequest, GatewayError> {
        self.gateway.request_authorization().await
    }
}

/// Final leg: exchange the verifier, snapshot the account, create the
/// server-side session.
pub struct CompleteLoginHandler {
    gateway: Arc<dyn SocialGateway>,
    store: Arc<dyn SessionStore>,
}

impl CompleteLoginHandler {
    pub fn new(gateway: Arc<dyn SocialGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Runs the exchange and persists a fresh session at progress 0.
    pub async fn handle(
        &self,
        request_token: RequestToken,
        verifier: &str,
    ) -> Result<SessionId, SurveyError> {
        let access_token = self
            .gateway
            .exchange_verifier(&request_token, verifier)
            .await?;
        let account = self.gateway.fetch_account(&access_token).await?;

        tracing::info!(
            screen_name = %account.user.screen_name,
            friends = account.friends.len(),
            "authenticated new survey participant"
        );

        let session = Session::new(
            SessionId::new(),
            account.user,
            account.friends,
            access_token,
        );
        let id = *session.id();
        self.store.create_session(&session).await?;

        Ok(id)
    }
}
