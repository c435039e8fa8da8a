//! HTTP adapters - the axum surface of the service.

pub mod session_state;
pub mod survey;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::application::survey::{
    BeginLoginHandler, CompleteLoginHandler, EndSessionHandler, OpenQuestionHandler,
    RecordSelectionsHandler,
};
use crate::config::ServerConfig;
use crate::ports::{SessionStore, SocialGateway};

/// Shared state wired into every handler.
#[derive(Clone)]
pub struct AppState {
    pub begin_login: Arc<BeginLoginHandler>,
    pub complete_login: Arc<CompleteLoginHandler>,
    pub open_question: Arc<OpenQuestionHandler>,
    pub record_selections: Arc<RecordSelectionsHandler>,
    pub end_session: Arc<EndSessionHandler>,
    pub store: Arc<dyn SessionStore>,
}

impl AppState {
    /// Wire the command handlers over one store and one gateway.
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<dyn SocialGateway>) -> Self {
        Self {
            begin_login: Arc::new(BeginLoginHandler::new(gateway.clone())),
            complete_login: Arc::new(CompleteLoginHandler::new(gateway.clone(), store.clone())),
            open_question: Arc::new(OpenQuestionHandler::new(store.clone(), gateway.clone())),
            record_selections: Arc::new(RecordSelectionsHandler::new(store.clone())),
            end_session: Arc::new(EndSessionHandler::new(store.clone())),
            store,
        }
    }
}

/// Assemble the full application router.
///
/// The cookie-session layer keeps its records in process memory; the
/// cookie only ever carries an opaque session id (and the transient
/// request token during login), so losing them on restart just means
/// logging in again.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let cookie_sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.is_production())
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_expiry_minutes as i64,
        )));

    survey::survey_routes()
        .with_state(state)
        .layer(cookie_sessions)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
}
