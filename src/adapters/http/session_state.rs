//! Cookie-session keys and helpers.
//!
//! The browser cookie session carries only two things: the transient
//! OAuth request-token pair while a login is in flight, and the id of the
//! server-side session record once authenticated. Everything else lives
//! behind the `SessionStore` port.
//!
//! Helpers swallow cookie-layer errors into `None`/no-op with a warning;
//! every caller treats an unreadable cookie session the same as an
//! unauthenticated visitor.

use tower_sessions::Session as CookieSession;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{RequestToken, SessionStore};

/// Key for the in-flight OAuth request-token pair (pre-auth only).
pub const REQUEST_TOKEN_KEY: &str = "request_token";

/// Key for the server-side session record id (post-auth).
pub const SESSION_ID_KEY: &str = "session_id";

/// Stash the request-token pair until the provider redirects back.
pub async fn remember_request_token(cookies: &CookieSession, token: &RequestToken) {
    if let Err(error) = cookies.insert(REQUEST_TOKEN_KEY, token).await {
        tracing::warn!(%error, "failed to stash request token in cookie session");
    }
}

/// Take the stashed request-token pair, removing it from the cookie
/// session.
pub async fn take_request_token(cookies: &CookieSession) -> Option<RequestToken> {
    match cookies.remove::<RequestToken>(REQUEST_TOKEN_KEY).await {
        Ok(token) => token,
        Err(error) => {
            tracing::warn!(%error, "failed to read request token from cookie session");
            None
        }
    }
}

/// Bind the cookie session to a server-side session record.
pub async fn remember_session_id(cookies: &CookieSession, id: &SessionId) {
    if let Err(error) = cookies.insert(SESSION_ID_KEY, id).await {
        tracing::warn!(%error, "failed to store session id in cookie session");
    }
}

/// Resolve the current survey session, if the visitor has one.
///
/// A cookie pointing at a session the store no longer has (logout in
/// another tab, server restart on the in-memory store) reads as
/// unauthenticated.
pub async fn current_session(
    cookies: &CookieSession,
    store: &dyn SessionStore,
) -> Option<Session> {
    let id: SessionId = match cookies.get(SESSION_ID_KEY).await {
        Ok(Some(id)) => id,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(%error, "failed to read session id from cookie session");
            return None;
        }
    };

    match store.find_session(&id).await {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!(%error, "failed to load session record");
            None
        }
    }
}

/// Drop everything the cookie session holds (logout/finish).
pub async fn clear(cookies: &CookieSession) {
    if let Err(error) = cookies.flush().await {
        tracing::warn!(%error, "failed to clear cookie session");
    }
}
