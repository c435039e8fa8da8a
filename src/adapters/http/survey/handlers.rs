//! HTTP handlers for the survey endpoints.
//!
//! Every failure path resolves to a redirect or the JSON error envelope;
//! nothing here surfaces a raw 5xx to the visitor.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_sessions::Session as CookieSession;

use crate::adapters::http::session_state;
use crate::adapters::http::AppState;
use crate::application::survey::{QuestionPage, RecordSelectionsCommand, SurveyError};

use super::dto::{
    ApiResponse, CookiesView, FinishView, HomeView, QuestionView, TweetView, UpdateQuestionForm,
};

/// Query parameters of the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub oauth_verifier: Option<String>,
}

/// GET / - home page.
///
/// Authenticated visitors see their handle and current question number;
/// everyone else gets an authorization URL (when the gateway cooperates).
pub async fn home(State(state): State<AppState>, cookies: CookieSession) -> Response {
    if let Some(session) = session_state::current_session(&cookies, state.store.as_ref()).await {
        let view = HomeView::authenticated(session.user().screen_name.clone(), session.progress());
        return Json(view).into_response();
    }

    match state.begin_login.handle().await {
        Ok(auth) => {
            session_state::remember_request_token(&cookies, &auth.token).await;
            Json(HomeView::anonymous(Some(auth.authorize_url))).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "could not obtain authorization URL");
            Json(HomeView::anonymous(None)).into_response()
        }
    }
}

/// GET /callback - OAuth return.
///
/// Missing verifier or missing stashed request token sends the visitor
/// home unauthenticated, as does any gateway failure.
pub async fn callback(
    State(state): State<AppState>,
    cookies: CookieSession,
    Query(params): Query<CallbackParams>,
) -> Response {
    let verifier = match params.oauth_verifier.as_deref() {
        Some(verifier) if !verifier.is_empty() => verifier.to_string(),
        _ => return Redirect::to("/").into_response(),
    };

    let Some(request_token) = session_state::take_request_token(&cookies).await else {
        return Redirect::to("/").into_response();
    };

    match state.complete_login.handle(request_token, &verifier).await {
        Ok(session_id) => {
            session_state::remember_session_id(&cookies, &session_id).await;
            Redirect::to("/").into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "login could not be completed");
            Redirect::to("/").into_response()
        }
    }
}

/// GET /question/{n} - the state-machine entry point.
pub async fn question(
    State(state): State<AppState>,
    cookies: CookieSession,
    Path(requested): Path<String>,
) -> Response {
    let Some(session) = session_state::current_session(&cookies, state.store.as_ref()).await
    else {
        return Redirect::to("/").into_response();
    };

    // Non-numeric indices go home rather than erroring the request.
    let Ok(requested) = requested.parse::<u8>() else {
        return Redirect::to("/").into_response();
    };

    let mut rng = StdRng::from_entropy();
    match state
        .open_question
        .handle(session.id(), requested, &mut rng)
        .await
    {
        Ok(QuestionPage::RedirectHome) => Redirect::to("/").into_response(),
        Ok(QuestionPage::RedirectTo(current)) => {
            Redirect::to(&format!("/question/{}", current)).into_response()
        }
        Ok(QuestionPage::Finished) => Redirect::to("/finish").into_response(),
        Ok(QuestionPage::Question {
            number,
            description,
            timeline,
            selections,
        }) => {
            let view = QuestionView {
                question: number,
                description: description.to_string(),
                tweets: timeline.into_iter().map(TweetView::from).collect(),
                selections,
            };
            Json(view).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, question = requested, "question request failed");
            Redirect::to("/").into_response()
        }
    }
}

/// POST /api/update-question/{n} - record selections.
///
/// Asynchronous API surface: always answers with the JSON envelope.
pub async fn update_question(
    State(state): State<AppState>,
    cookies: CookieSession,
    Path(requested): Path<String>,
    Form(form): Form<UpdateQuestionForm>,
) -> Json<ApiResponse> {
    let Some(session) = session_state::current_session(&cookies, state.store.as_ref()).await
    else {
        return Json(ApiResponse::failure("Authorisation error"));
    };

    let Ok(question) = requested.parse::<u8>() else {
        return Json(ApiResponse::failure("Invalid question"));
    };

    let selections = match form.into_pairs() {
        Ok(pairs) => pairs,
        Err(reason) => return Json(ApiResponse::failure(reason)),
    };

    let cmd = RecordSelectionsCommand {
        session_id: *session.id(),
        question,
        selections,
    };

    match state.record_selections.handle(cmd).await {
        Ok(()) => Json(ApiResponse::ok()),
        Err(SurveyError::QuestionNotReached { .. }) => {
            Json(ApiResponse::failure("Invalid question"))
        }
        Err(SurveyError::SessionExpired) => Json(ApiResponse::failure("Authorisation error")),
        Err(error) => {
            tracing::error!(%error, question, "failed to store selections");
            Json(ApiResponse::failure("Error storing details"))
        }
    }
}

/// GET /finish - terminal page; tears the session down.
pub async fn finish(State(state): State<AppState>, cookies: CookieSession) -> Response {
    if let Some(session) = session_state::current_session(&cookies, state.store.as_ref()).await {
        if let Err(error) = state.end_session.handle(session.id()).await {
            tracing::warn!(%error, "failed to delete session record");
        }
    }
    session_state::clear(&cookies).await;
    Json(FinishView::thanks()).into_response()
}

/// GET /logout - same teardown as finish, back to the home page.
pub async fn logout(State(state): State<AppState>, cookies: CookieSession) -> Response {
    if let Some(session) = session_state::current_session(&cookies, state.store.as_ref()).await {
        if let Err(error) = state.end_session.handle(session.id()).await {
            tracing::warn!(%error, "failed to delete session record");
        }
    }
    session_state::clear(&cookies).await;
    Redirect::to("/").into_response()
}

/// GET /cookies - static informational page.
pub async fn cookies_page() -> Json<CookiesView> {
    Json(CookiesView::page())
}
