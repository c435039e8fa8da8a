//! OpenQuestionHandler - the question-progression state machine.
//!
//! Resolves a request for question `n` against stored progress, replaying
//! persisted timelines for questions already generated and fetching a
//! fresh timeline exactly once when advancing. The guarantee: each
//! question's displayed data is generated once and is stable across page
//! reloads and back-navigation.

use std::sync::Arc;

use rand::Rng;

use crate::domain::foundation::SessionId;
use crate::domain::progress::{navigate, Navigation};
use crate::domain::question::{self, TimelineSource};
use crate::domain::timeline::{SelectionSet, Tweet};
use crate::ports::{SessionStore, SocialGateway};

use super::SurveyError;

/// What the controller should render for a question request.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionPage {
    /// Index 0, non-question paths, or skipping ahead of an unstarted
    /// survey.
    RedirectHome,

    /// Skipped ahead mid-survey; go back to the current question.
    RedirectTo(u8),

    /// The survey is over (no more questions, or no usable source).
    Finished,

    /// A question with its timeline and any recorded selections.
    Question {
        number: u8,
        description: &'static str,
        timeline: Vec<Tweet>,
        selections: Option<SelectionSet>,
    },
}

/// Handler resolving question requests for one session.
pub struct OpenQuestionHandler {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn SocialGateway>,
}

impl OpenQuestionHandler {
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<dyn SocialGateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn handle<R: Rng + Send>(
        &self,
        session_id: &SessionId,
        requested: u8,
        rng: &mut R,
    ) -> Result<QuestionPage, SurveyError> {
        let mut session = self
            .store
            .find_session(session_id)
            .await?
            .ok_or(SurveyError::SessionExpired)?;

        match navigate(requested, session.progress()) {
            Navigation::RedirectHome => Ok(QuestionPage::RedirectHome),
            Navigation::RedirectToQuestion(current) => Ok(QuestionPage::RedirectTo(current)),
            Navigation::Replay(number) => {
                let timeline = self
                    .store
                    .load_timeline(session_id, number)
                    .await?
                    .ok_or(SurveyError::MissingTimeline { question: number })?;
                let selections = self.store.load_selections(session_id, number).await?;
                Ok(QuestionPage::Question {
                    number,
                    description: description_for(number),
                    timeline,
                    selections,
                })
            }
            Navigation::Advance(number) => {
                let friends = session.friends_by_followers_ascending();
                let source = question::select_source(number, &friends, rng);

                let Some(source) = source else {
                    return Ok(QuestionPage::Finished);
                };

                let fetched = match &source {
                    TimelineSource::Home => self.gateway.home_timeline(session.token()).await,
                    TimelineSource::Friend(friend) => {
                        self.gateway.user_timeline(session.token(), friend.id).await
                    }
                };

                let timeline = match fetched {
                    Ok(timeline) => timeline,
                    Err(error) => {
                        // Cannot advance without data; resolve to the
                        // finish transition rather than erroring the
                        // request.
                        tracing::warn!(
                            question = number,
                            %error,
                            "timeline fetch failed, finishing survey"
                        );
                        return Ok(QuestionPage::Finished);
                    }
                };

                self.store
                    .save_timeline(session_id, number, &timeline)
                    .await?;
                session.advance_to(number)?;
                self.store
                    .update_progress(session_id, session.progress())
                    .await?;

                tracing::debug!(question = number, tweets = timeline.len(), "advanced");

                Ok(QuestionPage::Question {
                    number,
                    description: description_for(number),
                    timeline,
                    selections: None,
                })
            }
        }
    }
}

fn description_for(number: u8) -> &'static str {
    question::question(number)
        .map(|question| question.description)
        .unwrap_or("")
}
