//! Survey command handlers.
//!
//! One handler per operation, each owning just the ports it needs:
//!
//! - `BeginLoginHandler` / `CompleteLoginHandler` - the OAuth legs
//! - `OpenQuestionHandler` - the question-progression state machine
//! - `RecordSelectionsHandler` - persisting per-tweet choices
//! - `EndSessionHandler` - logout/finish teardown

mod end_session;
mod error;
mod login;
mod open_question;
mod record_selections;

#[cfg(test)]
pub(crate) mod testing;

pub use end_session::EndSessionHandler;
pub use error::SurveyError;
pub use login::{BeginLoginHandler, CompleteLoginHandler};
pub use open_question::{OpenQuestionHandler, QuestionPage};
pub use record_selections::{RecordSelectionsCommand, RecordSelectionsHandler};
