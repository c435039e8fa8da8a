//! HTTP DTOs for the survey endpoints.
//!
//! These types decouple the HTTP surface from domain types. The update
//! endpoint keeps the reference wire shape: two comma-separated positional
//! form fields and a `{"error": 0|1}` JSON envelope.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TweetId;
use crate::domain::timeline::{SelectionSet, Tweet};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Form body of `POST /api/update-question/{n}`.
///
/// `tweet_ids` and `selected` are parallel comma-separated lists; they are
/// zipped into explicit pairs by [`UpdateQuestionForm::into_pairs`], which
/// rejects mismatched lengths instead of guessing.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuestionForm {
    #[serde(default)]
    pub tweet_ids: String,
    #[serde(default)]
    pub selected: String,
}

impl UpdateQuestionForm {
    /// Zip the two positional lists into (tweet id, selected) pairs.
    ///
    /// Flags must be literal `0`/`1`; anything else, or a length
    /// mismatch, is rejected.
    pub fn into_pairs(self) -> Result<Vec<(TweetId, bool)>, &'static str> {
        let ids: Vec<&str> = self.tweet_ids.split(',').map(str::trim).collect();
        let flags: Vec<&str> = self.selected.split(',').map(str::trim).collect();

        if ids.len() != flags.len() {
            return Err("Invalid selection");
        }

        let mut pairs = Vec::with_capacity(ids.len());
        for (id, flag) in ids.iter().zip(flags.iter()) {
            let id: TweetId = id.parse().map_err(|_| "Invalid selection")?;
            let selected = match *flag {
                "0" => false,
                "1" => true,
                _ => return Err("Invalid selection"),
            };
            pairs.push((id, selected));
        }
        Ok(pairs)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// View served at `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_url: Option<String>,
}

impl HomeView {
    pub fn authenticated(screen_name: impl Into<String>, question: u8) -> Self {
        Self {
            authenticated: true,
            screen_name: Some(screen_name.into()),
            question: Some(question),
            authorize_url: None,
        }
    }

    pub fn anonymous(authorize_url: Option<String>) -> Self {
        Self {
            authenticated: false,
            screen_name: None,
            question: None,
            authorize_url,
        }
    }
}

/// One tweet as rendered inside a question view.
///
/// Ids are serialized as strings; 64-bit tweet ids overflow the integers
/// browser-side JSON parsers can represent.
#[derive(Debug, Clone, Serialize)]
pub struct TweetView {
    pub id: String,
    pub text: String,
    pub author_name: String,
    pub author_screen_name: String,
}

impl From<Tweet> for TweetView {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id.to_string(),
            text: tweet.text,
            author_name: tweet.author_name,
            author_screen_name: tweet.author_screen_name,
        }
    }
}

/// View served at `GET /question/{n}`.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question: u8,
    pub description: String,
    pub tweets: Vec<TweetView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selections: Option<SelectionSet>,
}

/// View served at `GET /finish`.
#[derive(Debug, Clone, Serialize)]
pub struct FinishView {
    pub message: String,
}

impl FinishView {
    pub fn thanks() -> Self {
        Self {
            message: "Thank you for taking part in the survey.".to_string(),
        }
    }
}

/// View served at `GET /cookies`.
#[derive(Debug, Clone, Serialize)]
pub struct CookiesView {
    pub info: String,
}

impl CookiesView {
    pub fn page() -> Self {
        Self {
            info: "This site sets a single session cookie to keep track of your \
                   survey progress while you are logged in. It is removed when \
                   you log out or finish the survey."
                .to_string(),
        }
    }
}

/// JSON envelope of `POST /api/update-question/{n}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub error: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            error: 0,
            info: None,
        }
    }

    pub fn failure(info: impl Into<String>) -> Self {
        Self {
            error: 1,
            info: Some(info.into()),
        }
    }
}
