//! Wire types for the Twitter v1.1 REST API.
//!
//! These decouple the JSON payloads from domain types; only the fields the
//! survey needs are deserialized.

use serde::Deserialize;

use crate::domain::foundation::{TweetId, TwitterUserId};
use crate::domain::timeline::Tweet;
use crate::domain::user::UserProfile;

/// A user object as returned by `verify_credentials` / `users/lookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub profile_image_url_https: String,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub friends_count: u32,
}

impl From<ApiUser> for UserProfile {
    fn from(user: ApiUser) -> Self {
        UserProfile {
            id: TwitterUserId::new(user.id),
            name: user.name,
            screen_name: user.screen_name,
            profile_image_url: user.profile_image_url_https,
            followers_count: user.followers_count,
            friends_count: user.friends_count,
        }
    }
}

/// A status object as returned by the timeline endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub id: u64,
    pub text: String,
    pub user: ApiUser,
}

impl From<ApiStatus> for Tweet {
    fn from(status: ApiStatus) -> Self {
        Tweet {
            id: TweetId::new(status.id),
            text: status.text,
            author_id: TwitterUserId::new(status.user.id),
            author_name: status.user.name,
            author_screen_name: status.user.screen_name,
        }
    }
}

/// Response of `friends/ids`.
#[derive(Debug, Clone, Deserialize)]
pub struct FriendIds {
    pub ids: Vec<u64>,
}

/// Parse a form-encoded OAuth token response
/// (`oauth_token=...&oauth_token_secret=...&...`).
pub fn parse_token_response(body: &str) -> Option<(String, String)> {
    let mut token = None;
    let mut secret = None;
    for pair in body.split('&') {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("oauth_token"), Some(value)) => token = Some(value.to_string()),
            (Some("oauth_token_secret"), Some(value)) => secret = Some(value.to_string()),
            _ => {}
        }
    }
    Some((token?, secret?))
}
