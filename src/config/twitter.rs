//! Twitter API configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Twitter API configuration.
///
/// Carries the application's consumer credential pair and the OAuth
/// callback URL registered with the API.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    /// Application consumer key
    pub consumer_key: String,

    /// Application consumer secret
    pub consumer_secret: Secret<String>,

    /// OAuth callback URL registered for this application
    pub callback_url: String,

    /// Base URL of the REST API (overridable for tests)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// How many friends to fetch at login (API caps bulk lookup at 100)
    #[serde(default = "default_friend_limit")]
    pub friend_limit: u8,
}

impl TwitterConfig {
    /// Validate Twitter configuration.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.consumer_key.is_empty() {
            return Err(ValidationError::MissingRequired("TWITTER_CONSUMER_KEY"));
        }
        if self.callback_url.is_empty() {
            return Err(ValidationError::MissingRequired("TWITTER_CALLBACK_URL"));
        }
        if !self.callback_url.starts_with("http://") && !self.callback_url.starts_with("https://") {
            return Err(ValidationError::InvalidCallbackUrl);
        }
        if *environment == Environment::Production && !self.callback_url.starts_with("https://") {
            return Err(ValidationError::CallbackMustBeHttps);
        }
        if self.friend_limit == 0 || self.friend_limit > 100 {
            return Err(ValidationError::InvalidFriendLimit);
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_friend_limit() -> u8 {
    100
}
