//! reqwest implementation of the social gateway.
//!
//! Drives the three-legged OAuth 1.0a flow and the handful of v1.1 REST
//! endpoints the survey needs. Every call is signed per `oauth`; failures
//! map to `GatewayError` and are logged by callers, never panicked on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;

use crate::config::TwitterConfig;
use crate::domain::foundation::TwitterUserId;
use crate::domain::session::AccessToken;
use crate::domain::timeline::Tweet;
use crate::domain::user::UserProfile;
use crate::ports::{
    AccountSnapshot, AuthorizationRequest, GatewayError, RequestToken, SocialGateway,
};

use super::oauth::{self, Credentials};
use super::wire::{parse_token_response, ApiStatus, ApiUser, FriendIds};

/// Twitter v1.1 implementation of `SocialGateway`.
pub struct TwitterGateway {
    http: reqwest::Client,
    config: TwitterConfig,
}

impl TwitterGateway {
    /// Create a gateway from configuration.
    pub fn new(config: TwitterConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    /// URL a visitor is redirected to with a fresh request token.
    fn authorize_url(api_base: &str, token_key: &str) -> String {
        format!(
            "{}/oauth/authorize?oauth_token={}",
            api_base.trim_end_matches('/'),
            oauth::percent_encode(token_key)
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn credentials<'a>(&'a self, token: Option<&'a AccessToken>) -> Credentials<'a> {
        Credentials {
            consumer_key: &self.config.consumer_key,
            consumer_secret: self.config.consumer_secret.expose_secret(),
            token: token.map(|t| t.key.as_str()),
            token_secret: token.map(|t| t.secret.as_str()),
        }
    }

    /// Signed GET returning a JSON payload.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: &AccessToken,
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path);
        let header = oauth::authorization_header(
            "GET",
            &url,
            params,
            &[],
            &self.credentials(Some(token)),
            &oauth::nonce(),
            oauth::unix_timestamp(),
        );

        let url = if params.is_empty() {
            url
        } else {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", oauth::percent_encode(k), oauth::percent_encode(v)))
                .collect();
            format!("{}?{}", url, query.join("&"))
        };

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = check_status(response)?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::UnexpectedPayload(e.to_string()))
    }

    /// Signed POST to one of the token endpoints; returns the raw
    /// form-encoded body.
    async fn post_token_leg(
        &self,
        path: &str,
        oauth_extras: &[(&str, &str)],
        token: Option<&RequestToken>,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint(path);
        let credentials = Credentials {
            consumer_key: &self.config.consumer_key,
            consumer_secret: self.config.consumer_secret.expose_secret(),
            token: token.map(|t| t.key.as_str()),
            token_secret: token.map(|t| t.secret.as_str()),
        };
        let header = oauth::authorization_header(
            "POST",
            &url,
            &[],
            oauth_extras,
            &credentials,
            &oauth::nonce(),
            oauth::unix_timestamp(),
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = check_status(response)?;
        response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Denied),
        status => Err(GatewayError::Network(format!(
            "API returned status {}",
            status
        ))),
    }
}

#[async_trait]
impl SocialGateway for TwitterGateway {
    async fn request_authorization(&self) -> Result<AuthorizationRequest, GatewayError> {
        let body = self
            .post_token_leg(
                "/oauth/request_token",
                &[("oauth_callback", &self.config.callback_url)],
                None,
            )
            .await?;

        let (key, secret) = parse_token_response(&body).ok_or_else(|| {
            GatewayError::UnexpectedPayload("request_token response missing token".into())
        })?;

        let authorize_url = Self::authorize_url(&self.config.api_base, &key);
        Ok(AuthorizationRequest {
            authorize_url,
            token: RequestToken { key, secret },
        })
    }

    async fn exchange_verifier(
        &self,
        token: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken, GatewayError> {
        let body = self
            .post_token_leg(
                "/oauth/access_token",
                &[("oauth_verifier", verifier)],
                Some(token),
            )
            .await?;

        let (key, secret) = parse_token_response(&body).ok_or_else(|| {
            GatewayError::UnexpectedPayload("access_token response missing token".into())
        })?;

        Ok(AccessToken::new(key, secret))
    }

    async fn fetch_account(&self, token: &AccessToken) -> Result<AccountSnapshot, GatewayError> {
        let user: ApiUser = self
            .get_json("/1.1/account/verify_credentials.json", &[], token)
            .await?;

        let limit = self.config.friend_limit.to_string();
        let friend_ids: FriendIds = self
            .get_json("/1.1/friends/ids.json", &[("count", limit.as_str())], token)
            .await?;

        let friends: Vec<UserProfile> = if friend_ids.ids.is_empty() {
            Vec::new()
        } else {
            let joined = friend_ids
                .ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let users: Vec<ApiUser> = self
                .get_json(
                    "/1.1/users/lookup.json",
                    &[("user_id", joined.as_str())],
                    token,
                )
                .await?;
            users.into_iter().map(UserProfile::from).collect()
        };

        Ok(AccountSnapshot {
            user: UserProfile::from(user),
            friends,
        })
    }

    async fn home_timeline(&self, token: &AccessToken) -> Result<Vec<Tweet>, GatewayError> {
        let statuses: Vec<ApiStatus> = self
            .get_json("/1.1/statuses/home_timeline.json", &[], token)
            .await?;
        Ok(statuses.into_iter().map(Tweet::from).collect())
    }

    async fn user_timeline(
        &self,
        token: &AccessToken,
        user: TwitterUserId,
    ) -> Result<Vec<Tweet>, GatewayError> {
        let id = user.to_string();
        let statuses: Vec<ApiStatus> = self
            .get_json(
                "/1.1/statuses/user_timeline.json",
                &[("user_id", id.as_str())],
                token,
            )
            .await?;
        Ok(statuses.into_iter().map(Tweet::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_embeds_the_token() {
        let url = TwitterGateway::authorize_url("https://api.twitter.com", "abc/123");
        assert_eq!(
            url,
            "https://api.twitter.com/oauth/authorize?oauth_token=abc%2F123"
        );
    }

    #[test]
    fn authorize_url_tolerates_trailing_slash() {
        let url = TwitterGateway::authorize_url("https://api.twitter.com/", "tok");
        assert_eq!(url, "https://api.twitter.com/oauth/authorize?oauth_token=tok");
    }
}
