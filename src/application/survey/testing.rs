//! Shared fixtures for handler tests: a scripted gateway and profile/tweet
//! builders.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{TweetId, TwitterUserId};
use crate::domain::session::AccessToken;
use crate::domain::timeline::Tweet;
use crate::domain::user::UserProfile;
use crate::ports::{
    AccountSnapshot, AuthorizationRequest, GatewayError, RequestToken, SocialGateway,
};

pub(crate) fn profile(id: u64, screen_name: &str, followers: u32) -> UserProfile {
    UserProfile {
        id: TwitterUserId::new(id),
        name: format!("User {}", screen_name),
        screen_name: screen_name.to_string(),
        profile_image_url: format!("https://img.example/{}.png", screen_name),
        followers_count: followers,
        friends_count: 3,
    }
}

pub(crate) fn tweet(id: u64, author: &UserProfile) -> Tweet {
    Tweet {
        id: TweetId::new(id),
        text: format!("tweet {}", id),
        author_id: author.id,
        author_name: author.name.clone(),
        author_screen_name: author.screen_name.clone(),
    }
}

/// Gateway with canned responses; counts timeline fetches so tests can
/// assert that replays never hit the network.
pub(crate) struct ScriptedGateway {
    pub fail_all: bool,
    pub fail_timelines: bool,
    pub timeline_fetches: AtomicU32,
}

impl ScriptedGateway {
    pub(crate) fn me(&self) -> UserProfile {
        profile(100, "me", 50)
    }

    pub(crate) fn friends(&self) -> Vec<UserProfile> {
        vec![
            profile(1, "low", 10),
            profile(2, "mid", 200),
            profile(3, "high", 3_000),
        ]
    }

    pub(crate) fn fetch_count(&self) -> u32 {
        self.timeline_fetches.load(Ordering::SeqCst)
    }
}

pub(crate) fn scripted_gateway() -> Arc<ScriptedGateway> {
    Arc::new(ScriptedGateway {
        fail_all: false,
        fail_timelines: false,
        timeline_fetches: AtomicU32::new(0),
    })
}

pub(crate) fn failing_gateway() -> Arc<ScriptedGateway> {
    Arc::new(ScriptedGateway {
        fail_all: true,
        fail_timelines: true,
        timeline_fetches: AtomicU32::new(0),
    })
}

pub(crate) fn flaky_timeline_gateway() -> Arc<ScriptedGateway> {
    Arc::new(ScriptedGateway {
        fail_all: false,
        fail_timelines: true,
        timeline_fetches: AtomicU32::new(0),
    })
}

#[async_trait]
impl SocialGateway for ScriptedGateway {
    async fn request_authorization(&self) -> Result<AuthorizationRequest, GatewayError> {
        if self.fail_all {
            return Err(GatewayError::Network("scripted failure".into()));
        }
        Ok(AuthorizationRequest {
            authorize_url: "https://api.example/oauth/authorize?oauth_token=req-key".to_string(),
            token: RequestToken {
                key: "req-key".to_string(),
                secret: "req-secret".to_string(),
            },
        })
    }

    async fn exchange_verifier(
        &self,
        _token: &RequestToken,
        _verifier: &str,
    ) -> Result<AccessToken, GatewayError> {
        if self.fail_all {
            return Err(GatewayError::Denied);
        }
        Ok(AccessToken::new("acc-key", "acc-secret"))
    }

    async fn fetch_account(&self, _token: &AccessToken) -> Result<AccountSnapshot, GatewayError> {
        if self.fail_all {
            return Err(GatewayError::Network("scripted failure".into()));
        }
        Ok(AccountSnapshot {
            user: self.me(),
            friends: self.friends(),
        })
    }

    async fn home_timeline(&self, _token: &AccessToken) -> Result<Vec<Tweet>, GatewayError> {
        self.timeline_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.fail_timelines {
            return Err(GatewayError::Network("scripted failure".into()));
        }
        let me = self.me();
        Ok(vec![tweet(1000, &me), tweet(1001, &me), tweet(1002, &me)])
    }

    async fn user_timeline(
        &self,
        _token: &AccessToken,
        user: TwitterUserId,
    ) -> Result<Vec<Tweet>, GatewayError> {
        self.timeline_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.fail_timelines {
            return Err(GatewayError::Network("scripted failure".into()));
        }
        let author = self
            .friends()
            .into_iter()
            .find(|friend| friend.id == user)
            .unwrap_or_else(|| profile(user.as_u64(), "unknown", 0));
        Ok(vec![
            tweet(user.as_u64() * 10, &author),
            tweet(user.as_u64() * 10 + 1, &author),
        ])
    }
}
