//! Immutable profile snapshot of the external identity.

use serde::{Deserialize, Serialize};

use super::foundation::TwitterUserId;

/// Snapshot of a Twitter account, fetched once at login.
///
/// Friend counts matter to the survey: the question engine cannot build
/// single-friend timelines for an account with no friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Numeric account id.
    pub id: TwitterUserId,

    /// Display name.
    pub name: String,

    /// Handle without the leading `@`.
    pub screen_name: String,

    /// Avatar URL.
    pub profile_image_url: String,

    /// How many accounts follow this one.
    pub followers_count: u32,

    /// How many accounts this one follows.
    pub friends_count: u32,
}

impl UserProfile {
    /// Sorts a friend list ascending by follower count, the order the
    /// question-engine selection rules are defined over.
    ///
    /// The sort is stable so accounts with equal follower counts keep
    /// their fetch order.
    pub fn sort_by_followers_ascending(friends: &mut [UserProfile]) {
        friends.sort_by_key(|friend| friend.followers_count);
    }
}
