//! Tweet, timeline and selection value types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::foundation::{TweetId, TwitterUserId};

/// A single post shown inside a question's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet id as assigned by the external API.
    pub id: TweetId,

    /// Post body.
    pub text: String,

    /// Author account id.
    pub author_id: TwitterUserId,

    /// Author display name.
    pub author_name: String,

    /// Author handle without the leading `@`.
    pub author_screen_name: String,
}

/// Per-question boolean choices, keyed by tweet id.
///
/// Keys are unique; inserting the same tweet id twice keeps the later
/// value (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeMap<TweetId, bool>);

impl SelectionSet {
    /// Creates an empty selection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection set from (tweet id, selected) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (TweetId, bool)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Returns the recorded choice for a tweet, if any.
    pub fn get(&self, id: TweetId) -> Option<bool> {
        self.0.get(&id).copied()
    }

    /// Number of recorded choices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (tweet id, selected) entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TweetId, bool)> + '_ {
        self.0.iter().map(|(id, selected)| (*id, *selected))
    }
}
