//! Question table and timeline-source selection rules.
//!
//! Each question is backed by one timeline source: the user's own home
//! timeline or a single friend's timeline. Which friend depends on the
//! question index and operates over the friend list sorted ascending by
//! follower count.
//!
//! The roulette weighting is deliberately positional: the friend at list
//! position `i` receives weight `len - i`, so earlier entries of the
//! ascending-sorted list (fewest followers) are favoured. This mirrors the
//! survey's reference weighting and must not be replaced with
//! follower-proportional weights.

use once_cell::sync::Lazy;
use rand::Rng;

use super::user::UserProfile;

/// Number of questions in the survey.
pub const QUESTION_COUNT: u8 = 6;

/// One survey question: an index plus the blurb shown above its timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub number: u8,
    pub description: &'static str,
}

const HOME_DESCRIPTION: &str = "This question contains Tweets from your 'home timeline'. \
     This is the timeline you'd see if you were logged into Twitter right now, \
     so it contains Tweets from several different users.";

const FRIEND_DESCRIPTION: &str =
    "This timeline contains Tweets from only one of your Twitter friends.";

static QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    (1..=QUESTION_COUNT)
        .map(|number| Question {
            number,
            description: if number == 1 {
                HOME_DESCRIPTION
            } else {
                FRIEND_DESCRIPTION
            },
        })
        .collect()
});

/// Look up a question by its 1-based index.
pub fn question(number: u8) -> Option<&'static Question> {
    if number == 0 {
        return None;
    }
    QUESTIONS.get(usize::from(number) - 1)
}

/// Where a question's timeline comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineSource {
    /// The authenticated user's combined home timeline (self + friends).
    Home,

    /// One specific friend's timeline.
    Friend(UserProfile),
}

/// Pick the timeline source for `number`, given the friend list sorted
/// ascending by follower count.
///
/// Returns `None` when the index is past the last question ("no more
/// questions") or when the friend list is too small to satisfy the rule;
/// callers treat `None` as the finish transition, not an error.
pub fn select_source<R: Rng>(
    number: u8,
    friends_ascending: &[UserProfile],
    rng: &mut R,
) -> Option<TimelineSource> {
    match number {
        1 => Some(TimelineSource::Home),
        // Highest follower count: last of the ascending list.
        2 => friends_ascending
            .last()
            .cloned()
            .map(TimelineSource::Friend),
        // Second-highest follower count.
        4 => friends_ascending
            .len()
            .checked_sub(2)
            .and_then(|i| friends_ascending.get(i))
            .cloned()
            .map(TimelineSource::Friend),
        3 | 5 | 6 => weighted_pick(friends_ascending, rng)
            .cloned()
            .map(TimelineSource::Friend),
        _ => None,
    }
}

/// Roulette-wheel pick over the friend list.
///
/// The friend at position `i` gets weight `len - i`; cumulative weights
/// partition `[0, total)` and a uniform draw selects the slice it lands in.
pub fn weighted_pick<'a, R: Rng>(
    friends: &'a [UserProfile],
    rng: &mut R,
) -> Option<&'a UserProfile> {
    if friends.is_empty() {
        return None;
    }

    let len = friends.len() as u64;
    let total = (len * (len + 1) / 2) as f64;
    let draw = rng.gen_range(0.0..total);

    let mut upto = 0.0;
    for (position, friend) in friends.iter().enumerate() {
        let weight = (friends.len() - position) as f64;
        if upto + weight > draw {
            return Some(friend);
        }
        upto += weight;
    }

    // Unreachable for draw < total; guard against float edge cases.
    friends.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TwitterUserId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn profile(id: u64, followers: u32) -> UserProfile {
        UserProfile {
            id: TwitterUserId::new(id),
            name: format!("user-{}", id),
            screen_name: format!("handle{}", id),
            profile_image_url: String::new(),
            followers_count: followers,
            friends_count: 5,
        }
    }

    fn ascending_friends() -> Vec<UserProfile> {
        vec![profile(1, 10), profile(2, 200), profile(3, 3_000)]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7714)
    }

    #[test]
    fn question_table_has_six_entries() {
        assert_eq!(QUESTION_COUNT, 6);
        assert!(question(1).is_some());
        assert!(question(6).is_some());
        assert!(question(0).is_none());
        assert!(question(7).is_none());
    }

    #[test]
    fn first_question_describes_the_home_timeline() {
        assert!(question(1).unwrap().description.contains("home timeline"));
        for number in 2..=QUESTION_COUNT {
            assert_eq!(question(number).unwrap().description, FRIEND_DESCRIPTION);
        }
    }

    #[test]
    fn question_one_uses_home_timeline() {
        let source = select_source(1, &ascending_friends(), &mut rng());
        assert_eq!(source, Some(TimelineSource::Home));
    }

    #[test]
    fn question_two_picks_most_followed_friend() {
        let friends = ascending_friends();
        for _ in 0..50 {
            match select_source(2, &friends, &mut rng()) {
                Some(TimelineSource::Friend(friend)) => {
                    assert_eq!(friend.id.as_u64(), 3);
                }
                other => panic!("unexpected source: {:?}", other),
            }
        }
    }

    #[test]
    fn question_four_picks_second_most_followed_friend() {
        let friends = ascending_friends();
        match select_source(4, &friends, &mut rng()) {
            Some(TimelineSource::Friend(friend)) => assert_eq!(friend.id.as_u64(), 2),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn questions_two_and_four_never_agree_with_distinct_friends() {
        let friends = ascending_friends();
        let second = select_source(2, &friends, &mut rng());
        let fourth = select_source(4, &friends, &mut rng());
        assert_ne!(second, fourth);
    }

    #[test]
    fn past_the_last_question_yields_no_source() {
        assert_eq!(select_source(7, &ascending_friends(), &mut rng()), None);
        assert_eq!(select_source(42, &ascending_friends(), &mut rng()), None);
    }

    #[test]
    fn friendless_accounts_cannot_build_friend_timelines() {
        let none: Vec<UserProfile> = Vec::new();
        assert_eq!(select_source(2, &none, &mut rng()), None);
        assert_eq!(select_source(3, &none, &mut rng()), None);

        // A single friend cannot have a "second highest".
        let one = vec![profile(1, 10)];
        assert_eq!(select_source(4, &one, &mut rng()), None);
        assert!(select_source(2, &one, &mut rng()).is_some());
    }

    #[test]
    fn weighted_pick_favours_the_front_of_the_list() {
        // Weights over 3 entries are 3, 2, 1 (total 6): expected
        // probabilities 1/2, 1/3, 1/6.
        let friends = ascending_friends();
        let mut rng = rng();
        let mut counts: HashMap<u64, u32> = HashMap::new();

        const DRAWS: u32 = 100_000;
        for _ in 0..DRAWS {
            let picked = weighted_pick(&friends, &mut rng).unwrap();
            *counts.entry(picked.id.as_u64()).or_default() += 1;
        }

        let share = |id: u64| f64::from(*counts.get(&id).unwrap()) / f64::from(DRAWS);
        assert!((share(1) - 0.5).abs() < 0.01, "front share {}", share(1));
        assert!((share(2) - 1.0 / 3.0).abs() < 0.01, "mid share {}", share(2));
        assert!((share(3) - 1.0 / 6.0).abs() < 0.01, "back share {}", share(3));
    }

    #[test]
    fn weighted_pick_over_single_entry_is_that_entry() {
        let one = vec![profile(9, 1)];
        let picked = weighted_pick(&one, &mut rng()).unwrap();
        assert_eq!(picked.id.as_u64(), 9);
    }

    #[test]
    fn weighted_pick_over_empty_list_is_none() {
        let none: Vec<UserProfile> = Vec::new();
        assert!(weighted_pick(&none, &mut rng()).is_none());
    }
}
