//! Question-navigation state machine.
//!
//! Pure decision table for what a request for question `requested` means
//! given the session's current progress. The controller executes the
//! resulting action; this module never touches storage or the network.

/// Outcome of asking for a question index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Index 0 or far ahead of an unstarted survey; go back to the start.
    RedirectHome,

    /// Tried to skip ahead; return to the current question.
    RedirectToQuestion(u8),

    /// Question was already generated; serve the stored timeline as-is.
    Replay(u8),

    /// The next question in sequence; generate a fresh timeline.
    Advance(u8),
}

/// Resolve a request for question `requested` against stored `current`
/// progress.
///
/// Exactly one of the four outcomes applies:
///
/// - `requested == 0` never names a question
/// - more than one step ahead is rejected, backwards to safety
/// - anything at or below current progress replays stored state
/// - `current + 1` advances
pub fn navigate(requested: u8, current: u8) -> Navigation {
    if requested == 0 {
        return Navigation::RedirectHome;
    }
    if requested > current.saturating_add(1) {
        if current == 0 {
            return Navigation::RedirectHome;
        }
        return Navigation::RedirectToQuestion(current);
    }
    if requested <= current {
        return Navigation::Replay(requested);
    }
    Navigation::Advance(requested)
}
