//! Click outcomes and delayed transitions.

use serde::{Deserialize, Serialize};

use crate::cards::CardIndex;

/// Delayed transition payloads carried by the session's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Two mismatched cards have been shown long enough; start flashing.
    RevealMismatch { first: CardIndex, second: CardIndex },
    /// End the mismatch flash.
    ClearIncorrect,
    /// Turn the mismatched cards back over.
    ClearSelection,
}

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The board is already solved.
    Complete,
    /// The session has been torn down.
    TornDown,
    /// Two cards are face up and waiting to turn back.
    Resolving,
    AlreadyMatched,
    AlreadySelected,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::Complete => "game complete",
            RejectReason::TornDown => "session torn down",
            RejectReason::Resolving => "two cards already face up",
            RejectReason::AlreadyMatched => "card already matched",
            RejectReason::AlreadySelected => "card already selected",
        };
        f.write_str(text)
    }
}

/// Result of dispatching one click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// First card of a pair turned face up.
    Selected(CardIndex),
    /// Second card matched the first.
    Matched { first: CardIndex, second: CardIndex },
    /// Second card matched and that was the last pair.
    Completed { first: CardIndex, second: CardIndex },
    /// Second card did not match; the pair turns back after the delays.
    Mismatched { first: CardIndex, second: CardIndex },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl ClickOutcome {
    /// Did the click change any state?
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ClickOutcome::Rejected(_))
    }
}
