//! Selection, matched and mismatch-flash sets.
//!
//! `GameState` is read by everyone but only mutated by the session; its
//! mutators are crate-private. The phase is derived from the sets rather
//! than stored, so it cannot drift out of sync with them.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardIndex, BOARD_SIZE};

/// Where the click state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No card face up apart from matched ones.
    Idle,
    /// One unmatched card face up.
    OneSelected,
    /// Two mismatched cards face up, waiting for the timers to turn them back.
    Resolving,
    /// Every card matched.
    Complete,
}

/// Per-card state of a session.
///
/// Cloning is cheap (`im` persistent set), so hosts can take a snapshot
/// after every event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    selected: SmallVec<[CardIndex; 2]>,
    matched: OrdSet<CardIndex>,
    incorrect: SmallVec<[CardIndex; 2]>,
}

impl GameState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.matched.len() == BOARD_SIZE {
            return Phase::Complete;
        }
        match self.selected.len() {
            0 => Phase::Idle,
            1 => Phase::OneSelected,
            _ => Phase::Resolving,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched.len() == BOARD_SIZE
    }

    /// Face-up, unmatched cards in click order.
    #[must_use]
    pub fn selected(&self) -> &[CardIndex] {
        &self.selected
    }

    #[must_use]
    pub fn matched(&self) -> &OrdSet<CardIndex> {
        &self.matched
    }

    /// Cards currently flashing the mismatch indicator.
    #[must_use]
    pub fn incorrect(&self) -> &[CardIndex] {
        &self.incorrect
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn is_selected(&self, index: CardIndex) -> bool {
        self.selected.contains(&index)
    }

    #[must_use]
    pub fn is_matched(&self, index: CardIndex) -> bool {
        self.matched.contains(&index)
    }

    #[must_use]
    pub fn is_incorrect(&self, index: CardIndex) -> bool {
        self.incorrect.contains(&index)
    }

    /// Is the card's front showing?
    #[must_use]
    pub fn is_face_up(&self, index: CardIndex) -> bool {
        self.is_selected(index) || self.is_matched(index)
    }

    // === Mutation (session only) ===

    pub(crate) fn select(&mut self, index: CardIndex) {
        debug_assert!(self.selected.len() < 2);
        debug_assert!(!self.is_matched(index) && !self.is_selected(index));
        self.selected.push(index);
    }

    /// Move a pair into the matched set and clear the selection.
    pub(crate) fn match_pair(&mut self, first: CardIndex, second: CardIndex) {
        self.matched.insert(first);
        self.matched.insert(second);
        self.selected.clear();
        self.incorrect.retain(|i| !self.matched.contains(&*i));
    }

    /// Flash the two selected cards. Matched cards are never flagged.
    pub(crate) fn set_incorrect(&mut self, first: CardIndex, second: CardIndex) {
        self.incorrect.clear();
        for index in [first, second] {
            if !self.matched.contains(&index) {
                self.incorrect.push(index);
            }
        }
    }

    pub(crate) fn clear_incorrect(&mut self) {
        self.incorrect.clear();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
