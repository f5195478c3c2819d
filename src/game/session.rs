//! The game session: board, layout, click state machine and timers.
//!
//! A session is created once when the game is mounted and owns everything
//! the game needs. The host drives it with two calls:
//!
//! 1. [`GameSession::click`] for every click on a non-empty cell.
//! 2. [`GameSession::advance`] as wall-clock time passes.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use photo_pair::game::{GameSession, Phase};
//!
//! let shown = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&shown);
//! let mut session = GameSession::builder()
//!     .seed(42)
//!     .on_complete(move || flag.set(true))
//!     .build()
//!     .unwrap();
//!
//! for (a, b) in session.board().pairs() {
//!     session.click(a);
//!     session.click(b);
//! }
//!
//! assert_eq!(session.phase(), Phase::Complete);
//! assert!(shown.get());
//! ```

use std::time::Duration;

use tracing::{debug, info, trace};

use super::event::{ClickOutcome, RejectReason, TimerEvent};
use super::state::{GameState, Phase};
use crate::cards::{Board, CardIndex, FaceSet};
use crate::core::config::GameConfig;
use crate::core::error::ConfigError;
use crate::core::rng::GameRng;
use crate::layout::Layout;
use crate::timers::{Timer, TimerQueue};

/// Zero-argument "show proposal" collaborator, called once on completion.
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Builder for creating a [`GameSession`].
#[derive(Default)]
pub struct GameSessionBuilder {
    config: GameConfig,
    board: Option<Board>,
    on_complete: Option<CompletionCallback>,
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Face assets supplied by the host.
    pub fn faces<I, S>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_faces(faces);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    pub fn reveal_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_reveal_delay(delay);
        self
    }

    pub fn flash_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_flash_delay(delay);
        self
    }

    pub fn clear_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_clear_delay(delay);
        self
    }

    /// Use a fixed board instead of shuffling.
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Collaborator invoked once when every pair is matched.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Validate the configuration, shuffle the board and lay it out.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        self.config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let board = match self.board {
            Some(board) => board,
            None => Board::shuffled(&mut rng),
        };

        let session = GameSession {
            reveal_delay: self.config.reveal_delay(),
            flash_delay: self.config.flash_delay(),
            clear_delay: self.config.clear_delay(),
            faces: FaceSet::new(self.config.faces)?,
            board,
            layout: Layout::heart(),
            state: GameState::new(),
            timers: TimerQueue::new(),
            seed: rng.seed(),
            on_complete: self.on_complete,
            torn_down: false,
        };

        info!(seed = session.seed, "game session started");
        Ok(session)
    }
}

/// One play-through of the board.
pub struct GameSession {
    faces: FaceSet,
    board: Board,
    layout: Layout,
    state: GameState,
    timers: TimerQueue<TimerEvent>,
    reveal_delay: Duration,
    flash_delay: Duration,
    clear_delay: Duration,
    seed: u64,
    on_complete: Option<CompletionCallback>,
    torn_down: bool,
}

impl GameSession {
    /// Start building a session.
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    /// Build a session from a configuration and a completion collaborator.
    pub fn new(config: GameConfig, on_complete: impl FnOnce() + 'static) -> Result<Self, ConfigError> {
        GameSessionBuilder::from_config(config)
            .on_complete(on_complete)
            .build()
    }

    // === Events ===

    /// Handle a click on the card at `index`.
    pub fn click(&mut self, index: CardIndex) -> ClickOutcome {
        if let Some(reason) = self.reject_reason(index) {
            trace!(card = %index, %reason, "click rejected");
            return ClickOutcome::Rejected(reason);
        }

        let Some(&first) = self.state.selected().first() else {
            self.state.select(index);
            debug!(card = %index, "card selected");
            return ClickOutcome::Selected(index);
        };

        if self.board.is_pair(first, index) {
            self.state.match_pair(first, index);
            debug!(first = %first, second = %index, matched = self.state.matched_count(), "pair matched");

            if self.state.is_complete() {
                self.complete();
                return ClickOutcome::Completed { first, second: index };
            }
            return ClickOutcome::Matched { first, second: index };
        }

        self.state.select(index);
        let timer = self.timers.schedule(
            self.reveal_delay,
            TimerEvent::RevealMismatch { first, second: index },
        );
        debug!(first = %first, second = %index, %timer, "mismatch, reveal scheduled");
        ClickOutcome::Mismatched { first, second: index }
    }

    /// Advance the clock by `elapsed`, firing every timer that falls due.
    ///
    /// Timers scheduled by a firing timer are measured from its deadline
    /// and fire in the same call if they also fall within the window.
    /// The clock saturates at `Duration::MAX`. Returns the number of
    /// timers fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.torn_down {
            return 0;
        }

        let target = self.timers.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(target) {
            self.fire(timer);
            fired += 1;
        }
        self.timers.advance_to(target);
        fired
    }

    /// Cancel every pending timer and stop accepting events.
    ///
    /// Returns the number of timers cancelled. Also runs on drop.
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        let cancelled = self.timers.cancel_all();
        debug!(cancelled, "game session torn down");
        cancelled
    }

    fn reject_reason(&self, index: CardIndex) -> Option<RejectReason> {
        if self.torn_down {
            Some(RejectReason::TornDown)
        } else if self.state.is_complete() {
            Some(RejectReason::Complete)
        } else if self.state.selected().len() == 2 {
            Some(RejectReason::Resolving)
        } else if self.state.is_matched(index) {
            Some(RejectReason::AlreadyMatched)
        } else if self.state.is_selected(index) {
            Some(RejectReason::AlreadySelected)
        } else {
            None
        }
    }

    fn fire(&mut self, timer: Timer<TimerEvent>) {
        trace!(timer = %timer.id, at = ?timer.deadline, event = ?timer.payload, "timer fired");

        match timer.payload {
            TimerEvent::RevealMismatch { first, second } => {
                self.state.set_incorrect(first, second);
                // Two independent timers, one per set.
                self.timers.schedule(self.flash_delay, TimerEvent::ClearIncorrect);
                self.timers.schedule(self.clear_delay, TimerEvent::ClearSelection);
            }
            TimerEvent::ClearIncorrect => self.state.clear_incorrect(),
            TimerEvent::ClearSelection => self.state.clear_selection(),
        }
    }

    fn complete(&mut self) {
        let cancelled = self.timers.cancel_all();
        info!(cancelled, "all pairs matched");

        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current per-card state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cheap copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The cached heart layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    /// Asset shown on the card at `index`.
    #[must_use]
    pub fn asset_at(&self, index: CardIndex) -> &str {
        self.faces.asset(self.board.face_at(index))
    }

    /// Assets to preload, each once, in board order.
    #[must_use]
    pub fn preload_assets(&self) -> Vec<&str> {
        self.board
            .preload_order()
            .into_iter()
            .map(|face| self.faces.asset(face))
            .collect()
    }

    /// Seed the board was shuffled with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Time left until the next timer fires, if any is pending.
    #[must_use]
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.timers.now()))
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("seed", &self.seed)
            .field("phase", &self.phase())
            .field("state", &self.state)
            .field("pending_timers", &self.timers.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
