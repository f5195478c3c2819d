//! The click state machine.
//!
//! ## Key Types
//!
//! - `GameSession`: Owns the board, layout, state and timers; the only mutator
//! - `GameState`: Selected, matched and incorrect sets, plus the derived `Phase`
//! - `ClickOutcome`: What a click did, or why it was ignored
//! - `TimerEvent`: Delayed transitions of the mismatch sequence

pub mod event;
pub mod session;
pub mod state;

pub use event::{ClickOutcome, RejectReason, TimerEvent};
pub use session::{CompletionCallback, GameSession, GameSessionBuilder};
pub use state::{GameState, Phase};
