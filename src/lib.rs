//! # photo-pair
//!
//! Core of a heart-shaped photo pair matching game: 12 photos, each on two
//! cards, 24 cards laid out as a heart. Matching every pair hands control to
//! the host's "show proposal" collaborator.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: No threads, no sleeping. The host dispatches clicks
//!    and advances a virtual clock; delayed transitions are cancellable timers.
//!
//! 2. **Single Mutator**: Only `GameSession` mutates game state. Rejected
//!    clicks are values, never errors.
//!
//! 3. **Fixed Shape**: One board size and one heart layout. Faces and delays
//!    are the only configuration.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Faces, card indices and the shuffled board
//! - `layout`: The heart grid
//! - `timers`: Host-driven cancellable timer queue
//! - `game`: Click state machine and session
//! - `render`: Per-cell view-model and text rendering

pub mod core;
pub mod cards;
pub mod layout;
pub mod timers;
pub mod game;
pub mod render;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng,
    ConfigError, BoardError, LayoutError,
    FACE_COUNT,
};

pub use crate::cards::{Board, CardIndex, FaceId, FaceSet, BOARD_SIZE};

pub use crate::layout::{Cell, GridPos, Layout};

pub use crate::timers::{Timer, TimerId, TimerQueue};

pub use crate::game::{
    ClickOutcome, RejectReason, TimerEvent,
    GameSession, GameSessionBuilder, GameState, Phase,
};

pub use crate::render::{render_text, BoardView, CardSide, CardView, CellView};
