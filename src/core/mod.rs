//! Core types: RNG, configuration, errors.
//!
//! Everything here is independent of the board shape and the
//! click state machine.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{default_faces, GameConfig, DEFAULT_DELAY_MS, FACE_COUNT};
pub use error::{BoardError, ConfigError, LayoutError};
pub use rng::GameRng;
