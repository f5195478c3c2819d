//! Error types for session construction.
//!
//! Gameplay itself never fails: rejected clicks are reported as values
//! (see `game::RejectReason`). Errors only arise while building a session
//! from configuration, a fixed board order, or a custom grid.

use thiserror::Error;

/// Invalid game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected {expected} faces, found {found}")]
    WrongFaceCount { expected: usize, found: usize },

    #[error("face {0:?} is listed more than once")]
    DuplicateFace(String),

    #[error("face at position {0} is empty")]
    EmptyFace(usize),

    #[error("{0} delay must be greater than zero")]
    ZeroDelay(&'static str),

    #[error("flash delay ({flash_ms} ms) must not outlast the clear delay ({clear_ms} ms)")]
    FlashOutlastsClear { flash_ms: u64, clear_ms: u64 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A fixed card order that breaks the pair invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} cards, found {found}")]
    WrongCardCount { expected: usize, found: usize },

    #[error("face {face} appears {count} times, expected exactly twice")]
    UnpairedFace { face: u8, count: usize },

    #[error("face id {0} is out of range")]
    FaceOutOfRange(u8),
}

/// A custom grid that does not place every card exactly once.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("card index {0} is out of range")]
    IndexOutOfRange(u8),

    #[error("card index {0} appears more than once")]
    DuplicateIndex(u8),

    #[error("card index {0} is missing from the grid")]
    MissingIndex(u8),
}
