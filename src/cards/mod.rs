//! Cards: faces and the shuffled board.
//!
//! ## Key Types
//!
//! - `FaceId`: Which photo a card shows
//! - `FaceSet`: The host-supplied asset for every face
//! - `CardIndex`: A position on the board (0-23)
//! - `Board`: The shuffled face per position, fixed for the session

pub mod board;
pub mod face;

pub use board::{Board, CardIndex, BOARD_SIZE};
pub use face::{FaceId, FaceSet};
