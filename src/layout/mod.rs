//! Grid layout: where each card is drawn.

pub mod heart;

pub use heart::{Cell, GridPos, Layout, HEART_COLS, HEART_GRID, HEART_ROWS};
