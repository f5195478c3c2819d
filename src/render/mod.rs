//! Presentation: what to draw in each grid cell.

pub mod view;

pub use view::{render_text, BoardView, CardSide, CardView, CellView};
