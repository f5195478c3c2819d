//! Per-cell view-model for drawing the board.
//!
//! The host walks [`BoardView::cells`] in row-major order and draws each
//! cell: a spacer, a card back, or a card front (optionally flashing the
//! mismatch indicator). Flip and flash animations stay on the host side.

use serde::Serialize;

use crate::cards::CardIndex;
use crate::game::GameSession;
use crate::layout::{Cell, GridPos};

/// Which side of a card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardSide {
    Back,
    Front,
}

/// Everything needed to draw one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardView<'a> {
    pub index: CardIndex,
    pub pos: GridPos,
    pub asset: &'a str,
    pub side: CardSide,
    pub matched: bool,
    /// Draw the mismatch flash over the card.
    pub flashing: bool,
}

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellView<'a> {
    Empty(GridPos),
    Card(CardView<'a>),
}

impl<'a> CellView<'a> {
    #[must_use]
    pub fn card(&self) -> Option<&CardView<'a>> {
        match self {
            CellView::Card(card) => Some(card),
            CellView::Empty(_) => None,
        }
    }
}

/// Snapshot of the whole grid, ready to draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView<'a> {
    rows: usize,
    cols: usize,
    cells: Vec<CellView<'a>>,
}

impl<'a> BoardView<'a> {
    /// Build the view for the session's current state.
    #[must_use]
    pub fn new(session: &'a GameSession) -> Self {
        let layout = session.layout();
        let state = session.state();

        let cells = layout
            .cells()
            .iter()
            .enumerate()
            .map(|(offset, cell)| {
                let pos = GridPos {
                    row: offset / layout.cols(),
                    col: offset % layout.cols(),
                };
                match *cell {
                    Cell::Empty => CellView::Empty(pos),
                    Cell::Card(index) => CellView::Card(CardView {
                        index,
                        pos,
                        asset: session.asset_at(index),
                        side: if state.is_face_up(index) {
                            CardSide::Front
                        } else {
                            CardSide::Back
                        },
                        matched: state.is_matched(index),
                        flashing: state.is_incorrect(index),
                    }),
                }
            })
            .collect();

        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            cells,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellView<'a>] {
        &self.cells
    }

    /// Cells of one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[CellView<'a>] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Only the card cells.
    pub fn cards(&self) -> impl Iterator<Item = &CardView<'a>> + '_ {
        self.cells.iter().filter_map(CellView::card)
    }
}

/// Plain-text rendering of the board, one line per row.
///
/// - `    ` spacer
/// - `[  ]` card back
/// - `[07]` face 7 showing
/// - `(07)` face 7 matched
/// - `[!!]` flashing mismatch
#[must_use]
pub fn render_text(session: &GameSession) -> String {
    let view = BoardView::new(session);
    let board = session.board();

    (0..view.rows())
        .map(|row| {
            view.row(row)
                .iter()
                .map(|cell| match cell {
                    CellView::Empty(_) => "    ".to_string(),
                    CellView::Card(card) if card.flashing => "[!!]".to_string(),
                    CellView::Card(card) => {
                        let face = board.face_at(card.index).raw() + 1;
                        match (card.side, card.matched) {
                            (CardSide::Back, _) => "[  ]".to_string(),
                            (CardSide::Front, true) => format!("({face:02})"),
                            (CardSide::Front, false) => format!("[{face:02}]"),
                        }
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
