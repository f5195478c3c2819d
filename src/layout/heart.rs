//! Heart-shaped grid placement.
//!
//! The layout only decides where each card is drawn. It never affects
//! which cards pair up.

use serde::{Deserialize, Serialize};

use crate::cards::{CardIndex, BOARD_SIZE};
use crate::core::error::LayoutError;

/// Rows in the heart grid.
pub const HEART_ROWS: usize = 5;

/// Columns in the heart grid.
pub const HEART_COLS: usize = 7;

/// The heart silhouette. `None` cells stay empty.
pub const HEART_GRID: [[Option<u8>; HEART_COLS]; HEART_ROWS] = [
    [None, Some(0), Some(1), None, Some(2), Some(3), None],
    [Some(4), Some(5), Some(6), Some(7), Some(8), Some(9), Some(10)],
    [None, Some(11), Some(12), Some(13), Some(14), Some(15), None],
    [None, Some(16), Some(17), Some(18), Some(19), Some(20), None],
    [None, None, Some(21), Some(22), Some(23), None, None],
];

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Spacer, not clickable.
    Empty,
    /// Holds the card at this board position.
    Card(CardIndex),
}

impl Cell {
    /// The card in this cell, if any.
    #[must_use]
    pub fn card(self) -> Option<CardIndex> {
        match self {
            Cell::Card(index) => Some(index),
            Cell::Empty => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Row and column of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

/// A grid flattened to row-major order.
///
/// Flattening happens once in the constructor; sessions keep the result
/// for their whole lifetime. Only [`Layout::heart`] and [`Layout::from_grid`]
/// construct one, so every layout places each card exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    /// Flattened cell offset for each card index.
    positions: Vec<usize>,
}

impl Layout {
    /// The fixed heart layout.
    #[must_use]
    pub fn heart() -> Self {
        let rows: Vec<Vec<Option<u8>>> = HEART_GRID.iter().map(|row| row.to_vec()).collect();
        match Self::from_grid(&rows) {
            Ok(layout) => layout,
            Err(e) => unreachable!("heart grid is valid: {e}"),
        }
    }

    /// Build a layout from rows of optional card indices.
    ///
    /// Every index in `0..BOARD_SIZE` must appear exactly once and all rows
    /// must have the same width.
    pub fn from_grid(grid: &[Vec<Option<u8>>]) -> Result<Self, LayoutError> {
        let cols = grid.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(grid.len() * cols);
        let mut positions = vec![usize::MAX; BOARD_SIZE];

        for (row_idx, row) in grid.iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::RaggedRow {
                    row: row_idx,
                    expected: cols,
                    found: row.len(),
                });
            }

            for &slot in row {
                let cell = match slot {
                    None => Cell::Empty,
                    Some(raw) => {
                        let index = CardIndex::try_new(raw as usize)
                            .ok_or(LayoutError::IndexOutOfRange(raw))?;
                        let position = &mut positions[index.index()];
                        if *position != usize::MAX {
                            return Err(LayoutError::DuplicateIndex(raw));
                        }
                        *position = cells.len();
                        Cell::Card(index)
                    }
                };
                cells.push(cell);
            }
        }

        if let Some(missing) = positions.iter().position(|&p| p == usize::MAX) {
            return Err(LayoutError::MissingIndex(missing as u8));
        }

        Ok(Self {
            rows: grid.len(),
            cols,
            cells,
            positions,
        })
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
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Non-empty cells with their grid positions, in row-major order.
    pub fn card_cells(&self) -> impl Iterator<Item = (GridPos, CardIndex)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(offset, cell)| {
            cell.card().map(|index| (self.grid_pos(offset), index))
        })
    }

    /// Cell at a grid position, `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Where a card is drawn.
    #[must_use]
    pub fn position_of(&self, index: CardIndex) -> GridPos {
        self.grid_pos(self.positions[index.index()])
    }

    /// Number of spacer cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    fn grid_pos(&self, offset: usize) -> GridPos {
        GridPos {
            row: offset / self.cols,
            col: offset % self.cols,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::heart()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_dimensions() {
        let layout = Layout::heart();
        assert_eq!(layout.rows(), 5);
        assert_eq!(layout.cols(), 7);
        assert_eq!(layout.cells().len(), 35);
        assert_eq!(layout.empty_count(), 11);
        assert_eq!(layout.card_cells().count(), BOARD_SIZE);
    }

    #[test]
    fn test_heart_empty_positions() {
        let layout = Layout::heart();
        let empties: Vec<usize> = layout
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect();

        assert_eq!(empties, vec![0, 3, 6, 14, 20, 21, 27, 28, 29, 33, 34]);
    }

    #[test]
    fn test_position_lookup() {
        let layout = Layout::heart();
        assert_eq!(layout.position_of(CardIndex::new(0)), GridPos { row: 0, col: 1 });
        assert_eq!(layout.position_of(CardIndex::new(4)), GridPos { row: 1, col: 0 });
        assert_eq!(layout.position_of(CardIndex::new(23)), GridPos { row: 4, col: 4 });

        assert_eq!(layout.cell_at(0, 0), Some(Cell::Empty));
        assert_eq!(layout.cell_at(2, 3), Some(Cell::Card(CardIndex::new(13))));
        assert_eq!(layout.cell_at(5, 0), None);
        assert_eq!(layout.cell_at(0, 7), None);
    }

    #[test]
    fn test_card_cells_positions_agree() {
        let layout = Layout::heart();
        for (pos, index) in layout.card_cells() {
            assert_eq!(layout.position_of(index), pos);
            assert_eq!(layout.cell_at(pos.row, pos.col), Some(Cell::Card(index)));
        }
    }

    #[test]
    fn test_from_grid_errors() {
        let mut grid: Vec<Vec<Option<u8>>> = HEART_GRID.iter().map(|r| r.to_vec()).collect();

        let mut ragged = grid.clone();
        ragged[2].pop();
        assert_eq!(
            Layout::from_grid(&ragged),
            Err(LayoutError::RaggedRow { row: 2, expected: 7, found: 6 })
        );

        let mut out_of_range = grid.clone();
        out_of_range[0][0] = Some(24);
        assert_eq!(
            Layout::from_grid(&out_of_range),
            Err(LayoutError::IndexOutOfRange(24))
        );

        let mut duplicate = grid.clone();
        duplicate[0][0] = Some(5);
        assert_eq!(Layout::from_grid(&duplicate), Err(LayoutError::DuplicateIndex(5)));

        grid[4][2] = None;
        assert_eq!(Layout::from_grid(&grid), Err(LayoutError::MissingIndex(21)));
    }

    #[test]
    fn test_from_grid_custom_shape() {
        let grid: Vec<Vec<Option<u8>>> = (0..4)
            .map(|r| (0..6).map(|c| Some((r * 6 + c) as u8)).collect())
            .collect();
        let layout = Layout::from_grid(&grid).unwrap();

        assert_eq!(layout.rows(), 4);
        assert_eq!(layout.cols(), 6);
        assert_eq!(layout.empty_count(), 0);
        assert_eq!(layout.position_of(CardIndex::new(7)), GridPos { row: 1, col: 1 });
    }
}
