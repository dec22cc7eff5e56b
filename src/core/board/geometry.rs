//! Fixed board dimensions and the pixel layout tiles animate through.

use bevy::math::Vec2;

pub const ROWS: usize = 4;
pub const COLUMNS: usize = 4;
/// Maximum number of live tiles.
pub const CAPACITY: usize = ROWS * COLUMNS;

/// Pixel layout of the board: cell extents plus the per-frame animation step.
///
/// Pixel space has its origin at the top-left corner of the board with `y`
/// growing downward; cell `(row, column)` starts at
/// `(column * cell_width, row * cell_height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub cell_width: f32,
    pub cell_height: f32,
    /// Pixels a sliding tile travels per animation frame.
    pub step: f32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(800.0, 800.0, 20.0)
    }
}

impl BoardGeometry {
    /// Derive cell extents from the board's pixel size. The step is clamped to
    /// `[1, min(cell extent)]` so every changed frame makes progress and a tile
    /// never skips a whole cell.
    pub fn new(width: f32, height: f32, step: f32) -> Self {
        let cell_width = (width / COLUMNS as f32).floor().max(1.0);
        let cell_height = (height / ROWS as f32).floor().max(1.0);
        let step = step.clamp(1.0, cell_width.min(cell_height));
        Self {
            cell_width,
            cell_height,
            step,
        }
    }

    /// Top-left pixel of a cell.
    #[inline]
    pub fn cell_origin(&self, row: usize, column: usize) -> Vec2 {
        Vec2::new(
            column as f32 * self.cell_width,
            row as f32 * self.cell_height,
        )
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width, self.cell_height)
    }

    /// Total pixel size of the board.
    #[inline]
    pub fn board_size(&self) -> Vec2 {
        Vec2::new(
            self.cell_width * COLUMNS as f32,
            self.cell_height * ROWS as f32,
        )
    }

    /// Largest pixel origin a tile can occupy (the bottom-right cell).
    #[inline]
    pub fn max_origin(&self) -> Vec2 {
        self.cell_origin(ROWS - 1, COLUMNS - 1)
    }
}
