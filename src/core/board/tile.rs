use bevy::math::Vec2;

use super::geometry::{BoardGeometry, COLUMNS, ROWS};

/// Stable identity of a tile for the lifetime of a board (used to keep one
/// sprite per tile while it slides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// How a continuous pixel position is turned back into a grid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

impl Rounding {
    #[inline]
    fn apply(self, v: f32) -> f32 {
        match self {
            Rounding::Floor => v.floor(),
            Rounding::Ceil => v.ceil(),
        }
    }
}

/// A numbered tile. `row`/`column` is the cell the tile counts as occupying;
/// `x`/`y` is where it is drawn (top-left pixel, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: usize,
    pub column: usize,
    pub x: f32,
    pub y: f32,
}

impl Tile {
    pub fn new(id: TileId, value: u32, row: usize, column: usize, geometry: &BoardGeometry) -> Self {
        debug_assert!(value >= 2 && value.is_power_of_two(), "tile value {value} not a power of two");
        let origin = geometry.cell_origin(row, column);
        Self {
            id,
            value,
            row,
            column,
            x: origin.x,
            y: origin.y,
        }
    }

    #[inline]
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn color_index(&self) -> usize {
        color_index(self.value)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Recompute `row`/`column` from the pixel position. Left/up movement uses
    /// ceiling, right/down floor: the tile only counts as entering the next
    /// cell once its leading edge has fully crossed into it.
    pub fn snap_to_grid(&mut self, rounding: Rounding, geometry: &BoardGeometry) {
        self.row = snap_index(rounding.apply(self.y / geometry.cell_height), ROWS);
        self.column = snap_index(rounding.apply(self.x / geometry.cell_width), COLUMNS);
    }

    /// Put the tile exactly on its cell's origin.
    pub fn align_to_cell(&mut self, geometry: &BoardGeometry) {
        let origin = geometry.cell_origin(self.row, self.column);
        self.x = origin.x;
        self.y = origin.y;
    }

    #[inline]
    pub fn is_aligned(&self, geometry: &BoardGeometry) -> bool {
        self.position() == geometry.cell_origin(self.row, self.column)
    }
}

fn snap_index(v: f32, len: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v as usize).min(len - 1)
    }
}

/// Palette slot for a tile value: `log2(value) - 1`, so 2 -> 0, 4 -> 1, ...
#[inline]
pub fn color_index(value: u32) -> usize {
    (value.max(2).trailing_zeros() as usize).saturating_sub(1)
}
