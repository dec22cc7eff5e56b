use bevy::log::warn;

use super::geometry::{BoardGeometry, CAPACITY, COLUMNS, ROWS};
use super::tile::{Tile, TileId};

/// The 4x4 grid. Each cell holds at most one tile; the cell a tile is stored
/// in always matches its `row`/`column`.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: [[Option<Tile>; COLUMNS]; ROWS],
    next_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a value grid (0 = empty). Handy for scenarios and tests.
    pub fn from_values(values: [[u32; COLUMNS]; ROWS], geometry: &BoardGeometry) -> Self {
        let mut board = Self::new();
        for (row, line) in values.iter().enumerate() {
            for (column, &value) in line.iter().enumerate() {
                if value != 0 {
                    board.spawn(value, row, column, geometry);
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&Tile> {
        self.cells.get(row)?.get(column)?.as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some()
    }

    pub fn len(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == CAPACITY
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten().flatten()
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(CAPACITY);
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                if self.cells[row][column].is_none() {
                    out.push((row, column));
                }
            }
        }
        out
    }

    /// Value grid snapshot (0 = empty).
    pub fn values(&self) -> [[u32; COLUMNS]; ROWS] {
        let mut out = [[0; COLUMNS]; ROWS];
        for tile in self.tiles() {
            out[tile.row][tile.column] = tile.value;
        }
        out
    }

    /// Create a tile on an empty cell. Returns `None` when the cell is taken.
    pub fn spawn(&mut self, value: u32, row: usize, column: usize, geometry: &BoardGeometry) -> Option<TileId> {
        if self.is_occupied(row, column) {
            return None;
        }
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.cells[row][column] = Some(Tile::new(id, value, row, column, geometry));
        Some(id)
    }

    /// Store a tile in the cell named by its `row`/`column`, returning whatever
    /// tile was there before.
    pub fn place(&mut self, tile: Tile) -> Option<Tile> {
        self.cells[tile.row][tile.column].replace(tile)
    }

    /// Remove every tile, leaving the board empty (ids keep counting).
    pub fn take_tiles(&mut self) -> Vec<Tile> {
        let mut out = Vec::with_capacity(CAPACITY);
        for cell in self.cells.iter_mut().flatten() {
            if let Some(tile) = cell.take() {
                out.push(tile);
            }
        }
        out
    }

    /// Re-key the board from a working set of tiles.
    pub fn rebuild(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.cells = [[None; COLUMNS]; ROWS];
        for tile in tiles {
            let (row, column) = tile.cell();
            if let Some(displaced) = self.place(tile) {
                warn!(
                    "board rebuild: tile {:?} (value {}) displaced from ({row},{column})",
                    displaced.id, displaced.value
                );
            }
        }
    }
}
