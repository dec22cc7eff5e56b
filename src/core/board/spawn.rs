use rand::seq::SliceRandom;
use rand::Rng;

use super::board::Board;
use super::geometry::BoardGeometry;
use super::tile::TileId;

/// Parameters for tiles added after a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    /// Chance that a spawned tile is a 4 instead of a 2. 0.5 = uniform choice.
    pub four_probability: f64,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            four_probability: 0.5,
        }
    }
}

/// Place a tile (2, or 4 with `four_probability`) on a uniformly random empty
/// cell. Returns `None` on a full board.
pub fn spawn_random<R: Rng + ?Sized>(
    board: &mut Board,
    geometry: &BoardGeometry,
    rng: &mut R,
    rules: &SpawnRules,
) -> Option<TileId> {
    let &(row, column) = board.empty_cells().choose(rng)?;
    let value = if rng.gen_bool(rules.four_probability.clamp(0.0, 1.0)) {
        4
    } else {
        2
    };
    board.spawn(value, row, column, geometry)
}

/// Seed a fresh game with `count` tiles of `value` on random empty cells.
pub fn seed_board<R: Rng + ?Sized>(
    board: &mut Board,
    geometry: &BoardGeometry,
    rng: &mut R,
    count: usize,
    value: u32,
) -> Vec<TileId> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&(row, column)) = board.empty_cells().choose(rng) else {
            break;
        };
        if let Some(id) = board.spawn(value, row, column, geometry) {
            ids.push(id);
        }
    }
    ids
}
