//! Slide-and-merge resolution for one directional move, stepped one animation
//! frame at a time.
//!
//! A [`Slide`] owns the per-move bookkeeping (which tiles already merged) and
//! advances the board by one frame per [`Slide::advance`] call, so the
//! presentation layer can render between frames and tests can drive it
//! synchronously. [`resolve_move`] runs a whole move without rendering.

use std::collections::HashSet;

use rand::Rng;

use super::board::Board;
use super::geometry::{BoardGeometry, COLUMNS, ROWS};
use super::direction::Direction;
use super::spawn::{spawn_random, SpawnRules};
use super::tile::{Tile, TileId};

/// Result of a settled move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Continue,
    Lost,
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// At least one tile moved or merged; call `advance` again.
    Changed,
    /// Nothing moved; the move is complete and tiles sit on their cells.
    Settled,
}

/// Summary of a fully resolved move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub status: MoveStatus,
    /// Frames in which something changed.
    pub frames: u32,
    pub merges: u32,
    pub spawned: Option<TileId>,
}

/// In-flight state of one directional move.
#[derive(Debug, Clone)]
pub struct Slide {
    direction: Direction,
    merged: HashSet<TileId>,
    frames: u32,
    merges: u32,
    settled: bool,
}

impl Slide {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            merged: HashSet::new(),
            frames: 0,
            merges: 0,
            settled: false,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    #[inline]
    pub fn merges(&self) -> u32 {
        self.merges
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance the move by one animation frame.
    ///
    /// Tiles are visited boundary-first. Neighbor lookups use the cell index
    /// captured at the start of the frame while reading the neighbor's current
    /// pixel position, so a tile follows a neighbor that already moved this
    /// frame. The board is re-keyed from the surviving tiles afterwards.
    pub fn advance(&mut self, board: &mut Board, geometry: &BoardGeometry) -> FrameOutcome {
        if self.settled {
            return FrameOutcome::Settled;
        }
        let policy = self.direction.policy();
        let velocity = policy.velocity(geometry);

        let mut tiles = board.take_tiles();
        policy.sort(&mut tiles);
        let mut slots: [[Option<usize>; COLUMNS]; ROWS] = [[None; COLUMNS]; ROWS];
        for (i, t) in tiles.iter().enumerate() {
            slots[t.row][t.column] = Some(i);
        }
        let mut removed = vec![false; tiles.len()];
        let mut stepped = vec![false; tiles.len()];
        let mut changed = false;

        for i in 0..tiles.len() {
            let tile = tiles[i];
            if policy.is_on_boundary(&tile) {
                continue;
            }
            let neighbor = policy
                .neighbor_cell(&tile)
                .and_then(|(row, column)| slots[row][column]);

            let Some(j) = neighbor else {
                tiles[i].translate(velocity);
                policy.clamp_to_board(&mut tiles[i], geometry);
                tiles[i].snap_to_grid(policy.rounding, geometry);
                stepped[i] = true;
                changed = true;
                continue;
            };

            let next = tiles[j];
            let mergeable = tile.value == next.value
                && !removed[j]
                && !self.merged.contains(&tile.id)
                && !self.merged.contains(&next.id);

            if mergeable && !policy.keeps_approaching(&tile, &next, geometry) {
                self.absorb(&mut tiles, &mut removed, i, j);
                changed = true;
                continue;
            }

            let may_move = if mergeable {
                policy.keeps_approaching(&tile, &next, geometry)
            } else {
                policy.has_clearance(&tile, &next, geometry)
            };
            if !may_move {
                continue;
            }

            let mut moved = tile;
            moved.translate(velocity);
            moved.snap_to_grid(policy.rounding, geometry);
            // Never step into the cell the followed neighbor still holds. An
            // equal partner that has stopped is absorbed right away; otherwise
            // wait a frame.
            if !removed[j] && moved.cell() == next.cell() {
                if mergeable && !stepped[j] {
                    self.absorb(&mut tiles, &mut removed, i, j);
                    changed = true;
                }
                continue;
            }
            tiles[i] = moved;
            stepped[i] = true;
            changed = true;
        }

        board.rebuild(
            tiles
                .into_iter()
                .zip(removed)
                .filter_map(|(t, gone)| (!gone).then_some(t)),
        );

        if changed {
            self.frames += 1;
            FrameOutcome::Changed
        } else {
            let mut tiles = board.take_tiles();
            for t in &mut tiles {
                t.align_to_cell(geometry);
            }
            board.rebuild(tiles);
            self.settled = true;
            FrameOutcome::Settled
        }
    }

    /// Merge tile `i` into its neighbor `j`: `j` doubles, `i` leaves the board.
    fn absorb(&mut self, tiles: &mut [Tile], removed: &mut [bool], i: usize, j: usize) {
        tiles[j].value *= 2;
        removed[i] = true;
        self.merged.insert(tiles[j].id);
        self.merges += 1;
    }

    /// Run frames until the move settles.
    pub fn run_to_settle(&mut self, board: &mut Board, geometry: &BoardGeometry) {
        while self.advance(board, geometry) == FrameOutcome::Changed {}
    }
}

/// Conclude a settled move: report loss or spawn the next tile.
///
/// Loss is decided by occupancy alone. A board holding all 16 tiles after a
/// move attempt is lost even when a merge is still available in another
/// direction, and a move that changed nothing still spawns a tile when there is
/// room. Both behaviors are kept as the game has always played.
pub fn finish_move<R: Rng + ?Sized>(
    board: &mut Board,
    geometry: &BoardGeometry,
    rng: &mut R,
    rules: &SpawnRules,
) -> (MoveStatus, Option<TileId>) {
    if board.is_full() {
        return (MoveStatus::Lost, None);
    }
    let spawned = spawn_random(board, geometry, rng, rules);
    (MoveStatus::Continue, spawned)
}

/// Resolve a whole move synchronously: all animation frames, then settle.
pub fn resolve_move<R: Rng + ?Sized>(
    board: &mut Board,
    direction: Direction,
    geometry: &BoardGeometry,
    rng: &mut R,
    rules: &SpawnRules,
) -> MoveReport {
    let mut slide = Slide::new(direction);
    slide.run_to_settle(board, geometry);
    let (status, spawned) = finish_move(board, geometry, rng, rules);
    MoveReport {
        status,
        frames: slide.frames(),
        merges: slide.merges(),
        spawned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(values: [[u32; 4]; 4], direction: Direction) -> (Board, Slide) {
        let g = BoardGeometry::default();
        let mut board = Board::from_values(values, &g);
        let mut slide = Slide::new(direction);
        slide.run_to_settle(&mut board, &g);
        (board, slide)
    }

    const EMPTY: [u32; 4] = [0; 4];

    #[test]
    fn pair_merges_toward_boundary() {
        let (board, slide) = settle([[2, 2, 0, 0], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [4, 0, 0, 0]);
        assert_eq!(slide.merges(), 1);
        // 200px closed at 20px per frame, merge on the tenth frame.
        assert_eq!(slide.frames(), 10);
    }

    #[test]
    fn merged_tile_keeps_the_leading_tiles_identity() {
        let g = BoardGeometry::default();
        let mut board = Board::from_values([[0, 0, 2, 2], EMPTY, EMPTY, EMPTY], &g);
        let leading = board.get(0, 3).unwrap().id;
        Slide::new(Direction::Right).run_to_settle(&mut board, &g);
        let merged = board.get(0, 3).unwrap();
        assert_eq!((merged.id, merged.value), (leading, 4));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn no_chain_merge_in_one_move() {
        let (board, _) = settle([[2, 2, 2, 0], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [4, 2, 0, 0]);

        let (board, _) = settle([[4, 4, 8, 0], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [8, 8, 0, 0]);
    }

    #[test]
    fn four_equal_tiles_make_two_pairs() {
        let (board, slide) = settle([[2, 2, 2, 2], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [4, 4, 0, 0]);
        assert_eq!(slide.merges(), 2);

        let (board, _) = settle([[2, 2, 2, 2], EMPTY, EMPTY, EMPTY], Direction::Right);
        assert_eq!(board.values()[0], [0, 0, 4, 4]);
    }

    #[test]
    fn trailing_equal_tile_does_not_swallow_a_stalled_neighbor() {
        let (board, _) = settle([[0, 4, 2, 2], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [4, 4, 0, 0]);
    }

    #[test]
    fn vertical_moves() {
        let (board, _) = settle([[2, 0, 0, 0], EMPTY, EMPTY, [2, 0, 0, 0]], Direction::Up);
        assert_eq!(board.values()[0][0], 4);
        assert_eq!(board.len(), 1);

        let (board, _) = settle([[0, 0, 2, 0], EMPTY, EMPTY, EMPTY], Direction::Down);
        assert_eq!(board.values()[3], [0, 0, 2, 0]);
    }

    #[test]
    fn differing_tiles_stack_without_overlap() {
        let (board, slide) = settle([[0, 2, 0, 4], EMPTY, EMPTY, EMPTY], Direction::Left);
        assert_eq!(board.values()[0], [2, 4, 0, 0]);
        assert_eq!(slide.merges(), 0);
    }

    #[test]
    fn compacted_board_settles_in_one_pass() {
        let g = BoardGeometry::default();
        let mut board = Board::from_values([[2, 0, 0, 0], [4, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]], &g);
        let mut slide = Slide::new(Direction::Left);
        assert_eq!(slide.advance(&mut board, &g), FrameOutcome::Settled);
        assert_eq!(slide.frames(), 0);
        assert!(slide.is_settled());
        assert_eq!(slide.advance(&mut board, &g), FrameOutcome::Settled);
    }

    #[test]
    fn equal_tile_merges_into_a_partner_stopped_off_grid() {
        // 33px does not divide 200px cells, so the leading tile stops between cells.
        let g = BoardGeometry::new(800.0, 800.0, 33.0);
        let mut board = Board::from_values([[2, 2, 0, 8], EMPTY, EMPTY, EMPTY], &g);
        let mut slide = Slide::new(Direction::Right);
        slide.run_to_settle(&mut board, &g);
        assert_eq!(board.values()[0], [0, 0, 4, 8]);
        assert_eq!(slide.merges(), 1);

        let mut board = Board::from_values([[2, 0, 8, 8], EMPTY, EMPTY, EMPTY], &g);
        Slide::new(Direction::Left).run_to_settle(&mut board, &g);
        assert_eq!(board.values()[0], [2, 16, 0, 0]);
        assert!(board.tiles().all(|t| t.is_aligned(&g)));
    }

    #[test]
    fn settled_tiles_are_aligned() {
        let g = BoardGeometry::new(800.0, 800.0, 30.0);
        let mut board = Board::from_values([[0, 0, 0, 2], [0, 4, 0, 0], EMPTY, EMPTY], &g);
        Slide::new(Direction::Left).run_to_settle(&mut board, &g);
        assert_eq!(board.values()[0], [2, 0, 0, 0]);
        assert_eq!(board.values()[1], [4, 0, 0, 0]);
        assert!(board.tiles().all(|t| t.is_aligned(&g)));
    }
}
