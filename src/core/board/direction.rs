//! Direction policies: the four moves share one resolver and differ only in
//! the parameters looked up here.

use bevy::math::Vec2;

use super::geometry::{BoardGeometry, COLUMNS, ROWS};
use super::tile::{Rounding, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[inline]
    pub fn policy(self) -> &'static DirectionPolicy {
        &POLICIES[self as usize]
    }
}

/// Grid axis a move travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal travel; the column index changes.
    Column,
    /// Vertical travel; the row index changes.
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionPolicy {
    pub axis: Axis,
    /// -1 toward index 0 (left/up), +1 toward the far edge (right/down).
    pub sign: i8,
    pub rounding: Rounding,
}

// Indexed by `Direction as usize`.
const POLICIES: [DirectionPolicy; 4] = [
    DirectionPolicy { axis: Axis::Column, sign: -1, rounding: Rounding::Ceil },
    DirectionPolicy { axis: Axis::Column, sign: 1, rounding: Rounding::Floor },
    DirectionPolicy { axis: Axis::Row, sign: -1, rounding: Rounding::Ceil },
    DirectionPolicy { axis: Axis::Row, sign: 1, rounding: Rounding::Floor },
];

impl DirectionPolicy {
    #[inline]
    fn primary_index(&self, tile: &Tile) -> usize {
        match self.axis {
            Axis::Column => tile.column,
            Axis::Row => tile.row,
        }
    }

    #[inline]
    fn secondary_index(&self, tile: &Tile) -> usize {
        match self.axis {
            Axis::Column => tile.row,
            Axis::Row => tile.column,
        }
    }

    #[inline]
    fn axis_len(&self) -> usize {
        match self.axis {
            Axis::Column => COLUMNS,
            Axis::Row => ROWS,
        }
    }

    #[inline]
    fn position(&self, tile: &Tile) -> f32 {
        match self.axis {
            Axis::Column => tile.x,
            Axis::Row => tile.y,
        }
    }

    #[inline]
    fn extent(&self, geometry: &BoardGeometry) -> f32 {
        match self.axis {
            Axis::Column => geometry.cell_width,
            Axis::Row => geometry.cell_height,
        }
    }

    /// Order tiles so the ones closest to the boundary are processed first.
    pub fn sort(&self, tiles: &mut [Tile]) {
        if self.sign < 0 {
            tiles.sort_by_key(|t| (self.primary_index(t), self.secondary_index(t)));
        } else {
            tiles.sort_by_key(|t| {
                (
                    std::cmp::Reverse(self.primary_index(t)),
                    self.secondary_index(t),
                )
            });
        }
    }

    /// True when the tile already sits on the edge it slides toward.
    pub fn is_on_boundary(&self, tile: &Tile) -> bool {
        let idx = self.primary_index(tile);
        if self.sign < 0 {
            idx == 0
        } else {
            idx == self.axis_len() - 1
        }
    }

    /// The cell one step closer to the boundary, if any.
    pub fn neighbor_cell(&self, tile: &Tile) -> Option<(usize, usize)> {
        if self.is_on_boundary(tile) {
            return None;
        }
        let step = |i: usize| if self.sign < 0 { i - 1 } else { i + 1 };
        Some(match self.axis {
            Axis::Column => (tile.row, step(tile.column)),
            Axis::Row => (step(tile.row), tile.column),
        })
    }

    /// Distance from `tile` to `neighbor` measured along the travel direction.
    #[inline]
    pub fn gap(&self, tile: &Tile, neighbor: &Tile) -> f32 {
        (self.position(neighbor) - self.position(tile)) * f32::from(self.sign)
    }

    /// Merge threshold: an equal neighbor is still more than one step away, so
    /// keep animating the approach instead of merging.
    pub fn keeps_approaching(&self, tile: &Tile, neighbor: &Tile, geometry: &BoardGeometry) -> bool {
        self.gap(tile, neighbor) > geometry.step
    }

    /// Move threshold: a differing neighbor is more than one cell plus one step
    /// away, so the tile can slide another step without overlapping it.
    pub fn has_clearance(&self, tile: &Tile, neighbor: &Tile, geometry: &BoardGeometry) -> bool {
        self.gap(tile, neighbor) > self.extent(geometry) + geometry.step
    }

    /// Per-frame pixel displacement.
    pub fn velocity(&self, geometry: &BoardGeometry) -> Vec2 {
        let d = geometry.step * f32::from(self.sign);
        match self.axis {
            Axis::Column => Vec2::new(d, 0.0),
            Axis::Row => Vec2::new(0.0, d),
        }
    }

    /// Keep a translated tile within the board along the travel axis.
    pub fn clamp_to_board(&self, tile: &mut Tile, geometry: &BoardGeometry) {
        let max = geometry.max_origin();
        match self.axis {
            Axis::Column => tile.x = tile.x.clamp(0.0, max.x),
            Axis::Row => tile.y = tile.y.clamp(0.0, max.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::tile::TileId;

    fn tile(row: usize, column: usize) -> Tile {
        Tile::new(TileId(0), 2, row, column, &BoardGeometry::default())
    }

    #[test]
    fn policy_table_lines_up_with_enum() {
        assert_eq!(Direction::Left.policy().axis, Axis::Column);
        assert_eq!(Direction::Left.policy().sign, -1);
        assert_eq!(Direction::Right.policy().rounding, Rounding::Floor);
        assert_eq!(Direction::Up.policy().axis, Axis::Row);
        assert_eq!(Direction::Up.policy().rounding, Rounding::Ceil);
        assert_eq!(Direction::Down.policy().sign, 1);
    }

    #[test]
    fn boundaries_and_neighbors() {
        let left = Direction::Left.policy();
        assert!(left.is_on_boundary(&tile(2, 0)));
        assert_eq!(left.neighbor_cell(&tile(2, 0)), None);
        assert_eq!(left.neighbor_cell(&tile(2, 3)), Some((2, 2)));

        let down = Direction::Down.policy();
        assert!(down.is_on_boundary(&tile(3, 1)));
        assert_eq!(down.neighbor_cell(&tile(1, 1)), Some((2, 1)));

        let up = Direction::Up.policy();
        assert_eq!(up.neighbor_cell(&tile(1, 3)), Some((0, 3)));

        let right = Direction::Right.policy();
        assert!(right.is_on_boundary(&tile(0, 3)));
        assert_eq!(right.neighbor_cell(&tile(0, 0)), Some((0, 1)));
    }

    #[test]
    fn sort_order_follows_direction() {
        let mut tiles = vec![tile(0, 1), tile(0, 3), tile(0, 0), tile(0, 2)];
        Direction::Left.policy().sort(&mut tiles);
        let cols: Vec<_> = tiles.iter().map(|t| t.column).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        Direction::Right.policy().sort(&mut tiles);
        let cols: Vec<_> = tiles.iter().map(|t| t.column).collect();
        assert_eq!(cols, vec![3, 2, 1, 0]);
    }

    #[test]
    fn thresholds() {
        let g = BoardGeometry::default();
        let left = Direction::Left.policy();
        let mut mover = tile(0, 1);
        let anchor = tile(0, 0);
        assert!(left.keeps_approaching(&mover, &anchor, &g));
        assert!(!left.has_clearance(&mover, &anchor, &g));
        mover.x = 20.0;
        assert!(!left.keeps_approaching(&mover, &anchor, &g));

        let right = Direction::Right.policy();
        let mover = tile(0, 0);
        let mut far = tile(0, 2);
        assert!(right.has_clearance(&mover, &far, &g));
        far.x = 220.0;
        assert!(!right.has_clearance(&mover, &far, &g));
    }

    #[test]
    fn velocity_points_at_boundary() {
        let g = BoardGeometry::default();
        assert_eq!(Direction::Left.policy().velocity(&g), Vec2::new(-20.0, 0.0));
        assert_eq!(Direction::Down.policy().velocity(&g), Vec2::new(0.0, 20.0));
    }
}
