//! Board model and move resolution: tiles on a fixed 4x4 grid, the four
//! direction policies, and the frame-stepped slide/merge resolver. Pure game
//! logic; the Bevy systems in `gameplay` drive it and `rendering` draws it.

#[allow(clippy::module_inception)]
pub mod board;
pub mod direction;
pub mod geometry;
pub mod resolver;
pub mod spawn;
pub mod tile;

pub use board::Board;
pub use direction::{Axis, Direction, DirectionPolicy};
pub use geometry::{BoardGeometry, CAPACITY, COLUMNS, ROWS};
pub use resolver::{finish_move, resolve_move, FrameOutcome, MoveReport, MoveStatus, Slide};
pub use spawn::{seed_board, spawn_random, SpawnRules};
pub use tile::{color_index, Rounding, Tile, TileId};
