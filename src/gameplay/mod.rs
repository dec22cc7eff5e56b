pub mod board_state;
pub mod moves;

pub use board_state::{ActiveSlide, BoardState, GameRng, MoveRequested, MoveResolved};
pub use moves::MovesPlugin;
