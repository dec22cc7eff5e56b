use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::board::{Board, BoardGeometry, Direction, MoveStatus, Slide, TileId};

/// The live board plus the pixel geometry it was laid out with.
#[derive(Resource, Debug, Clone, Default)]
pub struct BoardState {
    pub board: Board,
    pub geometry: BoardGeometry,
}

/// Random source for tile spawns. Seeded from config when a seed is given.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Slide currently being animated. Its presence blocks new moves.
#[derive(Resource, Debug)]
pub struct ActiveSlide(pub Slide);

/// A direction action fired while the board was idle.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequested(pub Direction);

/// A slide settled and the follow-up spawn (or loss) was decided.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResolved {
    pub direction: Direction,
    pub status: MoveStatus,
    pub frames: u32,
    pub merges: u32,
    pub spawned: Option<TileId>,
}
