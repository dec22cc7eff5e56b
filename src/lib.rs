pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::{GamePlugin, HeadlessGamePlugin};
pub use crate::app::state::AppState;
pub use crate::core::board::{resolve_move, Board, BoardGeometry, Direction, MoveStatus, Slide};
pub use crate::core::config::GameConfig;
