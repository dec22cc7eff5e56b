use bevy::prelude::*;

/// Top-level game lifecycle.
/// Playing -> GameOver (banner, then exit)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Board accepts moves.
    #[default]
    Playing,
    /// The board filled up; the end banner is shown until exit.
    GameOver,
}
