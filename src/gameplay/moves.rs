use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::board::{finish_move, seed_board, Direction, FrameOutcome, MoveStatus, Slide};
use crate::core::config::GameConfig;
use crate::core::system::system_order::MoveInputSet;
use crate::interaction::inputmap::types::InputMap;

use super::board_state::{ActiveSlide, BoardState, GameRng, MoveRequested, MoveResolved};

/// Action name for each direction, as declared in the input map.
pub const MOVE_ACTIONS: [(&str, Direction); 4] = [
    ("MoveLeft", Direction::Left),
    ("MoveRight", Direction::Right),
    ("MoveUp", Direction::Up),
    ("MoveDown", Direction::Down),
];

/// Board setup, input-to-move translation, and the fixed-step slide animation.
pub struct MovesPlugin;

impl Plugin for MovesPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveRequested>()
            .add_event::<MoveResolved>()
            .add_systems(Startup, setup_board)
            .add_systems(
                Update,
                (read_move_actions, begin_move)
                    .chain()
                    .in_set(MoveInputSet)
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(FixedUpdate, step_slide.run_if(in_state(AppState::Playing)));
    }
}

fn setup_board(mut commands: Commands, cfg: Res<GameConfig>, mut time: ResMut<Time<Fixed>>) {
    let geometry = cfg.geometry();
    let mut rng = GameRng::from_seed(cfg.spawn.seed);
    let mut state = BoardState {
        geometry,
        ..default()
    };
    // validate() already warned about a bad value; play on with 2s.
    let value = match cfg.spawn.initial_value {
        v if v >= 2 && v.is_power_of_two() => v,
        _ => 2,
    };
    let seeded = seed_board(&mut state.board, &geometry, &mut rng.0, cfg.spawn.initial_tiles, value);
    if cfg.animation.fps > 0.0 {
        time.set_timestep_hz(cfg.animation.fps as f64);
    }
    info!(
        target: "moves",
        "Board ready: {} tiles seeded, cell {}x{}, step {}px at {} fps",
        seeded.len(),
        geometry.cell_width,
        geometry.cell_height,
        geometry.step,
        cfg.animation.fps
    );
    commands.insert_resource(state);
    commands.insert_resource(rng);
}

fn read_move_actions(input_map: Res<InputMap>, mut requests: EventWriter<MoveRequested>) {
    for (action, direction) in MOVE_ACTIONS {
        if input_map.just_pressed(action) {
            requests.write(MoveRequested(direction));
        }
    }
}

/// Start a slide for the first request; anything arriving mid-animation is dropped.
pub fn begin_move(
    mut commands: Commands,
    mut requests: EventReader<MoveRequested>,
    active: Option<Res<ActiveSlide>>,
) {
    let mut busy = active.is_some();
    for MoveRequested(direction) in requests.read() {
        if busy {
            debug!(target: "moves", "Ignoring {direction:?}: a slide is still animating");
            continue;
        }
        debug!(target: "moves", "Slide {direction:?} started");
        commands.insert_resource(ActiveSlide(Slide::new(*direction)));
        busy = true;
    }
}

/// Advance the active slide by one animation frame and conclude it once settled.
pub fn step_slide(
    mut commands: Commands,
    active: Option<ResMut<ActiveSlide>>,
    mut state: ResMut<BoardState>,
    mut rng: ResMut<GameRng>,
    cfg: Res<GameConfig>,
    mut resolved: EventWriter<MoveResolved>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut active) = active else { return };
    let BoardState { board, geometry } = &mut *state;
    if active.0.advance(board, geometry) == FrameOutcome::Changed {
        return;
    }
    commands.remove_resource::<ActiveSlide>();
    let slide = &active.0;
    let (status, spawned) = finish_move(board, geometry, &mut rng.0, &cfg.spawn_rules());
    info!(
        target: "moves",
        "{:?} settled after {} frames, {} merges, {} tiles, {:?}",
        slide.direction(),
        slide.frames(),
        slide.merges(),
        board.len(),
        status
    );
    resolved.write(MoveResolved {
        direction: slide.direction(),
        status,
        frames: slide.frames(),
        merges: slide.merges(),
        spawned,
    });
    if status == MoveStatus::Lost {
        info!(target: "moves", "Board full: game over");
        next_state.set(AppState::GameOver);
    }
}
