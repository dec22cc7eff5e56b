use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use tile_merge::core::board::{Board, Direction, MoveStatus};
use tile_merge::core::components::GameOverBanner;
use tile_merge::core::config::GameConfig;
use tile_merge::gameplay::{ActiveSlide, BoardState, MoveRequested, MoveResolved};
use tile_merge::interaction::session::game_over::GameOverTimer;
use tile_merge::{AppState, HeadlessGamePlugin};

fn headless_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(cfg);
    app.add_plugins(HeadlessGamePlugin);
    // Animation frames are stepped by hand below.
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app.update();
    app
}

fn seeded_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.spawn.seed = Some(42);
    cfg
}

fn set_board(app: &mut App, values: [[u32; 4]; 4]) {
    let mut state = app.world_mut().resource_mut::<BoardState>();
    let geometry = state.geometry;
    state.board = Board::from_values(values, &geometry);
}

fn tap(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
}

/// Step `FixedUpdate` until the active slide is gone.
fn run_slide(app: &mut App) -> usize {
    let mut ticks = 0;
    while app.world().contains_resource::<ActiveSlide>() {
        app.world_mut().run_schedule(FixedUpdate);
        ticks += 1;
        assert!(ticks < 500, "slide never settled");
    }
    ticks
}

fn resolved_events(app: &App) -> Vec<MoveResolved> {
    let events = app.world().resource::<Events<MoveResolved>>();
    events.get_cursor().read(events).copied().collect()
}

#[test]
fn startup_seeds_two_tiles() {
    let app = headless_app(seeded_config());
    let state = app.world().resource::<BoardState>();
    assert_eq!(state.board.len(), 2);
    assert!(state.board.tiles().all(|t| t.value == 2));
    let fixed = app.world().resource::<Time<Fixed>>();
    assert!((fixed.timestep().as_secs_f64() - 1.0 / 130.0).abs() < 1e-6);
}

#[test]
fn arrow_key_slides_and_merges() {
    let mut app = headless_app(seeded_config());
    set_board(&mut app, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    tap(&mut app, KeyCode::ArrowLeft);
    assert!(app.world().contains_resource::<ActiveSlide>());

    let ticks = run_slide(&mut app);
    // Ten moving frames plus the one that notices nothing changed.
    assert_eq!(ticks, 11);

    let board = &app.world().resource::<BoardState>().board;
    assert_eq!(board.get(0, 0).map(|t| t.value), Some(4));
    assert_eq!(board.len(), 2);

    let events = resolved_events(&app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, Direction::Left);
    assert_eq!(events[0].status, MoveStatus::Continue);
    assert_eq!((events[0].frames, events[0].merges), (10, 1));
}

#[test]
fn wasd_is_bound_too() {
    let mut app = headless_app(seeded_config());
    set_board(&mut app, [[0, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]]);
    tap(&mut app, KeyCode::KeyW);
    run_slide(&mut app);
    let board = &app.world().resource::<BoardState>().board;
    assert_eq!(board.get(0, 3).map(|t| t.value), Some(2));
}

#[test]
fn input_is_ignored_while_a_slide_animates() {
    let mut app = headless_app(seeded_config());
    set_board(&mut app, [[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
    tap(&mut app, KeyCode::ArrowLeft);
    app.world_mut().run_schedule(FixedUpdate);

    app.world_mut().send_event(MoveRequested(Direction::Right));
    app.update();
    let active = app.world().resource::<ActiveSlide>();
    assert_eq!(active.0.direction(), Direction::Left);

    run_slide(&mut app);
    let board = &app.world().resource::<BoardState>().board;
    assert_eq!(board.get(0, 0).map(|t| t.value), Some(2));
    assert_eq!(resolved_events(&app).len(), 1);
}

#[test]
fn full_board_ends_the_game() {
    let mut cfg = seeded_config();
    cfg.game_over.display_secs = 0.0;
    let mut app = headless_app(cfg);
    set_board(&mut app, [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    tap(&mut app, KeyCode::ArrowDown);
    assert_eq!(run_slide(&mut app), 1);
    assert_eq!(resolved_events(&app)[0].status, MoveStatus::Lost);

    app.update();
    assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::GameOver);
    assert!(app.world().contains_resource::<GameOverTimer>());
    let banners = app
        .world_mut()
        .query_filtered::<&Text2d, With<GameOverBanner>>()
        .iter(app.world())
        .map(|t| t.0.clone())
        .collect::<Vec<_>>();
    assert_eq!(banners, vec!["Game Over!".to_string()]);
    // A zero-length banner requests exit on the same frame.
    assert!(!app.world().resource::<Events<AppExit>>().is_empty());

    // Moves no longer start once the game is over.
    tap(&mut app, KeyCode::ArrowUp);
    assert!(!app.world().contains_resource::<ActiveSlide>());
}
