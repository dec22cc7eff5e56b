use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::GameOverBanner;
use crate::core::config::GameConfig;
use crate::rendering::board_view::board_view::TileFont;

/// Counts down the banner display before the app exits.
#[derive(Resource, Deref, DerefMut)]
pub struct GameOverTimer(pub Timer);

/// Shows the end banner on `AppState::GameOver`, then exits.
pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::GameOver), show_game_over)
            .add_systems(Update, exit_after_banner.run_if(in_state(AppState::GameOver)));
    }
}

fn show_game_over(mut commands: Commands, cfg: Res<GameConfig>, font: Option<Res<TileFont>>) {
    let font = font.map(|f| f.0.clone()).unwrap_or_default();
    commands.spawn((
        GameOverBanner,
        Text2d::new(cfg.game_over.message.clone()),
        TextFont {
            font,
            font_size: cfg.style.font_size,
            ..default()
        },
        TextColor(cfg.style.font_color.to_color()),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
    let secs = cfg.game_over.display_secs.max(0.0);
    info!(target: "moves", "Game over, exiting in {secs} seconds");
    commands.insert_resource(GameOverTimer(Timer::from_seconds(secs, TimerMode::Once)));
}

fn exit_after_banner(
    time: Res<Time>,
    timer: Option<ResMut<GameOverTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut t) = timer else { return };
    if t.tick(time.delta()).just_finished() {
        ev_exit.write(AppExit::Success);
    }
}
