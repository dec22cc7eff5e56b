// This file is part of tile_merge.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::report::log_config_report;
use crate::core::system::system_order::{BoardRenderSet, MoveInputSet};
use crate::gameplay::MovesPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::game_over::GameOverPlugin;
use crate::rendering::board_view::board_view::BoardViewPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::window_icon::window_icon::WindowIconPlugin;

/// Everything needed to play, minus the window and renderer (`DefaultPlugins`).
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .configure_sets(Update, (MoveInputSet, BoardRenderSet.after(MoveInputSet)))
            .add_systems(Startup, log_config_report)
            .add_plugins((
                InputActionsPlugin,
                MovesPlugin,
                CameraPlugin,
                BoardViewPlugin,
                WindowIconPlugin,
                GameOverPlugin,
                AutoClosePlugin,
            ));
    }
}

/// Headless subset for tests and tools: input, board logic and game-over flow,
/// no camera or sprites.
pub struct HeadlessGamePlugin;

impl Plugin for HeadlessGamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins((InputActionsPlugin, MovesPlugin, GameOverPlugin));
    }
}
