use std::path::Path;

use anyhow::{bail, Context};
use bevy::prelude::*;

use tile_merge::core::config::{ConfigReport, GameConfig};
use tile_merge::rendering::window_icon::window_icon::WindowIconImage;
use tile_merge::GamePlugin;

const CONFIG_LAYERS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

/// A configured font that is not on disk cannot be recovered from once the
/// window is up, so refuse to start.
fn check_font(cfg: &GameConfig) -> anyhow::Result<()> {
    let Some(rel) = cfg.style.font_path.as_deref() else {
        return Ok(());
    };
    let full = Path::new("assets").join(rel);
    let meta = std::fs::metadata(&full)
        .with_context(|| format!("configured font '{}' is not readable", full.display()))?;
    if !meta.is_file() {
        bail!("configured font '{}' is not a file", full.display());
    }
    Ok(())
}

/// Decode the configured window icon up front; a missing or unreadable icon is fatal.
fn load_icon(cfg: &GameConfig) -> anyhow::Result<Option<WindowIconImage>> {
    let Some(rel) = cfg.window.icon_path.as_deref() else {
        return Ok(None);
    };
    WindowIconImage::load(Path::new("assets").join(rel)).map(Some)
}

fn main() -> anyhow::Result<()> {
    let (cfg, used, errors) = GameConfig::load_layered(CONFIG_LAYERS);
    check_font(&cfg).context("startup assets")?;
    let icon = load_icon(&cfg).context("startup assets")?;
    let report = ConfigReport::new(&cfg, used, errors);

    let mut app = App::new();
    if let Some(icon) = icon {
        app.insert_resource(icon);
    }
    let exit = app
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(cfg)
        .add_plugins(GamePlugin)
        .run();
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("game exited with error code {code}"),
    }
}
