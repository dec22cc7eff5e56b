use std::fs;
use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use bevy::winit::WinitWindows;
use winit::window::Icon;

/// Decoded RGBA pixels for the window icon, handed to the native window once it exists.
#[derive(Resource, Debug, Clone)]
pub struct WindowIconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl WindowIconImage {
    pub fn from_png_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes).context("decode icon image")?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            rgba: img.into_raw(),
            width,
            height,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read window icon '{}'", path.display()))?;
        Self::from_png_bytes(&bytes).with_context(|| format!("window icon '{}'", path.display()))
    }
}

pub struct WindowIconPlugin;

impl Plugin for WindowIconPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_window_icon.run_if(resource_exists::<WindowIconImage>));
    }
}

// Winit windows appear a few frames in, so keep trying until one exists.
fn apply_window_icon(
    mut commands: Commands,
    icon: Res<WindowIconImage>,
    windows: Option<NonSend<WinitWindows>>,
) {
    let Some(windows) = windows else { return };
    if windows.windows.is_empty() {
        return;
    }
    match Icon::from_rgba(icon.rgba.clone(), icon.width, icon.height) {
        Ok(native) => {
            for window in windows.windows.values() {
                window.set_window_icon(Some(native.clone()));
            }
            info!(target: "config", "Window icon set ({}x{})", icon.width, icon.height);
        }
        Err(e) => warn!(target: "config", "Window icon rejected: {e}"),
    }
    commands.remove_resource::<WindowIconImage>();
}
