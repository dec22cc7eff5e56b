use bevy::prelude::*;

use crate::core::board::TileId;

/// Sprite entity drawing one board tile. `value` caches what the label shows.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileSprite {
    pub id: TileId,
    pub value: u32,
    pub label: Entity,
}

/// Text child showing a tile's number.
#[derive(Component)]
pub struct TileLabel;

/// Grid separator / border segment.
#[derive(Component)]
pub struct GridLine;

/// Centered end-of-game message.
#[derive(Component)]
pub struct GameOverBanner;
