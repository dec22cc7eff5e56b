use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::board::{BoardGeometry, Tile, TileId, COLUMNS, ROWS};
use crate::core::components::{GridLine, TileLabel, TileSprite};
use crate::core::config::GameConfig;
use crate::core::system::system_order::BoardRenderSet;
use crate::gameplay::BoardState;
use crate::rendering::palette::palette::tile_color_for_index;

/// Font used for tile values and the end banner.
#[derive(Resource, Clone, Default)]
pub struct TileFont(pub Handle<Font>);

/// Draws the board: background, one sprite per tile and the grid on top.
pub struct BoardViewPlugin;

impl Plugin for BoardViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileFont>()
            .add_systems(Startup, (setup_board_view, spawn_grid))
            .add_systems(Update, sync_tile_sprites.in_set(BoardRenderSet));
    }
}

/// Board pixel (top-left origin, y down) to world space (centered, y up) for
/// the center of a cell-sized box starting at `pixel`.
pub fn pixel_to_world(pixel: Vec2, geometry: &BoardGeometry) -> Vec2 {
    let board = geometry.board_size();
    Vec2::new(
        -board.x * 0.5 + pixel.x + geometry.cell_width * 0.5,
        board.y * 0.5 - pixel.y - geometry.cell_height * 0.5,
    )
}

fn setup_board_view(mut commands: Commands, cfg: Res<GameConfig>, assets: Option<Res<AssetServer>>) {
    commands.insert_resource(ClearColor(cfg.style.background.to_color()));
    let (Some(path), Some(assets)) = (cfg.style.font_path.as_ref(), assets) else {
        return;
    };
    info!(target: "config", "Loading tile font {path}");
    commands.insert_resource(TileFont(assets.load(path.clone())));
}

fn spawn_grid(mut commands: Commands, cfg: Res<GameConfig>) {
    let geometry = cfg.geometry();
    let board = geometry.board_size();
    let color = cfg.style.outline.to_color();
    let t = cfg.style.outline_thickness.max(0.0);
    if t == 0.0 {
        return;
    }
    for c in 0..=COLUMNS {
        let x = -board.x * 0.5 + c as f32 * geometry.cell_width;
        commands.spawn((
            GridLine,
            Sprite::from_color(color, Vec2::new(t, board.y)),
            Transform::from_xyz(x, 0.0, 1.0),
        ));
    }
    for r in 0..=ROWS {
        let y = board.y * 0.5 - r as f32 * geometry.cell_height;
        commands.spawn((
            GridLine,
            Sprite::from_color(color, Vec2::new(board.x, t)),
            Transform::from_xyz(0.0, y, 1.0),
        ));
    }
}

fn label_font_size(base: f32, value: u32) -> f32 {
    let digits = value.to_string().len() as f32;
    if digits > 3.0 { base * 3.0 / digits } else { base }
}

/// Keep one sprite per live tile: move it, recolor on merge, despawn merged-away tiles.
pub fn sync_tile_sprites(
    mut commands: Commands,
    state: Option<Res<BoardState>>,
    cfg: Res<GameConfig>,
    font: Res<TileFont>,
    mut sprites: Query<(Entity, &mut TileSprite, &mut Transform, &mut Sprite)>,
    mut labels: Query<(&mut Text2d, &mut TextFont), With<TileLabel>>,
) {
    let Some(state) = state else { return };
    let geometry = state.geometry;
    let mut live: HashMap<TileId, &Tile> = state.board.tiles().map(|t| (t.id, t)).collect();

    for (entity, mut view, mut transform, mut sprite) in &mut sprites {
        let Some(tile) = live.remove(&view.id) else {
            commands.entity(entity).despawn();
            continue;
        };
        let world = pixel_to_world(tile.position(), &geometry);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        if view.value != tile.value {
            view.value = tile.value;
            sprite.color = tile_color_for_index(tile.color_index());
            if let Ok((mut text, mut text_font)) = labels.get_mut(view.label) {
                text.0 = tile.value.to_string();
                text_font.font_size = label_font_size(cfg.style.font_size, tile.value);
            }
        }
    }

    for tile in live.into_values() {
        let world = pixel_to_world(tile.position(), &geometry);
        let label = commands
            .spawn((
                TileLabel,
                Text2d::new(tile.value.to_string()),
                TextFont {
                    font: font.0.clone(),
                    font_size: label_font_size(cfg.style.font_size, tile.value),
                    ..default()
                },
                TextColor(cfg.style.font_color.to_color()),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_xyz(0.0, 0.0, 0.5),
            ))
            .id();
        commands
            .spawn((
                TileSprite {
                    id: tile.id,
                    value: tile.value,
                    label,
                },
                Sprite::from_color(tile_color_for_index(tile.color_index()), geometry.cell_size()),
                Transform::from_xyz(world.x, world.y, 0.0),
            ))
            .add_child(label);
    }
}
