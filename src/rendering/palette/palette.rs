use bevy::prelude::*;

/// Tile fills, indexed by `log2(value) - 1` (2, 4, 8, ... 512).
pub const TILE_COLORS: [(u8, u8, u8); 9] = [
    (237, 229, 218), // 2
    (238, 225, 201), // 4
    (243, 178, 122), // 8
    (246, 150, 101), // 16
    (247, 124, 95),  // 32
    (247, 95, 59),   // 64
    (237, 208, 115), // 128
    (237, 204, 99),  // 256
    (236, 202, 80),  // 512
];

/// Fill for a palette index; anything past the table reuses the last entry.
#[inline]
pub fn tile_color_for_index(i: usize) -> Color {
    let (r, g, b) = TILE_COLORS[i.min(TILE_COLORS.len() - 1)];
    Color::srgb_u8(r, g, b)
}
