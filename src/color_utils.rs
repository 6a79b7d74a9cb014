//! Palette color selection for labels.
//!
//! Colors come from a fixed categorical palette. Indices past the palette
//! length cycle through a tinted and then a shaded copy of it, which triples
//! the number of distinct colors before they repeat.

use crate::constants::{COLOR_PALETTE, SHADE_RATIO, TINT_RATIO};

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// Move `rgb` toward `base` by `ratio` (0.0 keeps `rgb`, 1.0 yields `base`).
pub fn blend_color(rgb: [u8; 3], base: [u8; 3], ratio: f32) -> [u8; 3] {
    std::array::from_fn(|i| {
        let from = f32::from(rgb[i]);
        let to = f32::from(base[i]);
        (from + ((to - from) * ratio).round()).clamp(0.0, 255.0) as u8
    })
}

/// Pick the palette color for an index.
pub fn pick_color_palette(index: u64) -> [u8; 3] {
    let len = COLOR_PALETTE.len() as u64;
    let rgb = COLOR_PALETTE[(index % len) as usize];
    match (index / len) % 3 {
        1 => blend_color(rgb, WHITE, TINT_RATIO),
        2 => blend_color(rgb, BLACK, SHADE_RATIO),
        _ => rgb,
    }
}
