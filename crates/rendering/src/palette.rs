//! Tile colours.
//!
//! Each function takes a level already normalised by the caller (roughly
//! `[0, 1]`, clamped here) and returns an sRGB colour.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

const GROUND: [f32; 3] = [0.5, 0.45, 0.45];
const WAVE: [f32; 3] = [0.7, 0.7, 1.0];
pub const SOURCE_MARKER: Color = Color::srgb(0.6, 0.6, 1.0);
pub const BACKGROUND: Color = Color::srgb(0.05, 0.05, 0.07);

/// Dry ground: darker when low, grey-brown when high.
pub fn ground_color(terrain_level: f32) -> Color {
    let t = terrain_level.clamp(0.0, 1.0);
    Color::srgb(GROUND[0] * t, GROUND[1] * t, GROUND[2] * t)
}

/// Water body: light blue when shallow, fading to deep blue.
pub fn water_color(water_level: f32) -> Color {
    let w = water_level.clamp(0.0, 1.0);
    Color::srgb(0.3 * (1.0 - w), 0.4 * (1.0 - w), (w * FRAC_PI_2).cos())
}

/// Wave strokes brighten as the surface rises towards the cap.
pub fn wave_color(total_level: f32) -> Color {
    let t = total_level.clamp(0.0, 1.0);
    Color::srgb(WAVE[0] * t, WAVE[1] * t, WAVE[2] * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(c: Color) -> [f32; 3] {
        let s = c.to_srgba();
        [s.red, s.green, s.blue]
    }

    #[test]
    fn test_ground_clamps_negative_levels_to_black() {
        assert_eq!(rgb(ground_color(-0.2)), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ground_top_level_is_base_colour() {
        assert_eq!(rgb(ground_color(1.0)), GROUND);
    }

    #[test]
    fn test_deep_water_is_darker_than_shallow() {
        let shallow = rgb(water_color(0.0));
        let deep = rgb(water_color(1.0));
        assert!(shallow[0] > deep[0]);
        assert!(shallow[2] > deep[2]);
        assert_eq!(shallow, [0.3, 0.4, 1.0]);
    }

    #[test]
    fn test_wave_scales_with_level() {
        let low = rgb(wave_color(0.25));
        let high = rgb(wave_color(1.0));
        assert!(high[2] > low[2]);
    }
}
