//! Per-cell tile sprites.
//!
//! One sprite per cell is spawned once the engine exists. Every frame the
//! engine paints the `TileCanvas`, the sprites take their colours from it and
//! wave strokes plus source markers are drawn with gizmos on top.

use bevy::prelude::*;

use simulation::config::CELL_SIZE;
use simulation::grid::{Coord, GridShape};
use simulation::ExpansionEngine;

use crate::drawable::{CellPaint, Drawable, TileCanvas};
use crate::palette;

/// Ground tiles leave a gap so the grid reads as cells.
const GROUND_PADDING: f32 = 0.1;

/// Wave strokes in unit-cell space, as line segments (x right, y down).
const WAVE_SEGMENTS: [[Vec2; 2]; 2] = [
    [Vec2::new(0.0, 0.35), Vec2::new(0.7, 0.15)],
    [Vec2::new(0.3, 0.85), Vec2::new(1.0, 0.65)],
];

const MARKER_OUTLINE: [Vec2; 5] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(1.0, 0.5),
    Vec2::new(0.5, 1.0),
    Vec2::new(0.0, 0.5),
    Vec2::new(0.5, 0.0),
];

#[derive(Component, Debug, Clone, Copy)]
pub struct TileSprite {
    pub coord: Coord,
}

// =============================================================================
// Layout
// =============================================================================

/// World-space size of the whole grid.
pub fn grid_extent(shape: GridShape) -> Vec2 {
    Vec2::new(shape.width as f32, shape.height as f32) * CELL_SIZE
}

/// World position of the top-left corner of `coord`. The grid is centred on
/// the origin with row 0 at the top.
pub fn cell_origin(shape: GridShape, coord: Coord) -> Vec2 {
    let half = grid_extent(shape) / 2.0;
    Vec2::new(
        coord.x as f32 * CELL_SIZE - half.x,
        half.y - coord.y as f32 * CELL_SIZE,
    )
}

pub fn cell_center(shape: GridShape, coord: Coord) -> Vec2 {
    cell_origin(shape, coord) + Vec2::new(CELL_SIZE, -CELL_SIZE) / 2.0
}

/// Map a unit-cell point (x right, y down) into world space.
fn cell_point(shape: GridShape, coord: Coord, p: Vec2) -> Vec2 {
    cell_origin(shape, coord) + Vec2::new(p.x, -p.y) * CELL_SIZE
}

/// Cell under a world position, if any.
pub fn world_to_cell(shape: GridShape, world: Vec2) -> Option<Coord> {
    let half = grid_extent(shape) / 2.0;
    let gx = ((world.x + half.x) / CELL_SIZE).floor() as i64;
    let gy = ((half.y - world.y) / CELL_SIZE).floor() as i64;
    shape.contains(gx, gy)
}

// =============================================================================
// Systems
// =============================================================================

pub fn spawn_tiles(
    mut commands: Commands,
    engine: Option<Res<ExpansionEngine>>,
    existing: Query<(), With<TileSprite>>,
) {
    let Some(engine) = engine else {
        return;
    };
    if !existing.is_empty() {
        return;
    }
    let shape = engine.shape();
    for coord in shape.coords() {
        let center = cell_center(shape, coord);
        commands.spawn((
            TileSprite { coord },
            Sprite {
                color: palette::BACKGROUND,
                custom_size: Some(Vec2::splat(CELL_SIZE)),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            Visibility::Hidden,
        ));
    }
    info!("Spawned {} tile sprites", shape.len());
}

pub fn paint_canvas(
    engine: Option<Res<ExpansionEngine>>,
    time: Res<Time>,
    mut canvas: ResMut<TileCanvas>,
) {
    if let Some(engine) = engine {
        engine.draw(time.elapsed_secs(), &mut canvas);
    }
}

pub fn apply_canvas(
    canvas: Res<TileCanvas>,
    mut tiles: Query<(&TileSprite, &mut Sprite, &mut Visibility)>,
) {
    if !canvas.is_changed() {
        return;
    }
    for (tile, mut sprite, mut visibility) in &mut tiles {
        match canvas.get(tile.coord) {
            CellPaint::Hidden => {
                *visibility = Visibility::Hidden;
            }
            CellPaint::Ground { terrain_level } => {
                *visibility = Visibility::Inherited;
                sprite.color = palette::ground_color(terrain_level);
                sprite.custom_size = Some(Vec2::splat(CELL_SIZE * (1.0 - 2.0 * GROUND_PADDING)));
            }
            CellPaint::Water { water_level, .. } => {
                *visibility = Visibility::Inherited;
                sprite.color = palette::water_color(water_level);
                sprite.custom_size = Some(Vec2::splat(CELL_SIZE));
            }
        }
    }
}

pub fn draw_overlays(canvas: Res<TileCanvas>, mut gizmos: Gizmos) {
    let shape = canvas.shape();
    for coord in shape.coords() {
        if let CellPaint::Water {
            wave_level: Some(level),
            ..
        } = canvas.get(coord)
        {
            let color = palette::wave_color(level);
            for [a, b] in WAVE_SEGMENTS {
                gizmos.line_2d(
                    cell_point(shape, coord, a),
                    cell_point(shape, coord, b),
                    color,
                );
            }
        }
    }
    for &coord in canvas.markers() {
        gizmos.linestrip_2d(
            MARKER_OUTLINE.map(|p| cell_point(shape, coord, p)),
            palette::SOURCE_MARKER,
        );
    }
}
