//! Draw half of the shared grid/entity contract.
//!
//! A `Drawable` paints itself into a `TileCanvas`: one `CellPaint` per cell
//! plus a list of source markers. The tile systems turn the canvas into sprite
//! colours and gizmo strokes, so anything that can fill a canvas shows up
//! without touching Bevy entities.

use bevy::prelude::*;

use simulation::grid::{Coord, GridShape};
use simulation::ExpansionEngine;

/// What a single tile shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CellPaint {
    /// Impassable cells are not drawn.
    #[default]
    Hidden,
    /// Dry ground, `terrain_level` normalised over the terrain span.
    Ground { terrain_level: f32 },
    /// Water body, with an optional wave stroke over it.
    Water {
        water_level: f32,
        wave_level: Option<f32>,
    },
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TileCanvas {
    shape: GridShape,
    cells: Vec<CellPaint>,
    markers: Vec<Coord>,
}

impl TileCanvas {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            cells: vec![CellPaint::Hidden; shape.len()],
            markers: Vec::new(),
        }
    }

    /// Resize to `shape` and clear every cell and marker.
    pub fn reset(&mut self, shape: GridShape) {
        self.shape = shape;
        self.cells.clear();
        self.cells.resize(shape.len(), CellPaint::Hidden);
        self.markers.clear();
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn paint(&mut self, coord: Coord, paint: CellPaint) {
        if self.shape.in_bounds(coord) {
            let idx = self.shape.index(coord);
            self.cells[idx] = paint;
        }
    }

    pub fn mark_source(&mut self, coord: Coord) {
        self.markers.push(coord);
    }

    pub fn get(&self, coord: Coord) -> CellPaint {
        if !self.shape.in_bounds(coord) {
            return CellPaint::Hidden;
        }
        self.cells[self.shape.index(coord)]
    }

    pub fn cells(&self) -> &[CellPaint] {
        &self.cells
    }

    pub fn markers(&self) -> &[Coord] {
        &self.markers
    }
}

pub trait Drawable {
    /// Paint the current state into `canvas`. `t` is elapsed seconds.
    fn draw(&self, t: f32, canvas: &mut TileCanvas);
}

impl Drawable for ExpansionEngine {
    fn draw(&self, _t: f32, canvas: &mut TileCanvas) {
        let shape = self.shape();
        canvas.reset(shape);

        let terrain = self.terrain();
        let terrain_levels = terrain.level_span() as f32;
        let water_levels = self.water_levels() as f32;
        let wave_range = terrain_levels + 2.0;

        for coord in shape.coords() {
            let Some(elevation) = terrain.elevation(coord) else {
                continue;
            };
            let water = self.water_level(coord) as f32;
            let water_level = (water - 1.0) / water_levels;

            let paint = if self.is_source(coord) {
                canvas.mark_source(coord);
                CellPaint::Water {
                    water_level,
                    wave_level: None,
                }
            } else if water > 0.0 {
                CellPaint::Water {
                    water_level,
                    wave_level: Some((elevation as f32 + water - 1.0) / wave_range),
                }
            } else {
                CellPaint::Ground {
                    terrain_level: (elevation as f32 - 1.0) / terrain_levels,
                }
            };
            canvas.paint(coord, paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::config::EngineSettings;
    use simulation::terrain::TerrainModel;

    fn engine(rows: &[&[Option<u32>]]) -> ExpansionEngine {
        ExpansionEngine::new(TerrainModel::from_rows(rows), EngineSettings::default(), 1)
    }

    #[test]
    fn test_impassable_cells_are_hidden() {
        let e = engine(&[&[Some(1), None]]);
        let mut canvas = TileCanvas::default();
        e.draw(0.0, &mut canvas);
        assert_eq!(canvas.get(Coord::new(1, 0)), CellPaint::Hidden);
        assert!(matches!(canvas.get(Coord::new(0, 0)), CellPaint::Ground { .. }));
    }

    #[test]
    fn test_dry_ground_normalised_over_span() {
        // Span 1..=5 is 5 levels.
        let e = engine(&[&[Some(1), Some(5)]]);
        let mut canvas = TileCanvas::default();
        e.draw(0.0, &mut canvas);
        assert_eq!(
            canvas.get(Coord::new(1, 0)),
            CellPaint::Ground {
                terrain_level: 4.0 / 5.0
            }
        );
        assert_eq!(
            canvas.get(Coord::new(0, 0)),
            CellPaint::Ground { terrain_level: 0.0 }
        );
    }

    #[test]
    fn test_sources_are_marked_and_drawn_as_water() {
        let mut e = engine(&[&[Some(0), Some(0)]]);
        e.add_source(Coord::new(0, 0)).unwrap();
        let mut canvas = TileCanvas::default();
        e.draw(0.0, &mut canvas);
        assert_eq!(canvas.markers(), &[Coord::new(0, 0)]);
        assert!(matches!(
            canvas.get(Coord::new(0, 0)),
            CellPaint::Water {
                wave_level: None,
                ..
            }
        ));
    }

    #[test]
    fn test_wet_cells_get_wave_levels() {
        let mut e = engine(&[&[Some(0), Some(0)]]);
        e.add_source(Coord::new(0, 0)).unwrap();
        e.water_step(1).unwrap();
        e.water_step(1).unwrap();
        // (1, 0) now holds one unit over level 0: wave (0 + 1 - 1) / (1 + 2).
        let mut canvas = TileCanvas::default();
        e.draw(0.0, &mut canvas);
        assert_eq!(
            canvas.get(Coord::new(1, 0)),
            CellPaint::Water {
                water_level: 0.0,
                wave_level: Some(0.0)
            }
        );
    }

    #[test]
    fn test_redraw_clears_old_markers() {
        let mut e = engine(&[&[Some(0), Some(0)]]);
        e.add_source(Coord::new(1, 0)).unwrap();
        let mut canvas = TileCanvas::default();
        e.draw(0.0, &mut canvas);
        e.draw(0.5, &mut canvas);
        assert_eq!(canvas.markers().len(), 1);
    }
}
