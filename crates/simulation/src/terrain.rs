//! Immutable elevation model the water expands over.
//!
//! Each cell holds a small non-negative elevation level, or `None` for cells
//! that water can never enter (cave walls).

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, GridShape};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainModel {
    shape: GridShape,
    levels: Vec<Option<u32>>,
    max_level: u32,
    min_level: u32,
}

impl TerrainModel {
    /// Build a terrain from row-major levels.
    ///
    /// Panics if `levels.len()` does not match the shape; terrains are built
    /// once at startup from generator output of the right size.
    pub fn new(shape: GridShape, levels: Vec<Option<u32>>) -> Self {
        assert_eq!(
            levels.len(),
            shape.len(),
            "terrain has {} cells but shape is {}x{}",
            levels.len(),
            shape.width,
            shape.height
        );
        let passable = levels.iter().flatten();
        let max_level = passable.clone().copied().max().unwrap_or(0);
        let min_level = passable.copied().min().unwrap_or(0);
        Self {
            shape,
            levels,
            max_level,
            min_level,
        }
    }

    /// Every cell passable at the same elevation.
    pub fn flat(shape: GridShape, level: u32) -> Self {
        Self::new(shape, vec![Some(level); shape.len()])
    }

    /// Build from rows, top row first. All rows must have equal length.
    pub fn from_rows(rows: &[&[Option<u32>]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let levels: Vec<Option<u32>> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(GridShape::new(width, height), levels)
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Elevation at `coord`; `None` when impassable or out of bounds.
    #[inline]
    pub fn elevation(&self, coord: Coord) -> Option<u32> {
        if !self.shape.in_bounds(coord) {
            return None;
        }
        self.levels[self.shape.index(coord)]
    }

    #[inline]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.elevation(coord).is_some()
    }

    /// Highest passable elevation (0 when nothing is passable).
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    /// Number of distinct elevation steps, `max - min + 1`.
    pub fn level_span(&self) -> u32 {
        self.max_level - self.min_level + 1
    }

    pub fn passable_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }

    pub fn levels(&self) -> &[Option<u32>] {
        &self.levels
    }
}
