//! Per-cell water levels owned by the expansion engine.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, GridShape};

/// Water level per cell (row-major, same shape as the terrain).
///
/// Levels only ever go up: the single mutator adds exactly one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterGrid {
    cells: Vec<u32>,
    shape: GridShape,
}

impl WaterGrid {
    pub fn new(shape: GridShape) -> Self {
        Self {
            cells: vec![0; shape.len()],
            shape,
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Water at `coord`, `None` outside the grid.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<u32> {
        if !self.shape.in_bounds(coord) {
            return None;
        }
        Some(self.cells[self.shape.index(coord)])
    }

    /// Add one unit of water at an in-bounds `coord` and return the new level.
    #[inline]
    pub(crate) fn increment(&mut self, coord: Coord) -> u32 {
        let idx = self.shape.index(coord);
        self.cells[idx] += 1;
        self.cells[idx]
    }

    /// Sum of all water on the grid.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&w| w as u64).sum()
    }

    /// Number of cells holding any water.
    pub fn wet_cells(&self) -> usize {
        self.cells.iter().filter(|&&w| w > 0).count()
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}
