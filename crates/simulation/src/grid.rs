use serde::{Deserialize, Serialize};

/// Integer cell coordinate. `x` is the column, `y` the row (row 0 is the top row).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of a row-major cell grid. Shared by the terrain and water layers
/// so both index the same flat arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }

    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Signed bounds check, for cursor picking and other callers that can
    /// land left of or above the grid.
    pub fn contains(&self, x: i64, y: i64) -> Option<Coord> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(Coord::new(x as usize, y as usize))
    }

    /// Returns up to 4 cardinal neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, coord: Coord) -> ([Coord; 4], usize) {
        let Coord { x, y } = coord;
        let mut result = [Coord::default(); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = Coord::new(x - 1, y);
            count += 1;
        }
        if x + 1 < self.width {
            result[count] = Coord::new(x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = Coord::new(x, y - 1);
            count += 1;
        }
        if y + 1 < self.height {
            result[count] = Coord::new(x, y + 1);
            count += 1;
        }
        (result, count)
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.len()).map(move |i| self.coord(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_coord_roundtrip() {
        let shape = GridShape::new(7, 5);
        for i in 0..shape.len() {
            assert_eq!(shape.index(shape.coord(i)), i);
        }
        assert_eq!(shape.index(Coord::new(3, 2)), 2 * 7 + 3);
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        let shape = GridShape::new(3, 3);
        assert_eq!(shape.neighbors4(Coord::new(0, 0)).1, 2);
        assert_eq!(shape.neighbors4(Coord::new(1, 0)).1, 3);
        assert_eq!(shape.neighbors4(Coord::new(1, 1)).1, 4);
        assert_eq!(shape.neighbors4(Coord::new(2, 2)).1, 2);
    }

    #[test]
    fn test_neighbors_are_orthogonal_and_in_bounds() {
        let shape = GridShape::new(4, 2);
        let (n, count) = shape.neighbors4(Coord::new(3, 1));
        let n = &n[..count];
        assert_eq!(n, &[Coord::new(2, 1), Coord::new(3, 0)]);
        assert!(n.iter().all(|c| shape.in_bounds(*c)));
    }

    #[test]
    fn test_contains_rejects_negative_and_overflow() {
        let shape = GridShape::new(4, 4);
        assert_eq!(shape.contains(-1, 0), None);
        assert_eq!(shape.contains(0, 4), None);
        assert_eq!(shape.contains(3, 3), Some(Coord::new(3, 3)));
    }
}
