// ---------------------------------------------------------------------------
// FloodError: failures raised by the frontier queue and expansion engine
// ---------------------------------------------------------------------------

use std::fmt;

use crate::grid::Coord;

/// Errors raised while expanding water over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodError {
    /// A frontier push carried no level: the coordinate is impassable and
    /// should never have been offered to the queue. Always a logic defect.
    InvalidLevel { coord: Coord },
    /// The frontier had no pending candidates when popped.
    FrontierExhausted,
    /// A coordinate outside the grid was handed to the engine.
    OutOfBounds { coord: Coord },
}

impl fmt::Display for FloodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloodError::InvalidLevel { coord } => {
                write!(f, "Invalid level: cell {coord} has no elevation")
            }
            FloodError::FrontierExhausted => write!(f, "Frontier is empty"),
            FloodError::OutOfBounds { coord } => write!(f, "Cell {coord} is outside the grid"),
        }
    }
}

impl std::error::Error for FloodError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flood_error_display_invalid_level() {
        let err = FloodError::InvalidLevel {
            coord: Coord::new(3, 4),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Invalid level"), "got: {msg}");
        assert!(msg.contains("(3, 4)"), "got: {msg}");
    }

    #[test]
    fn test_flood_error_display_exhausted() {
        let msg = format!("{}", FloodError::FrontierExhausted);
        assert!(msg.contains("empty"), "got: {msg}");
    }

    #[test]
    fn test_flood_error_is_error_trait() {
        let err = FloodError::OutOfBounds {
            coord: Coord::new(99, 0),
        };
        assert!(std::error::Error::source(&err).is_none());
        assert!(format!("{err:?}").contains("OutOfBounds"));
    }
}
