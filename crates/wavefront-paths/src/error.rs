use std::fmt;

use wavefront_core::Point;

/// Errors reported by [`DijkstraMap`](crate::DijkstraMap) operations.
///
/// Unreachable goals, empty target sets and loop guards are not errors;
/// they surface through [`PathStatus`](crate::PathStatus).
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The map was used before a level was loaded.
    Uninitialized,
    /// A coordinate outside the level was given to a mutator.
    OutOfBounds(Point),
    /// A level description could not be used.
    InvalidLevel(String),
    /// Entry costs must be finite and not negative.
    InvalidCost(Point, f64),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("dijkstra map used before a level was loaded"),
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the level"),
            Self::InvalidLevel(why) => write!(f, "invalid level: {why}"),
            Self::InvalidCost(p, c) => {
                write!(f, "cost {c} at {p} must be finite and not negative")
            }
        }
    }
}

impl std::error::Error for PathError {}
