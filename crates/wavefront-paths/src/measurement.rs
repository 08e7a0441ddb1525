use wavefront_core::{Direction, Point, Radius};

use crate::distance::{chebyshev, euclidean, manhattan};

/// The distance metric a [`DijkstraMap`](crate::DijkstraMap) relaxes with.
///
/// | Variant | Directions | Diagonal step weight | Radius shape |
/// |---|---|---|---|
/// | `Manhattan` | 4 cardinals | (none) | diamond |
/// | `Chebyshev` | 8 outward | 1.0 | square |
/// | `Euclidean` | 8 outward | √2 | circle |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Measurement {
    #[default]
    Manhattan,
    Chebyshev,
    Euclidean,
}

impl Measurement {
    /// Weight added per unit of cost when relaxing one step in `dir`.
    #[inline]
    pub fn heuristic(self, dir: Direction) -> f64 {
        if self == Measurement::Euclidean && dir.is_diagonal() {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// The direction set iterated during relaxation and descent.
    #[inline]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Measurement::Manhattan => &Direction::CARDINALS,
            Measurement::Chebyshev | Measurement::Euclidean => &Direction::OUTWARDS,
        }
    }

    /// Straight-line distance under this metric.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Measurement::Manhattan => manhattan(a, b) as f64,
            Measurement::Chebyshev => chebyshev(a, b) as f64,
            Measurement::Euclidean => euclidean(a, b),
        }
    }

    /// The field-of-view radius shape with the same notion of "within r".
    pub fn matching_radius(self) -> Radius {
        match self {
            Measurement::Manhattan => Radius::Diamond,
            Measurement::Chebyshev => Radius::Square,
            Measurement::Euclidean => Radius::Circle,
        }
    }

    /// Inverse of [`matching_radius`](Self::matching_radius).
    pub fn from_radius(radius: Radius) -> Self {
        match radius {
            Radius::Diamond => Measurement::Manhattan,
            Radius::Square => Measurement::Chebyshev,
            Radius::Circle => Measurement::Euclidean,
        }
    }
}
