//! Radius shapes used by field-of-view code.

use crate::geom::Point;

/// The shape traced by "everything within distance r" of a point.
///
/// `Square` is the Chebyshev ball, `Diamond` the Manhattan ball and
/// `Circle` the Euclidean disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radius {
    #[default]
    Square,
    Diamond,
    Circle,
}

impl Radius {
    /// Distance between `a` and `b` under this shape.
    pub fn distance(self, a: Point, b: Point) -> f64 {
        let dx = (a.x - b.x).abs() as f64;
        let dy = (a.y - b.y).abs() as f64;
        match self {
            Radius::Square => dx.max(dy),
            Radius::Diamond => dx + dy,
            Radius::Circle => (dx * dx + dy * dy).sqrt(),
        }
    }

    /// Whether `b` lies within `reach` of `a` under this shape.
    #[inline]
    pub fn within(self, a: Point, b: Point, reach: i32) -> bool {
        self.distance(a, b) <= reach as f64 + 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_measure_diagonals_differently() {
        let o = Point::ZERO;
        let d = Point::new(3, 4);
        assert_eq!(Radius::Square.distance(o, d), 4.0);
        assert_eq!(Radius::Diamond.distance(o, d), 7.0);
        assert_eq!(Radius::Circle.distance(o, d), 5.0);
    }

    #[test]
    fn within_is_inclusive() {
        let o = Point::ZERO;
        assert!(Radius::Circle.within(o, Point::new(3, 4), 5));
        assert!(!Radius::Diamond.within(o, Point::new(3, 4), 6));
        assert!(Radius::Square.within(o, Point::new(-2, 2), 2));
    }
}
