//! Grid directions.
//!
//! [`Direction::CARDINALS`] holds the four orthogonal steps and
//! [`Direction::OUTWARDS`] all eight, cardinals first. [`Direction::None`]
//! is the "stay put" sentinel appended to shuffled direction lists.

use crate::geom::Point;

/// One step on the grid. Y grows down, so `Up` is `(0, -1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    None,
}

impl Direction {
    /// The four orthogonal directions.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// All eight directions: the cardinals, then the diagonals.
    pub const OUTWARDS: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The (dx, dy) offset of one step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
            Direction::None => (0, 0),
        }
    }

    /// The offset of one step as a point.
    #[inline]
    pub const fn offset(self) -> Point {
        let (dx, dy) = self.delta();
        Point::new(dx, dy)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }
}
