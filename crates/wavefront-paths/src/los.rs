//! Line-of-sight and visibility collaborators used by the attack queries.

use wavefront_core::{Point, Radius, Range};

/// Per-cell light resistance: 1.0 blocks sight, 0.0 is transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistanceMap {
    range: Range,
    cells: Vec<f64>,
}

impl ResistanceMap {
    /// Build a map over `range` from row-major wall flags.
    pub fn from_walls(range: Range, walls: impl IntoIterator<Item = bool>) -> Self {
        let mut cells: Vec<f64> = walls
            .into_iter()
            .map(|w| if w { 1.0 } else { 0.0 })
            .collect();
        cells.resize(range.len(), 0.0);
        Self { range, cells }
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Resistance at `p`. Outside the map everything is opaque.
    #[inline]
    pub fn at(&self, p: Point) -> f64 {
        self.range.index_of(p).map_or(1.0, |i| self.cells[i])
    }
}

/// Decides whether one cell can be seen, or shot, from another.
pub trait LineOfSight {
    fn is_reachable(&self, res: &ResistanceMap, from: Point, to: Point) -> bool;
}

impl<F> LineOfSight for F
where
    F: Fn(&ResistanceMap, Point, Point) -> bool,
{
    fn is_reachable(&self, res: &ResistanceMap, from: Point, to: Point) -> bool {
        self(res, from, to)
    }
}

/// Bresenham line check. Only the cells strictly between the endpoints
/// can block, so a wall can see and be seen by its neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct BresenhamLos;

impl LineOfSight for BresenhamLos {
    fn is_reachable(&self, res: &ResistanceMap, from: Point, to: Point) -> bool {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx - dy;
        let mut cur = from;

        while cur != to {
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                cur.x += sx;
            }
            if e2 < dx {
                err += dx;
                cur.y += sy;
            }
            if cur != to && res.at(cur) >= 1.0 {
                return false;
            }
        }
        true
    }
}

/// A source of visibility sets: which cells can be seen from a point.
pub trait Visibility {
    /// Append to `buf` every cell visible from `from` within `reach` under
    /// `shape`, including `from` itself.
    fn visible(
        &self,
        res: &ResistanceMap,
        from: Point,
        reach: i32,
        shape: Radius,
        buf: &mut Vec<Point>,
    );
}

/// Visibility derived from a line-of-sight oracle by testing every cell in
/// the reach.
#[derive(Debug, Clone, Copy, Default)]
pub struct SightVisibility<L> {
    pub los: L,
}

impl<L: LineOfSight> SightVisibility<L> {
    pub fn new(los: L) -> Self {
        Self { los }
    }
}

impl<L: LineOfSight> Visibility for SightVisibility<L> {
    fn visible(
        &self,
        res: &ResistanceMap,
        from: Point,
        reach: i32,
        shape: Radius,
        buf: &mut Vec<Point>,
    ) {
        if reach < 0 {
            return;
        }
        let window = Range::new(
            from.x.saturating_sub(reach),
            from.y.saturating_sub(reach),
            from.x.saturating_add(reach).saturating_add(1),
            from.y.saturating_add(reach).saturating_add(1),
        )
        .intersect(res.range());
        buf.extend(
            window
                .iter()
                .filter(|&p| shape.within(from, p, reach) && self.los.is_reachable(res, from, p)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillar() -> ResistanceMap {
        // 5x5, one opaque cell in the middle.
        let range = Range::with_size(5, 5);
        ResistanceMap::from_walls(range, range.iter().map(|p| p == Point::new(2, 2)))
    }

    #[test]
    fn outside_is_opaque() {
        let res = pillar();
        assert_eq!(res.at(Point::new(-1, 0)), 1.0);
        assert_eq!(res.at(Point::new(2, 2)), 1.0);
        assert_eq!(res.at(Point::new(1, 2)), 0.0);
    }

    #[test]
    fn bresenham_is_blocked_by_intermediate_cells() {
        let res = pillar();
        let los = BresenhamLos;
        assert!(!los.is_reachable(&res, Point::new(0, 2), Point::new(4, 2)));
        assert!(!los.is_reachable(&res, Point::new(0, 0), Point::new(4, 4)));
        assert!(los.is_reachable(&res, Point::new(0, 0), Point::new(4, 0)));
        // Endpoints never block.
        assert!(los.is_reachable(&res, Point::new(1, 2), Point::new(2, 2)));
        assert!(los.is_reachable(&res, Point::new(3, 3), Point::new(3, 3)));
    }

    #[test]
    fn closures_are_oracles() {
        let res = pillar();
        let never = |_: &ResistanceMap, a: Point, b: Point| a == b;
        assert!(!never.is_reachable(&res, Point::ZERO, Point::new(1, 0)));
        assert!(never.is_reachable(&res, Point::ZERO, Point::ZERO));
    }

    #[test]
    fn sight_visibility_respects_shape_and_walls() {
        let res = pillar();
        let vis = SightVisibility::new(BresenhamLos);
        let mut buf = Vec::new();
        vis.visible(&res, Point::new(0, 2), 4, Radius::Diamond, &mut buf);
        assert!(buf.contains(&Point::new(0, 2)));
        assert!(buf.contains(&Point::new(2, 2)));
        assert!(!buf.contains(&Point::new(4, 2)));
        assert!(!buf.contains(&Point::new(4, 4)));
        assert!(buf.contains(&Point::new(2, 0)));

        buf.clear();
        vis.visible(&res, Point::new(0, 0), 1, Radius::Square, &mut buf);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn unbounded_reach_covers_the_map() {
        let res = pillar();
        let vis = SightVisibility::new(BresenhamLos);
        let mut buf = Vec::new();
        vis.visible(&res, Point::new(4, 4), i32::MAX, Radius::Circle, &mut buf);
        assert!(buf.contains(&Point::new(4, 0)));
        assert!(buf.contains(&Point::new(0, 4)));
        assert!(!buf.contains(&Point::new(0, 0)));
        let mut bounded = Vec::new();
        vis.visible(&res, Point::new(4, 4), 8, Radius::Circle, &mut bounded);
        assert_eq!(buf, bounded);
    }
}
