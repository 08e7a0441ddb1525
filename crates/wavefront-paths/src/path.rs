use wavefront_core::Point;

/// Why a path extraction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// The walk reached a goal (or started on one).
    Arrived,
    /// The move budget was spent.
    OutOfMoves,
    /// No neighbour improved on the current cell: an unreachable goal, a
    /// local extremum, or the end of a flee.
    Stalled,
    /// Every target was outside the level or inside a wall.
    NoTargets,
    /// The frustration limit cut the walk short.
    Frustrated,
    /// The walk kept landing on `only_passable` cells until the retry cap.
    RetriesExhausted,
}

/// The result of a path extraction: the steps taken, in walking order and
/// excluding the start cell, plus why the walk ended.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub steps: Vec<Point>,
    pub status: PathStatus,
}

impl Path {
    pub fn new(steps: Vec<Point>, status: PathStatus) -> Self {
        Self { steps, status }
    }

    pub(crate) fn empty(status: PathStatus) -> Self {
        Self::new(Vec::new(), status)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether a loop guard stopped the walk early. The steps gathered up to
    /// that point are still returned.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(
            self.status,
            PathStatus::Frustrated | PathStatus::RetriesExhausted
        )
    }

    /// Final cell of the path, if any step was taken.
    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.steps.last().copied()
    }
}

/// Shared parameters of every path extraction.
///
/// ```
/// use wavefront_core::Point;
/// use wavefront_paths::PathRequest;
///
/// let allies = [Point::new(3, 3)];
/// let req = PathRequest::new(Point::new(1, 1), 6).impassable(&allies).scan_limit(12);
/// assert_eq!(req.length, 6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<'a> {
    pub start: Point,
    /// Move budget, counted in paid cell costs.
    pub length: i32,
    /// Bound on scan passes. `None`, or a bound below `length`, scans the
    /// whole level.
    pub scan_limit: Option<usize>,
    /// Cells that may not be entered at all, e.g. other actors.
    pub impassable: &'a [Point],
    /// Cells that may be walked through but not stopped on.
    pub only_passable: &'a [Point],
}

impl<'a> PathRequest<'a> {
    pub fn new(start: Point, length: i32) -> Self {
        Self {
            start,
            length,
            scan_limit: None,
            impassable: &[],
            only_passable: &[],
        }
    }

    pub fn scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = Some(limit);
        self
    }

    pub fn impassable(mut self, cells: &'a [Point]) -> Self {
        self.impassable = cells;
        self
    }

    pub fn only_passable(mut self, cells: &'a [Point]) -> Self {
        self.only_passable = cells;
        self
    }

    /// The pass bound to scan with, if a partial scan is warranted.
    pub(crate) fn effective_scan_limit(&self) -> Option<usize> {
        match self.scan_limit {
            Some(limit) if limit > 0 && limit as i64 >= self.length as i64 => Some(limit),
            _ => None,
        }
    }
}

/// Preferred distance band for attack-position seeking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRange {
    pub min: i32,
    pub max: i32,
}

impl AttackRange {
    /// A band `[min, max]`, clamped so that `0 <= min <= max`.
    pub fn new(min: i32, max: i32) -> Self {
        let min = min.max(0);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// A band holding exactly one range.
    pub fn exact(range: i32) -> Self {
        Self::new(range, range)
    }

    #[inline]
    pub fn contains(&self, dist: f64) -> bool {
        dist >= self.min as f64 && dist <= self.max as f64
    }
}

/// A hostile position and the distances at which it can strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threat {
    pub position: Point,
    pub min_reach: i32,
    pub max_reach: i32,
}

impl Threat {
    pub fn new(position: Point, min_reach: i32, max_reach: i32) -> Self {
        let min_reach = min_reach.max(0);
        Self {
            position,
            min_reach,
            max_reach: max_reach.max(min_reach),
        }
    }

    /// A melee threat reaching its eight neighbours.
    pub fn melee(position: Point) -> Self {
        Self::new(position, 0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_range_is_clamped() {
        assert_eq!(AttackRange::new(-2, -5), AttackRange { min: 0, max: 0 });
        assert_eq!(AttackRange::new(3, 1), AttackRange { min: 3, max: 3 });
        let r = AttackRange::new(2, 4);
        assert!(r.contains(2.0) && r.contains(4.0));
        assert!(!r.contains(4.5) && !r.contains(1.0));
    }

    #[test]
    fn scan_limit_below_budget_means_full_scan() {
        let req = PathRequest::new(Point::ZERO, 10);
        assert_eq!(req.effective_scan_limit(), None);
        assert_eq!(req.scan_limit(4).effective_scan_limit(), None);
        assert_eq!(req.scan_limit(10).effective_scan_limit(), Some(10));
        assert_eq!(req.scan_limit(0).effective_scan_limit(), None);
    }

    #[test]
    fn truncation_flag() {
        assert!(Path::empty(PathStatus::Frustrated).is_truncated());
        assert!(Path::empty(PathStatus::RetriesExhausted).is_truncated());
        assert!(!Path::empty(PathStatus::Stalled).is_truncated());
    }
}
