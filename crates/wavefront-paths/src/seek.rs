use std::collections::HashSet;

use rand::Rng;
use wavefront_core::Point;

use crate::DijkstraMap;
use crate::error::PathError;
use crate::path::{Path, PathRequest, PathStatus};
use crate::scan::ScanParams;
use crate::walk::Heading;

impl<R: Rng> DijkstraMap<R> {
    /// Walk from `req.start` toward the nearest of `targets`.
    ///
    /// The field is rebuilt from scratch with `targets` as the only goals.
    /// Targets inside walls or outside the level are ignored; if none is
    /// left the path is empty with [`PathStatus::NoTargets`].
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use wavefront_core::Point;
    /// use wavefront_paths::{DijkstraMap, MapConfig, PathRequest, PathStatus};
    ///
    /// let mut map = DijkstraMap::from_text(
    ///     StdRng::seed_from_u64(1),
    ///     MapConfig::default(),
    ///     "....\n.##.\n....",
    /// )
    /// .unwrap();
    /// let path = map
    ///     .find_path(&PathRequest::new(Point::new(0, 1), 10), &[Point::new(3, 1)])
    ///     .unwrap();
    /// assert_eq!(path.status, PathStatus::Arrived);
    /// assert_eq!(path.len(), 5);
    /// ```
    pub fn find_path(
        &mut self,
        req: &PathRequest<'_>,
        targets: &[Point],
    ) -> Result<Path, PathError> {
        self.find_path_large(req, 1, targets)
    }

    /// [`find_path`](Self::find_path) for a creature covering a
    /// `size × size` square anchored at `req.start`. A target is reached
    /// once any footprint cell covers it.
    pub fn find_path_large(
        &mut self,
        req: &PathRequest<'_>,
        size: i32,
        targets: &[Point],
    ) -> Result<Path, PathError> {
        let params = ScanParams::new(self.config.measurement)
            .size(size)
            .limit(req.effective_scan_limit());
        self.extract(req, Heading::Seek, params.size, |map, ctx, blocked| {
            map.clear_goals();
            map.reset_map();
            let mut any = false;
            for &t in targets {
                any |= map.add_target(t);
            }
            if any {
                map.run_scan(ctx, blocked, params);
            }
            Ok(any)
        })
    }

    /// Walk the current field downhill from `target` to a goal, without
    /// rescanning. The steps are returned in the order a creature standing
    /// on that goal would take them, ending at `target`.
    ///
    /// Call after setting goals and scanning. Useful when many actors head
    /// for the same spot: scan once from the spot, then trace each actor.
    pub fn find_path_prescanned(&mut self, target: Point) -> Result<Path, PathError> {
        self.ensure_initialized()?;
        if self.idx(target).is_none() {
            return Err(PathError::OutOfBounds(target));
        }
        self.path.clear();
        if self.goals.is_empty() {
            return Ok(Path::empty(PathStatus::NoTargets));
        }
        let limit = self.config.prescanned_limit;
        let path = self.trace_back(target, limit);
        self.path.clone_from(&path.steps);
        Ok(path)
    }

    /// Descend from `from` to a zero cell or goal, then reverse the trail so
    /// that it leads from there back to `from`. The goal cell itself is not
    /// part of the result; `from` is.
    pub(crate) fn trace_back(&mut self, from: Point, limit: usize) -> Path {
        let none = HashSet::new();
        let mut trail = Vec::new();
        let mut dirs = Vec::with_capacity(9);
        let mut cur = from;
        let status = loop {
            if self.at_goal(cur) {
                break PathStatus::Arrived;
            }
            if trail.len() >= limit {
                log::warn!("trace from {from} frustrated after {limit} steps");
                break PathStatus::Frustrated;
            }
            let Some(next) = self.best_step(cur, 1, &none, &trail, &mut dirs) else {
                break PathStatus::Stalled;
            };
            trail.push(cur);
            cur = next;
        };
        trail.reverse();
        Path::new(trail, status)
    }
}
