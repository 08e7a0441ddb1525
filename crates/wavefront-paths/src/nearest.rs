use std::collections::{BTreeMap, HashSet};
use std::ops::ControlFlow;

use rand::Rng;
use wavefront_core::Point;

use crate::DijkstraMap;
use crate::error::PathError;
use crate::path::{Path, PathStatus};
use crate::scan::{ScanContext, ScanParams};

impl<R> DijkstraMap<R> {
    /// The target closest to `start` in wavefront order, or `start` itself
    /// if it is one of the targets. `None` if no target can be reached.
    ///
    /// The scan starts at `start` and stops as soon as a target is touched,
    /// so nearby targets are cheap to find on large levels. Afterwards
    /// `start` is the only goal and the field holds the partial scan.
    pub fn find_nearest(
        &mut self,
        start: Point,
        targets: &[Point],
    ) -> Result<Option<Point>, PathError> {
        Ok(self.find_nearest_multiple(start, 1, targets)?.into_iter().next())
    }

    /// Up to `limit` distinct targets in the order the wavefront from
    /// `start` reaches them. `start` comes first if it is a target.
    pub fn find_nearest_multiple(
        &mut self,
        start: Point,
        limit: usize,
        targets: &[Point],
    ) -> Result<Vec<Point>, PathError> {
        self.ensure_initialized()?;
        let s = self.idx(start).ok_or(PathError::OutOfBounds(start))?;
        let mut wanted: HashSet<usize> = targets
            .iter()
            .filter_map(|&t| self.idx(t))
            .filter(|&i| !self.physical[i].is_wall())
            .collect();
        let mut found = Vec::new();
        if limit == 0 {
            return Ok(found);
        }
        if wanted.remove(&s) {
            found.push(start);
        }
        if found.len() >= limit || wanted.is_empty() || self.physical[s].is_wall() {
            return Ok(found);
        }

        self.clear_goals();
        self.reset_map();
        self.pin_goal(s, 0.0);
        let range = self.range;
        let params = ScanParams::new(self.config.measurement);
        self.scan_until(&mut ScanContext::new(), &HashSet::new(), params, |i| {
            if wanted.remove(&i) {
                found.push(range.point_at(i));
                if found.len() >= limit {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        });
        Ok(found)
    }

    /// Distances from the nearest of `starts` to every cell at most
    /// `radius` wavefront passes away, keyed by position.
    ///
    /// Goals are cleared afterwards; the gradient keeps the fill.
    pub fn flood_fill(
        &mut self,
        radius: usize,
        starts: &[Point],
    ) -> Result<BTreeMap<Point, f64>, PathError> {
        self.ensure_initialized()?;
        self.clear_goals();
        self.reset_map();
        for &s in starts {
            self.add_target(s);
        }
        if self.goals.is_empty() {
            return Ok(BTreeMap::new());
        }
        let params = ScanParams::new(self.config.measurement).limit(Some(radius));
        self.run_scan(&mut ScanContext::new(), &HashSet::new(), params);
        let filled = self
            .gradient
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.dist().map(|d| (self.point(i), d)))
            .collect();
        self.clear_goals();
        Ok(filled)
    }
}

impl<R: Rng> DijkstraMap<R> {
    /// Path from `start` to the nearest of `targets`, found by
    /// [`find_nearest`](Self::find_nearest) and traced back over the same
    /// partial scan. The path ends on the target.
    pub fn find_shortcut_path(
        &mut self,
        start: Point,
        targets: &[Point],
    ) -> Result<Path, PathError> {
        let nearest = self.find_nearest(start, targets)?;
        self.path.clear();
        let usable = targets
            .iter()
            .any(|&t| self.idx(t).is_some_and(|i| !self.physical[i].is_wall()));
        let path = match nearest {
            None if !usable => Path::empty(PathStatus::NoTargets),
            None => Path::empty(PathStatus::Stalled),
            Some(t) if t == start => Path::empty(PathStatus::Arrived),
            Some(t) => self.trace_back(t, self.config.frustration_limit),
        };
        self.path.clone_from(&path.steps);
        Ok(path)
    }
}
