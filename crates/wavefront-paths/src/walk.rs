use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use wavefront_core::{Direction, Point};

use crate::DijkstraMap;
use crate::error::PathError;
use crate::path::{Path, PathRequest, PathStatus};
use crate::scan::ScanContext;

/// Which way a walk moves through the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Heading {
    /// Descend until a goal is reached.
    Seek,
    /// Descend an inverted field; there is no goal to arrive at.
    Flee,
}

/// How one walk attempt ended.
enum Walked {
    Done(PathStatus),
    /// The budget ran out on an `only_passable` cell.
    Landed(Point),
}

impl<R: Rng> DijkstraMap<R> {
    /// Plan and walk with the bounded retry rule.
    ///
    /// `prepare` builds the field for one attempt with the given blocked
    /// set and returns `false` when there is nothing to walk toward.
    /// Whenever the walk's budget runs out on an `only_passable` cell, that
    /// cell joins the blocked set and the attempt is repeated.
    pub(crate) fn extract(
        &mut self,
        req: &PathRequest<'_>,
        heading: Heading,
        size: i32,
        mut prepare: impl FnMut(
            &mut Self,
            &mut ScanContext,
            &HashSet<Point>,
        ) -> Result<bool, PathError>,
    ) -> Result<Path, PathError> {
        self.ensure_initialized()?;
        self.path.clear();
        if self.idx(req.start).is_none() {
            return Err(PathError::OutOfBounds(req.start));
        }
        if req.length <= 0 {
            return Ok(Path::empty(PathStatus::OutOfMoves));
        }
        let only_passable: HashSet<Point> = req.only_passable.iter().copied().collect();
        let mut blocked: HashSet<Point> = req.impassable.iter().copied().collect();
        if req.length == 1 {
            blocked.extend(&only_passable);
        }

        let mut ctx = ScanContext::new();
        let mut frustration = 0;
        let mut last = Vec::new();
        for attempt in 0..=self.config.max_retries {
            if !prepare(self, &mut ctx, &blocked)? {
                return Ok(Path::empty(PathStatus::NoTargets));
            }
            let (steps, walked) =
                self.walk(req, size, heading, &blocked, &only_passable, &mut frustration);
            match walked {
                Walked::Done(status) => {
                    self.path.clone_from(&steps);
                    return Ok(Path::new(steps, status));
                }
                Walked::Landed(p) => {
                    log::trace!("attempt {attempt} ended on pass-only cell {p}, replanning");
                    blocked.insert(p);
                    last = steps;
                }
            }
        }
        log::warn!(
            "path from {} gave up after {} retries",
            req.start,
            self.config.max_retries
        );
        self.path.clone_from(&last);
        Ok(Path::new(last, PathStatus::RetriesExhausted))
    }

    /// One greedy descent from `req.start` over the current gradient.
    fn walk(
        &mut self,
        req: &PathRequest<'_>,
        size: i32,
        heading: Heading,
        blocked: &HashSet<Point>,
        only_passable: &HashSet<Point>,
        frustration: &mut usize,
    ) -> (Vec<Point>, Walked) {
        let mut steps = Vec::new();
        let mut cur = req.start;
        let mut paid = 0.0;
        if heading == Heading::Seek && self.at_goal(cur) {
            return (steps, Walked::Done(PathStatus::Arrived));
        }
        let mut dirs = Vec::with_capacity(9);
        loop {
            if *frustration >= self.config.frustration_limit {
                log::warn!(
                    "path from {} frustrated after {} steps",
                    req.start,
                    *frustration
                );
                return (steps, Walked::Done(PathStatus::Frustrated));
            }
            let Some(next) = self.best_step(cur, size, blocked, &steps, &mut dirs) else {
                return (steps, Walked::Done(PathStatus::Stalled));
            };
            steps.push(next);
            cur = next;
            *frustration += 1;
            if let Some(c) = self.cost_at(cur) {
                paid += c;
            }
            let at_goal = heading == Heading::Seek && self.at_goal(cur);
            if paid > req.length as f64 - 1.0 {
                let walked = if only_passable.contains(&cur) {
                    Walked::Landed(cur)
                } else if at_goal {
                    Walked::Done(PathStatus::Arrived)
                } else {
                    Walked::Done(PathStatus::OutOfMoves)
                };
                return (steps, walked);
            }
            if at_goal {
                return (steps, Walked::Done(PathStatus::Arrived));
            }
        }
    }

    /// The strictly lowest neighbour of `cur` a `size` footprint may enter,
    /// preferring cells not yet on `visited` once a choice exists.
    ///
    /// Only cells holding a distance take part, `cur` included, and
    /// diagonals obey the same corner rule as the scan.
    pub(crate) fn best_step(
        &mut self,
        cur: Point,
        size: i32,
        blocked: &HashSet<Point>,
        visited: &[Point],
        dirs: &mut Vec<Direction>,
    ) -> Option<Point> {
        dirs.clear();
        dirs.extend_from_slice(self.config.measurement.directions());
        dirs.shuffle(&mut self.rng);
        dirs.push(Direction::None);

        let mut best = self.gradient_at(cur).filter(|g| g.dist().is_some())?;
        let blocking = self.config.blocking();
        let mut choice = None;
        for &dir in dirs.iter() {
            let np = cur.step(dir);
            let Some(v) = self.gradient_at(np).filter(|g| g.dist().is_some()) else {
                continue;
            };
            if !self.footprint_fits(np, size, blocked) {
                continue;
            }
            if blocking > 0 && dir.is_diagonal() {
                let walls = self.anchor_closed(Point::new(np.x, cur.y), size, blocked) as u8
                    + self.anchor_closed(Point::new(cur.x, np.y), size, blocked) as u8;
                if walls >= blocking {
                    continue;
                }
            }
            if v < best && (choice.is_none() || !visited.contains(&np)) {
                best = v;
                choice = Some(np);
            }
        }
        choice
    }

    /// Whether a `size` footprint at `anchor` touches the level edge, a
    /// wall, an occupied cell or `blocked`.
    fn anchor_closed(&self, anchor: Point, size: i32, blocked: &HashSet<Point>) -> bool {
        !(0..size).all(|dy| {
            (0..size).all(|dx| {
                let p = anchor.shift(dx, dy);
                self.idx(p)
                    .is_some_and(|i| !self.gradient[i].is_wall() && !blocked.contains(&p))
            })
        })
    }

    pub(crate) fn at_goal(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| {
            self.goals.contains_key(&i) || self.gradient[i].dist() == Some(0.0)
        })
    }
}
