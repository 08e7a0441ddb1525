use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use wavefront_core::{Direction, Point};

use crate::DijkstraMap;
use crate::error::PathError;
use crate::gradient::Gradient;
use crate::los::{LineOfSight, ResistanceMap, Visibility};
use crate::measurement::Measurement;
use crate::path::{AttackRange, Path, PathRequest, Threat};
use crate::scan::{ScanContext, ScanParams};
use crate::walk::Heading;

/// Range checks treat diagonals as one step, like the grid does.
fn probe_measurement(m: Measurement) -> Measurement {
    match m {
        Measurement::Euclidean => Measurement::Chebyshev,
        other => other,
    }
}

impl<R: Rng> DijkstraMap<R> {
    /// Walk toward the nearest cell from which some target is within
    /// `range` and, when `los` is given, in line of sight.
    ///
    /// Range is measured along the scanned field, so walls and costs
    /// lengthen it. The walk ends on an attack position, not on a target.
    pub fn find_attack_path(
        &mut self,
        req: &PathRequest<'_>,
        range: AttackRange,
        los: Option<&dyn LineOfSight>,
        targets: &[Point],
    ) -> Result<Path, PathError> {
        self.find_attack_path_large(req, 1, range, los, targets)
    }

    /// Footprint-aware [`find_attack_path`](Self::find_attack_path). Line
    /// of sight may be drawn from any cell of the footprint.
    pub fn find_attack_path_large(
        &mut self,
        req: &PathRequest<'_>,
        size: i32,
        range: AttackRange,
        los: Option<&dyn LineOfSight>,
        targets: &[Point],
    ) -> Result<Path, PathError> {
        let measurement = self.config.measurement;
        let params = ScanParams::new(measurement)
            .size(size)
            .limit(req.effective_scan_limit());
        let res = match los {
            Some(_) => Some(self.resistance_map()?),
            None => None,
        };
        self.extract(req, Heading::Seek, params.size, |map, ctx, blocked| {
            if !map.scan_targets(ctx, blocked, params, targets) {
                return Ok(false);
            }
            let size = params.size;
            let candidates: Vec<usize> = (0..map.gradient.len())
                .filter(|&i| {
                    let Gradient::Dist(d) = map.gradient[i] else {
                        return false;
                    };
                    if !range.contains(d) {
                        return false;
                    }
                    let (Some(los), Some(res)) = (los, res.as_ref()) else {
                        return true;
                    };
                    let anchor = map.point(i);
                    footprint(anchor, size).any(|p| {
                        targets.iter().any(|&t| los.is_reachable(res, p, t))
                    })
                })
                .collect();
            map.retarget(candidates.into_iter().map(|i| (i, 0.0)));
            map.run_scan(ctx, blocked, params.anchored());
            Ok(true)
        })
    }

    /// Attack-position seeking that also prefers cover from `threats`.
    ///
    /// Attack positions are cells within `range` of a target. Unless
    /// `seek_distant_goals` is set they must also see a target through
    /// `vis`. Closer-to-max positions are slightly preferred. When the
    /// positions are out of reach this turn, the field is blended with
    /// the distance to cells no threat can see (plus the safety overlay),
    /// weighted by `cover_preference`, so the walk favours hidden routes.
    #[allow(clippy::too_many_arguments)]
    pub fn find_covered_attack_path(
        &mut self,
        req: &PathRequest<'_>,
        range: AttackRange,
        cover_preference: f64,
        vis: &dyn Visibility,
        seek_distant_goals: bool,
        threats: &[Threat],
        targets: &[Point],
    ) -> Result<Path, PathError> {
        let measurement = self.config.measurement;
        let params = ScanParams::new(measurement).limit(req.effective_scan_limit());
        let res = self.resistance_map()?;
        let shape = measurement.matching_radius();

        let mut target_view = HashSet::new();
        if !seek_distant_goals {
            let mut buf = Vec::new();
            for &t in targets {
                vis.visible(&res, t, range.max, shape, &mut buf);
            }
            target_view.extend(buf.into_iter().filter_map(|p| self.idx(p)));
        }
        let hidden = self.hidden_cells(&res, vis, threats);

        self.extract(req, Heading::Seek, 1, |map, ctx, blocked| {
            if !map.scan_targets(ctx, blocked, params, targets) {
                return Ok(false);
            }
            let weighted: Vec<(usize, f64)> = map
                .gradient
                .iter()
                .enumerate()
                .filter_map(|(i, g)| {
                    let d = g.dist()?;
                    let visible = seek_distant_goals || target_view.contains(&i);
                    (range.contains(d) && visible).then(|| (i, 0.001 * (range.max as f64 - d)))
                })
                .collect();
            map.retarget(weighted.iter().copied());
            map.run_scan(ctx, blocked, params);

            let beyond_reach = map
                .gradient_at(req.start)
                .is_some_and(|g| g > Gradient::Dist(req.length as f64));
            if beyond_reach && !weighted.is_empty() {
                if let Some(hidden) = hidden.as_ref() {
                    map.blend_cover(ctx, blocked, params, hidden, req.length, cover_preference);
                }
            }
            Ok(true)
        })
    }

    /// Rebuild the field with `targets` as goals, measuring range the
    /// way attacks do. Returns `false` if no target is usable.
    fn scan_targets(
        &mut self,
        ctx: &mut ScanContext,
        blocked: &HashSet<Point>,
        params: ScanParams,
        targets: &[Point],
    ) -> bool {
        self.clear_goals();
        self.reset_map();
        let mut any = false;
        for &t in targets {
            any |= self.add_target(t);
        }
        if any {
            let probe = ScanParams {
                measurement: probe_measurement(params.measurement),
                ..params
            };
            self.run_scan(ctx, blocked, probe);
        }
        any
    }

    /// Replace every distance and goal by the given goals.
    fn retarget(&mut self, goals: impl IntoIterator<Item = (usize, f64)>) {
        self.clear_goals();
        for g in self.gradient.iter_mut() {
            if g.dist().is_some() {
                *g = Gradient::Unreached;
            }
        }
        for (i, v) in goals {
            self.pin_goal(i, v);
        }
    }

    /// Cells no threat can see, or `None` when there are no threats. Seen
    /// cells are grown by one step so hiding spots keep a margin.
    fn hidden_cells(
        &self,
        res: &ResistanceMap,
        vis: &dyn Visibility,
        threats: &[Threat],
    ) -> Option<Vec<usize>> {
        if threats.is_empty() {
            return None;
        }
        let shape = self.config.measurement.matching_radius();
        let mut seen = vec![false; self.range.len()];
        let mut buf = Vec::new();
        for t in threats {
            buf.clear();
            vis.visible(res, t.position, t.max_reach, shape, &mut buf);
            for &p in &buf {
                if shape.distance(t.position, p) < t.min_reach as f64 {
                    continue;
                }
                for dir in Direction::OUTWARDS.into_iter().chain([Direction::None]) {
                    if let Some(i) = self.idx(p.step(dir)) {
                        seen[i] = true;
                    }
                }
            }
        }
        Some(
            (0..seen.len())
                .filter(|&i| !seen[i] && !self.physical[i].is_wall())
                .collect(),
        )
    }

    /// Blend the current attack field with the distance to cover. The
    /// attack term is scaled so that it always dominates one step of cover.
    fn blend_cover(
        &mut self,
        ctx: &mut ScanContext,
        blocked: &HashSet<Point>,
        params: ScanParams,
        hidden: &[usize],
        length: i32,
        cover_preference: f64,
    ) {
        let stored = self.gradient.clone();
        let goals: BTreeMap<usize, f64> = std::mem::take(&mut self.goals);

        self.reset_map();
        let cover: Vec<Option<f64>> = if hidden.is_empty() {
            vec![None; stored.len()]
        } else {
            for &i in hidden {
                self.pin_goal(i, 0.0);
            }
            self.run_scan(ctx, blocked, params);
            self.gradient.iter().map(|g| g.dist()).collect()
        };
        self.clear_goals();

        let scale = 2.0 * (length as f64 + 1.0);
        let fallback = length as f64;
        for (i, g) in self.gradient.iter_mut().enumerate() {
            *g = match stored[i] {
                Gradient::Dist(s) => Gradient::Dist(
                    s * scale + (cover[i].unwrap_or(fallback) + self.safety[i]) * cover_preference,
                ),
                other => other,
            };
        }
        // No rescan: relaxing from the goals again would flatten the blend.
        for (i, v) in goals {
            self.pin_goal(i, v);
        }
        log::debug!("cover blended into attack field over {} hidden cells", hidden.len());
    }
}

fn footprint(anchor: Point, size: i32) -> impl Iterator<Item = Point> {
    (0..size).flat_map(move |dy| (0..size).map(move |dx| anchor.shift(dx, dy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::los::{BresenhamLos, SightVisibility};
    use crate::path::PathStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn level(text: &str, seed: u64) -> DijkstraMap<StdRng> {
        DijkstraMap::from_text(StdRng::seed_from_u64(seed), MapConfig::default(), text).unwrap()
    }

    #[test]
    fn stops_at_preferred_range() {
        let mut map = level("..........", 1);
        let req = PathRequest::new(Point::ZERO, 20);
        let target = [Point::new(9, 0)];
        let path = map
            .find_attack_path(&req, AttackRange::new(2, 3), None, &target)
            .unwrap();
        assert_eq!(path.status, PathStatus::Arrived);
        assert_eq!(path.last(), Some(Point::new(6, 0)));
    }

    #[test]
    fn already_in_range_stays_put() {
        let mut map = level("..........", 1);
        let req = PathRequest::new(Point::new(7, 0), 20);
        let path = map
            .find_attack_path(&req, AttackRange::new(1, 3), None, &[Point::new(9, 0)])
            .unwrap();
        assert!(path.is_empty());
        assert_eq!(path.status, PathStatus::Arrived);
    }

    #[test]
    fn line_of_sight_filters_positions() {
        let text = "
.....
.....
..#..
.....
.....";
        let mut map = level(text, 2);
        let req = PathRequest::new(Point::new(2, 0), 20);
        let target = [Point::new(2, 4)];
        let los = BresenhamLos;
        let path = map
            .find_attack_path(&req, AttackRange::exact(4), Some(&los), &target)
            .unwrap();
        let end = path.last().expect("moved");
        assert_eq!(map.gradient_at(end), Some(Gradient::GOAL));
        let res = map.resistance_map().unwrap();
        assert!(los.is_reachable(&res, end, target[0]));
    }

    #[test]
    fn blocked_sight_rejects_in_range_cells() {
        // (0,0) is in range but the pillar hides the target from it.
        let text = "
....
.#..
....";
        let mut map = level(text, 2);
        let req = PathRequest::new(Point::ZERO, 10);
        let target = [Point::new(2, 2)];
        let open = map
            .find_attack_path(&req, AttackRange::new(3, 4), None, &target)
            .unwrap();
        assert!(open.is_empty());
        let sighted = map
            .find_attack_path(&req, AttackRange::new(3, 4), Some(&BresenhamLos), &target)
            .unwrap();
        assert_eq!(sighted.last(), Some(Point::new(3, 0)));
    }

    #[test]
    fn euclidean_ranges_count_diagonals_as_one() {
        let config = MapConfig::with_measurement(Measurement::Euclidean);
        let open = ".....\n.....\n.....\n.....\n.....";
        let mut map = DijkstraMap::from_text(StdRng::seed_from_u64(3), config, open).unwrap();
        let req = PathRequest::new(Point::new(4, 4), 10);
        let path = map
            .find_attack_path(&req, AttackRange::exact(2), None, &[Point::ZERO])
            .unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(Point::new(2, 2)));
    }

    #[test]
    fn large_attackers_use_any_footprint_cell() {
        let mut map = level("......\n......\n......", 4);
        let req = PathRequest::new(Point::new(4, 1), 20);
        let path = map
            .find_attack_path_large(&req, 2, AttackRange::exact(1), None, &[Point::new(0, 0)])
            .unwrap();
        assert_eq!(path.status, PathStatus::Arrived);
        let end = path.last().unwrap();
        assert_eq!(map.gradient_at(end), Some(Gradient::GOAL));
    }

    #[test]
    fn attack_without_targets() {
        let mut map = level(".....", 1);
        let req = PathRequest::new(Point::ZERO, 3);
        let path = map.find_attack_path(&req, AttackRange::exact(1), None, &[]).unwrap();
        assert_eq!(path.status, PathStatus::NoTargets);
    }

    #[test]
    fn covered_path_reaches_a_visible_position() {
        let text = "
..........
..........
....#.....
..........";
        let mut map = level(text, 5);
        let vis = SightVisibility::new(BresenhamLos);
        let req = PathRequest::new(Point::new(0, 0), 30);
        let target = [Point::new(9, 2)];
        let path = map
            .find_covered_attack_path(&req, AttackRange::new(2, 3), 1.0, &vis, false, &[], &target)
            .unwrap();
        assert_eq!(path.status, PathStatus::Arrived);
        let end = path.last().unwrap();
        assert!(map.goals().any(|(p, _)| p == end));
    }

    #[test]
    fn covered_path_prefers_hidden_route() {
        // Two corridors to the target area; the threat watches the top one.
        let text = "
.........
.#######.
.........";
        let threat = [Threat::new(Point::new(4, 0), 0, 8)];
        let vis = SightVisibility::new(BresenhamLos);
        let req = PathRequest::new(Point::new(0, 1), 2);
        let target = [Point::new(8, 1)];
        for seed in 0..6 {
            let mut map = level(text, seed);
            let range = AttackRange::exact(0);
            let path = map
                .find_covered_attack_path(&req, range, 5.0, &vis, true, &threat, &target)
                .unwrap();
            assert_eq!(path.steps[0], Point::new(0, 2), "seed {seed}");
        }
    }

    #[test]
    fn hidden_cells_skip_walls_and_seen_margin() {
        let map = level(".....\n.....\n.....", 1);
        let res = map.resistance_map().unwrap();
        let vis = SightVisibility::new(BresenhamLos);
        let hidden = map
            .hidden_cells(&res, &vis, &[Threat::new(Point::ZERO, 0, 1)])
            .unwrap();
        // Seen: the 3 cells within reach 1 (diamond), grown by one.
        assert!(!hidden.contains(&map.idx(Point::new(2, 0)).unwrap()));
        assert!(!hidden.contains(&map.idx(Point::new(1, 1)).unwrap()));
        assert!(hidden.contains(&map.idx(Point::new(3, 0)).unwrap()));
        assert!(hidden.contains(&map.idx(Point::new(4, 2)).unwrap()));
        assert!(map.hidden_cells(&res, &vis, &[]).is_none());
    }
}
