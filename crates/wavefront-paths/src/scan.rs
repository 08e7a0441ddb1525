use std::collections::HashSet;
use std::ops::ControlFlow;

use wavefront_core::Point;

use crate::DijkstraMap;
use crate::error::PathError;
use crate::gradient::Gradient;
use crate::measurement::Measurement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Open,
    /// Goal cell: keeps its value, still radiates.
    Pinned,
    /// Wall, occupied, impassable or footprint-blocked.
    Blocked,
}

/// Scratch buffers for one in-flight scan.
///
/// A context belongs to a single scan call at a time. Keeping one around
/// and passing it to [`DijkstraMap::scan_with`] avoids reallocating the
/// buffers on every turn.
#[derive(Debug, Default)]
pub struct ScanContext {
    state: Vec<CellState>,
    queued: Vec<bool>,
    frontier: Vec<usize>,
    fresh: Vec<usize>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, len: usize) {
        self.state.clear();
        self.state.resize(len, CellState::Open);
        self.queued.clear();
        self.queued.resize(len, false);
        self.frontier.clear();
        self.fresh.clear();
    }
}

/// How a scan relaxes: metric, creature footprint and pass bound.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScanParams {
    pub(crate) measurement: Measurement,
    pub(crate) size: i32,
    pub(crate) limit: Option<usize>,
    /// Goals name footprint anchors rather than cells to be covered.
    pub(crate) anchored: bool,
}

impl ScanParams {
    pub(crate) fn new(measurement: Measurement) -> Self {
        Self {
            measurement,
            size: 1,
            limit: None,
            anchored: false,
        }
    }

    pub(crate) fn size(mut self, size: i32) -> Self {
        self.size = size.max(1);
        self
    }

    pub(crate) fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn anchored(mut self) -> Self {
        self.anchored = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Relaxed {
    pub(crate) passes: usize,
    pub(crate) assigned: usize,
    pub(crate) stopped: bool,
}

impl<R> DijkstraMap<R> {
    /// Relax the field outward from the current goals.
    ///
    /// Every open cell reachable from a goal ends up holding its weighted
    /// distance to the nearest goal; open cells that cannot be reached
    /// become [`Gradient::Dark`]. `impassable` cells are closed for this
    /// scan only. Without goals the field is returned unchanged.
    ///
    /// The scan starts from the current working field rather than the
    /// physical map, so occupied cells and pre-seeded values are honoured.
    /// Call [`reset_map`](Self::reset_map) first for a clean slate.
    pub fn scan(&mut self, impassable: &[Point]) -> Result<&[Gradient], PathError> {
        self.scan_with(&mut ScanContext::new(), impassable)
    }

    /// [`scan`](Self::scan) using caller-owned scratch buffers.
    pub fn scan_with(
        &mut self,
        ctx: &mut ScanContext,
        impassable: &[Point],
    ) -> Result<&[Gradient], PathError> {
        let params = ScanParams::new(self.config.measurement);
        self.public_scan(ctx, impassable, params)
    }

    /// Like [`scan`](Self::scan) but stops after `limit` relaxation passes.
    /// Cells further out than that are left [`Gradient::Dark`].
    pub fn partial_scan(
        &mut self,
        limit: usize,
        impassable: &[Point],
    ) -> Result<&[Gradient], PathError> {
        let params = ScanParams::new(self.config.measurement).limit(Some(limit));
        self.public_scan(&mut ScanContext::new(), impassable, params)
    }

    /// Scan for a creature occupying a `size × size` square anchored at its
    /// top-left cell. Anchors whose footprint would leave the level or
    /// overlap a wall or impassable cell are marked [`Gradient::Dark`].
    pub fn scan_large(
        &mut self,
        impassable: &[Point],
        size: i32,
    ) -> Result<&[Gradient], PathError> {
        let params = ScanParams::new(self.config.measurement).size(size);
        self.public_scan(&mut ScanContext::new(), impassable, params)
    }

    /// Footprint-aware [`partial_scan`](Self::partial_scan).
    pub fn partial_scan_large(
        &mut self,
        limit: usize,
        impassable: &[Point],
        size: i32,
    ) -> Result<&[Gradient], PathError> {
        let params = ScanParams::new(self.config.measurement)
            .size(size)
            .limit(Some(limit));
        self.public_scan(&mut ScanContext::new(), impassable, params)
    }

    fn public_scan(
        &mut self,
        ctx: &mut ScanContext,
        impassable: &[Point],
        params: ScanParams,
    ) -> Result<&[Gradient], PathError> {
        self.ensure_initialized()?;
        if self.goals.is_empty() {
            log::debug!("scan skipped: no goals");
            return Ok(&self.gradient);
        }
        let blocked: HashSet<Point> = impassable.iter().copied().collect();
        self.run_scan(ctx, &blocked, params);
        Ok(&self.gradient)
    }

    /// Full scan pipeline: close cells, pin goals, relax, flag the dark.
    pub(crate) fn run_scan(
        &mut self,
        ctx: &mut ScanContext,
        blocked: &HashSet<Point>,
        params: ScanParams,
    ) -> Relaxed {
        self.scan_until(ctx, blocked, params, |_| ControlFlow::Continue(()))
    }

    /// [`run_scan`](Self::run_scan) that hands every assigned cell to
    /// `visit`, which may end the scan early.
    pub(crate) fn scan_until(
        &mut self,
        ctx: &mut ScanContext,
        blocked: &HashSet<Point>,
        params: ScanParams,
        visit: impl FnMut(usize) -> ControlFlow<()>,
    ) -> Relaxed {
        ctx.reset(self.gradient.len());
        for (g, state) in self.gradient.iter_mut().zip(ctx.state.iter_mut()) {
            match *g {
                Gradient::Dark => *g = Gradient::Unreached,
                Gradient::Wall => *state = CellState::Blocked,
                _ => {}
            }
        }
        for &p in blocked {
            if let Some(i) = self.idx(p) {
                ctx.state[i] = CellState::Blocked;
            }
        }
        if params.size > 1 {
            self.block_footprints(ctx, params.size);
        }
        self.pin_goals(ctx, params);

        let relaxed = self.relax_field(ctx, params.measurement, params.limit, visit);
        self.darken_unreached();
        self.mapped = self.gradient.iter().filter(|g| g.dist().is_some()).count();
        log::debug!(
            "scan finished: {} passes, {} updates, {} cells mapped, size {}{}{}",
            relaxed.passes,
            relaxed.assigned,
            self.mapped,
            params.size,
            if params.limit.is_some() { " (partial)" } else { "" },
            if relaxed.stopped { " (stopped early)" } else { "" }
        );
        relaxed
    }

    /// Close every anchor whose footprint is not entirely open.
    fn block_footprints(&mut self, ctx: &mut ScanContext, size: i32) {
        let closed: Vec<bool> = ctx
            .state
            .iter()
            .map(|&s| s == CellState::Blocked)
            .collect();
        for a in 0..self.gradient.len() {
            let anchor = self.point(a);
            let fits = (0..size).all(|dy| {
                (0..size).all(|dx| self.idx(anchor.shift(dx, dy)).is_some_and(|j| !closed[j]))
            });
            if !fits {
                ctx.state[a] = CellState::Blocked;
                if !self.gradient[a].is_wall() {
                    self.gradient[a] = Gradient::Dark;
                }
            }
        }
    }

    /// Pin goal values. With a footprint, a goal cell is reached by every
    /// clear anchor whose square covers it, unless the goals are anchors.
    fn pin_goals(&mut self, ctx: &mut ScanContext, params: ScanParams) {
        let size = params.size;
        for (&g, &value) in &self.goals {
            if size <= 1 || params.anchored {
                if size <= 1 || ctx.state[g] != CellState::Blocked {
                    self.gradient[g] = Gradient::Dist(value);
                    ctx.state[g] = CellState::Pinned;
                }
                continue;
            }
            let gp = self.range.point_at(g);
            for dy in 0..size {
                for dx in 0..size {
                    let Some(a) = self.range.index_of(gp.shift(-dx, -dy)) else {
                        continue;
                    };
                    if ctx.state[a] != CellState::Blocked {
                        self.gradient[a] = Gradient::Dist(value);
                        ctx.state[a] = CellState::Pinned;
                    }
                }
            }
        }
    }

    pub(crate) fn darken_unreached(&mut self) {
        for g in self.gradient.iter_mut() {
            if *g == Gradient::Unreached {
                *g = Gradient::Dark;
            }
        }
    }

    /// Wavefront relaxation over the cells of `ctx`.
    ///
    /// Every cell holding a distance seeds the first frontier. Each pass
    /// relaxes the neighbours of the frontier; cells whose value strictly
    /// drops form the next frontier. `visit` sees every cell as it is
    /// assigned and may stop the scan early.
    fn relax_field(
        &mut self,
        ctx: &mut ScanContext,
        measurement: Measurement,
        limit: Option<usize>,
        mut visit: impl FnMut(usize) -> ControlFlow<()>,
    ) -> Relaxed {
        ctx.frontier.clear();
        ctx.frontier.extend((0..self.gradient.len()).filter(|&i| {
            ctx.state[i] != CellState::Blocked && self.gradient[i].dist().is_some()
        }));
        let dirs = measurement.directions();
        let blocking = self.config.blocking();
        let mut out = Relaxed::default();

        while !ctx.frontier.is_empty() {
            if limit.is_some_and(|l| out.passes >= l) {
                break;
            }
            out.passes += 1;
            for k in 0..ctx.frontier.len() {
                let c = ctx.frontier[k];
                let Gradient::Dist(d) = self.gradient[c] else {
                    continue;
                };
                let cp = self.range.point_at(c);
                for &dir in dirs {
                    let np = cp.step(dir);
                    let Some(n) = self.range.index_of(np) else {
                        continue;
                    };
                    if ctx.state[n] != CellState::Open {
                        continue;
                    }
                    if blocking > 0 && dir.is_diagonal() {
                        // Both orthogonal cells lie inside the level.
                        let side = |p: Point| {
                            self.range
                                .index_of(p)
                                .is_some_and(|j| ctx.state[j] == CellState::Blocked)
                        };
                        let walls = side(Point::new(np.x, cp.y)) as u8
                            + side(Point::new(cp.x, np.y)) as u8;
                        if walls >= blocking {
                            continue;
                        }
                    }
                    let cs = d + measurement.heuristic(dir) * self.cost[n];
                    let improves = match self.gradient[n] {
                        Gradient::Unreached => true,
                        Gradient::Dist(v) => cs < v,
                        _ => false,
                    };
                    if !improves {
                        continue;
                    }
                    self.gradient[n] = Gradient::Dist(cs);
                    out.assigned += 1;
                    if !ctx.queued[n] {
                        ctx.queued[n] = true;
                        ctx.fresh.push(n);
                    }
                    if visit(n).is_break() {
                        out.stopped = true;
                        return out;
                    }
                }
            }
            std::mem::swap(&mut ctx.frontier, &mut ctx.fresh);
            ctx.fresh.clear();
            for &i in &ctx.frontier {
                ctx.queued[i] = false;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::cmp::Ordering;
    use std::collections::BinaryHeap;

    fn open_map(w: i32, h: i32, config: MapConfig) -> DijkstraMap<StdRng> {
        let mut map = DijkstraMap::with_config(StdRng::seed_from_u64(3), config);
        map.initialize_with(w, h, |_| false).unwrap();
        map
    }

    fn dist(map: &DijkstraMap<StdRng>, x: i32, y: i32) -> Option<f64> {
        map.gradient_at(Point::new(x, y)).and_then(Gradient::dist)
    }

    /// Heap entry ordered so that `BinaryHeap` pops the smallest cost.
    #[derive(PartialEq)]
    struct Entry {
        cost: f64,
        idx: usize,
    }

    impl Eq for Entry {}

    impl Ord for Entry {
        fn cmp(&self, other: &Self) -> Ordering {
            other.cost.total_cmp(&self.cost)
        }
    }

    impl PartialOrd for Entry {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    /// Reference multi-source Dijkstra over the same move rules.
    fn oracle(map: &DijkstraMap<StdRng>, goals: &[Point]) -> Vec<Option<f64>> {
        let m = map.measurement();
        let blocking = map.config().blocking();
        let mut best = vec![None; map.range.len()];
        let mut open = BinaryHeap::new();
        for &g in goals {
            let i = map.idx(g).unwrap();
            best[i] = Some(0.0);
            open.push(Entry { cost: 0.0, idx: i });
        }
        while let Some(Entry { cost, idx }) = open.pop() {
            if best[idx].is_some_and(|b| cost > b) {
                continue;
            }
            let cp = map.point(idx);
            for &dir in m.directions() {
                let np = cp.step(dir);
                if map.is_wall(np) {
                    continue;
                }
                if blocking > 0 && dir.is_diagonal() {
                    let walls = map.is_wall(Point::new(np.x, cp.y)) as u8
                        + map.is_wall(Point::new(cp.x, np.y)) as u8;
                    if walls >= blocking {
                        continue;
                    }
                }
                let n = map.idx(np).unwrap();
                let next = cost + m.heuristic(dir) * map.cost[n];
                if best[n].is_none_or(|b| next < b) {
                    best[n] = Some(next);
                    open.push(Entry { cost: next, idx: n });
                }
            }
        }
        best
    }

    fn random_level(seed: u64, config: MapConfig) -> (DijkstraMap<StdRng>, Vec<Point>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let walls: Vec<bool> = (0..100).map(|_| rng.random_range(0..100) < 25).collect();
        let mut map = DijkstraMap::with_config(StdRng::seed_from_u64(seed), config);
        map.initialize_with(10, 10, |p| walls[(p.y * 10 + p.x) as usize])
            .unwrap();
        for p in map.range().iter() {
            let c = rng.random_range(1..4) as f64;
            map.set_cost(p, c).unwrap();
        }
        let mut goals = Vec::new();
        while goals.len() < 3 {
            let p = Point::new(rng.random_range(0..10), rng.random_range(0..10));
            if !map.is_wall(p) && !goals.contains(&p) {
                goals.push(p);
            }
        }
        (map, goals)
    }

    fn check_against_oracle(measurement: Measurement, blocking: u8) {
        for seed in 0..20 {
            let config = MapConfig {
                blocking_requirement: blocking,
                ..MapConfig::with_measurement(measurement)
            };
            let (mut map, goals) = random_level(seed, config);
            map.set_goals(goals.iter().copied()).unwrap();
            map.scan(&[]).unwrap();
            let expected = oracle(&map, &goals);
            for (i, want) in expected.iter().enumerate() {
                let got = map.gradient[i];
                match want {
                    Some(d) => {
                        assert_eq!(got, Gradient::Dist(*d), "seed {seed} cell {}", map.point(i))
                    }
                    None if map.physical[i].is_wall() => assert_eq!(got, Gradient::Wall),
                    None => assert_eq!(got, Gradient::Dark, "seed {seed} cell {}", map.point(i)),
                }
            }
        }
    }

    #[test]
    fn manhattan_matches_reference_dijkstra() {
        check_against_oracle(Measurement::Manhattan, 2);
    }

    #[test]
    fn chebyshev_matches_reference_dijkstra() {
        check_against_oracle(Measurement::Chebyshev, 2);
        check_against_oracle(Measurement::Chebyshev, 1);
        check_against_oracle(Measurement::Chebyshev, 0);
    }

    #[test]
    fn goals_keep_their_value() {
        let mut map = open_map(6, 6, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        map.set_goal(Point::new(5, 5)).unwrap();
        map.scan(&[]).unwrap();
        assert_eq!(dist(&map, 0, 0), Some(0.0));
        assert_eq!(dist(&map, 5, 5), Some(0.0));
        assert_eq!(dist(&map, 2, 1), Some(3.0));
        assert_eq!(dist(&map, 4, 3), Some(3.0));
    }

    #[test]
    fn two_equidistant_goals_under_chebyshev() {
        let mut map = open_map(5, 5, MapConfig::with_measurement(Measurement::Chebyshev));
        map.set_goals([Point::new(0, 0), Point::new(4, 4)]).unwrap();
        map.scan(&[]).unwrap();
        assert_eq!(dist(&map, 2, 2), Some(2.0));
    }

    #[test]
    fn euclidean_weighs_diagonals() {
        let mut map = open_map(4, 4, MapConfig::with_measurement(Measurement::Euclidean));
        map.set_goal(Point::new(0, 0)).unwrap();
        map.scan(&[]).unwrap();
        let d = dist(&map, 2, 2).unwrap();
        assert!((d - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(dist(&map, 3, 0), Some(3.0));
    }

    #[test]
    fn enclosed_cells_go_dark() {
        let mut map = DijkstraMap::from_text(
            StdRng::seed_from_u64(1),
            MapConfig::default(),
            "
.....
.###.
.#.#.
.###.
.....",
        )
        .unwrap();
        map.set_goal(Point::new(0, 0)).unwrap();
        map.scan(&[]).unwrap();
        assert_eq!(map.gradient_at(Point::new(2, 2)), Some(Gradient::Dark));
        assert_eq!(map.gradient_at(Point::new(1, 1)), Some(Gradient::Wall));
        assert_eq!(dist(&map, 4, 4), Some(8.0));
    }

    #[test]
    fn impassable_cells_block_for_one_scan() {
        let mut map = open_map(3, 3, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        let wall = [Point::new(1, 0), Point::new(1, 1)];
        map.scan(&wall).unwrap();
        assert_eq!(dist(&map, 2, 0), Some(6.0));
        assert_eq!(map.gradient_at(Point::new(1, 0)), Some(Gradient::Dark));
        map.scan(&[]).unwrap();
        assert_eq!(dist(&map, 2, 0), Some(2.0));
        assert_eq!(dist(&map, 1, 0), Some(1.0));
    }

    #[test]
    fn occupied_cells_stay_closed() {
        let mut map = open_map(3, 1, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        map.set_occupied(Point::new(1, 0)).unwrap();
        map.scan(&[]).unwrap();
        assert_eq!(map.gradient_at(Point::new(2, 0)), Some(Gradient::Dark));
    }

    #[test]
    fn scan_is_idempotent() {
        let (mut map, goals) = random_level(11, MapConfig::default());
        map.set_goals(goals).unwrap();
        let impassable = [Point::new(4, 4), Point::new(5, 4)];
        let first = map.scan(&impassable).unwrap().to_vec();
        let second = map.scan(&impassable).unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn scan_without_goals_leaves_field_untouched() {
        let mut map = open_map(3, 3, MapConfig::default());
        let before = map.gradient().to_vec();
        assert_eq!(map.scan(&[]).unwrap(), &before[..]);
        assert_eq!(map.mapped_count(), 0);
    }

    #[test]
    fn costs_weigh_the_entered_cell() {
        let mut map = open_map(4, 1, MapConfig::default());
        map.set_cost(Point::new(2, 0), 5.0).unwrap();
        map.set_goal(Point::new(0, 0)).unwrap();
        map.scan(&[]).unwrap();
        assert_eq!(dist(&map, 1, 0), Some(1.0));
        assert_eq!(dist(&map, 2, 0), Some(6.0));
        assert_eq!(dist(&map, 3, 0), Some(7.0));
        assert_eq!(map.mapped_count(), 4);
    }

    #[test]
    fn blocking_requirement_controls_corner_cutting() {
        let level = "
..
#.";
        for (req, expect) in [(0u8, 1.0), (1, 2.0), (2, 1.0)] {
            let config = MapConfig {
                blocking_requirement: req,
                ..MapConfig::with_measurement(Measurement::Chebyshev)
            };
            let mut map = DijkstraMap::from_text(StdRng::seed_from_u64(1), config, level).unwrap();
            map.set_goal(Point::new(0, 0)).unwrap();
            map.scan(&[]).unwrap();
            // (0,0) -> (1,1) cuts between the wall at (0,1) and open (1,0).
            assert_eq!(dist(&map, 1, 1), Some(expect), "requirement {req}");
        }
    }

    #[test]
    fn squeezing_between_two_walls_needs_requirement_zero() {
        let level = "
.#
#.";
        for (req, expect) in [(0u8, Some(1.0)), (1, None), (2, None)] {
            let config = MapConfig {
                blocking_requirement: req,
                ..MapConfig::with_measurement(Measurement::Chebyshev)
            };
            let mut map = DijkstraMap::from_text(StdRng::seed_from_u64(1), config, level).unwrap();
            map.set_goal(Point::new(0, 0)).unwrap();
            map.scan(&[]).unwrap();
            assert_eq!(dist(&map, 1, 1), expect, "requirement {req}");
        }
    }

    #[test]
    fn partial_scan_stops_after_limit_passes() {
        let mut map = open_map(9, 1, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        map.partial_scan(3, &[]).unwrap();
        assert_eq!(dist(&map, 3, 0), Some(3.0));
        assert_eq!(map.gradient_at(Point::new(4, 0)), Some(Gradient::Dark));
    }

    #[test]
    fn preseeded_values_relax_downhill() {
        let mut map = open_map(5, 1, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        let i = map.idx(Point::new(4, 0)).unwrap();
        map.gradient[i] = Gradient::Dist(-10.0);
        map.scan(&[]).unwrap();
        assert_eq!(dist(&map, 0, 0), Some(0.0));
        assert_eq!(dist(&map, 4, 0), Some(-10.0));
        assert_eq!(dist(&map, 3, 0), Some(-9.0));
        assert_eq!(dist(&map, 1, 0), Some(-7.0));
    }

    #[test]
    fn footprint_scan_closes_tight_anchors() {
        let mut map = DijkstraMap::from_text(
            StdRng::seed_from_u64(1),
            MapConfig::default(),
            "
......
......
....#.
......",
        )
        .unwrap();
        map.set_goal(Point::new(0, 0)).unwrap();
        map.scan_large(&[], 2).unwrap();
        // Anchors touching the wall or the level edge cannot hold a 2x2 body.
        let tight = [
            Point::new(3, 1),
            Point::new(4, 1),
            Point::new(3, 2),
            Point::new(5, 0),
            Point::new(0, 3),
        ];
        for p in tight {
            assert_eq!(map.gradient_at(p), Some(Gradient::Dark), "{p}");
        }
        assert_eq!(map.gradient_at(Point::new(4, 2)), Some(Gradient::Wall));
        assert_eq!(dist(&map, 0, 0), Some(0.0));
        assert_eq!(dist(&map, 2, 2), Some(4.0));
        assert_eq!(dist(&map, 4, 0), Some(4.0));
    }

    #[test]
    fn footprint_goals_pin_covering_anchors() {
        let mut map = open_map(5, 5, MapConfig::default());
        map.set_goal(Point::new(3, 3)).unwrap();
        map.scan_large(&[], 2).unwrap();
        for p in [Point::new(2, 2), Point::new(3, 2), Point::new(2, 3), Point::new(3, 3)] {
            assert_eq!(dist(&map, p.x, p.y), Some(0.0), "{p}");
        }
        assert_eq!(dist(&map, 0, 0), Some(4.0));
        assert_eq!(map.gradient_at(Point::new(4, 4)), Some(Gradient::Dark));
    }

    #[test]
    fn large_scan_respects_impassable_footprints() {
        let mut map = open_map(4, 4, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        map.scan_large(&[Point::new(2, 2)], 2).unwrap();
        for p in [Point::new(1, 1), Point::new(2, 1), Point::new(1, 2), Point::new(2, 2)] {
            assert_eq!(map.gradient_at(p), Some(Gradient::Dark), "{p}");
        }
        assert_eq!(dist(&map, 2, 0), Some(2.0));
    }

    #[test]
    fn caller_owned_context_is_reusable() {
        let mut ctx = ScanContext::new();
        let mut map = open_map(4, 4, MapConfig::default());
        map.set_goal(Point::new(0, 0)).unwrap();
        let a = map.scan_with(&mut ctx, &[]).unwrap().to_vec();
        map.reset_map();
        let b = map.scan_with(&mut ctx, &[]).unwrap().to_vec();
        assert_eq!(a, b);
    }
}
