use std::collections::HashSet;

use rand::Rng;
use wavefront_core::Point;

use crate::DijkstraMap;
use crate::error::PathError;
use crate::gradient::Gradient;
use crate::path::{Path, PathRequest};
use crate::scan::ScanParams;
use crate::walk::Heading;

/// Inputs that fully determine an inverted flee field.
#[derive(Debug, Clone, PartialEq)]
struct FleeKey {
    size: i32,
    limit: Option<usize>,
    prefer: u64,
    blocked: Vec<Point>,
    fears: Vec<Point>,
}

impl FleeKey {
    fn new(params: ScanParams, prefer: f64, blocked: &HashSet<Point>, fears: &[Point]) -> Self {
        let mut blocked: Vec<Point> = blocked.iter().copied().collect();
        blocked.sort_unstable();
        let mut fears = fears.to_vec();
        fears.sort_unstable();
        fears.dedup();
        Self {
            size: params.size,
            limit: params.limit,
            prefer: prefer.to_bits(),
            blocked,
            fears,
        }
    }
}

/// The last inverted flee field, reused while its inputs stay the same.
#[derive(Debug, Clone)]
pub(crate) struct FleeCache {
    key: FleeKey,
    gradient: Vec<Gradient>,
    goals: Vec<(usize, f64)>,
}

impl<R: Rng> DijkstraMap<R> {
    /// Walk away from every cell in `fears`.
    ///
    /// The field toward the fear sources is scanned, every distance is
    /// multiplied by `-prefer_longer_paths` and the result is rescanned, so
    /// the walk heads for cells that are both far away and not dead ends.
    /// Factors above 1.0 trade a longer escape for a safer destination.
    ///
    /// The inverted field is cached. Repeating the call with the same
    /// footprint, scan limit, factor, impassable set and fear sources skips
    /// both scans.
    pub fn find_flee_path(
        &mut self,
        req: &PathRequest<'_>,
        prefer_longer_paths: f64,
        fears: &[Point],
    ) -> Result<Path, PathError> {
        self.find_flee_path_large(req, 1, prefer_longer_paths, fears)
    }

    /// Footprint-aware [`find_flee_path`](Self::find_flee_path).
    pub fn find_flee_path_large(
        &mut self,
        req: &PathRequest<'_>,
        size: i32,
        prefer_longer_paths: f64,
        fears: &[Point],
    ) -> Result<Path, PathError> {
        let params = ScanParams::new(self.config.measurement)
            .size(size)
            .limit(req.effective_scan_limit());
        self.extract(req, Heading::Flee, params.size, |map, ctx, blocked| {
            let key = FleeKey::new(params, prefer_longer_paths, blocked, fears);
            if let Some(cache) = map.flee_cache.as_ref().filter(|c| c.key == key) {
                log::trace!("flee field reused for {} fear sources", key.fears.len());
                map.gradient.clone_from(&cache.gradient);
                map.goals = cache.goals.iter().copied().collect();
                return Ok(true);
            }
            map.clear_goals();
            map.reset_map();
            let mut any = false;
            for &f in fears {
                any |= map.add_target(f);
            }
            if !any {
                return Ok(false);
            }
            map.run_scan(ctx, blocked, params);
            for g in map.gradient.iter_mut() {
                if let Gradient::Dist(d) = *g {
                    *g = Gradient::Dist(d * -prefer_longer_paths);
                }
            }
            map.run_scan(ctx, blocked, params);
            map.flee_cache = Some(FleeCache {
                key,
                gradient: map.gradient.clone(),
                goals: map.goals.iter().map(|(&i, &v)| (i, v)).collect(),
            });
            Ok(true)
        })
    }
}
