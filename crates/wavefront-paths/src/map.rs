use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use wavefront_core::{Point, Range};

use crate::config::MapConfig;
use crate::error::PathError;
use crate::flee::FleeCache;
use crate::gradient::Gradient;
use crate::los::ResistanceMap;
use crate::measurement::Measurement;

/// A multi-goal weighted distance field over a rectangular level.
///
/// The map owns three layers of per-cell state:
///
/// - the **physical map**, fixed at initialization: `Wall` or `Unreached`;
/// - the **cost map**, a per-cell entry-cost multiplier (default 1.0);
/// - the **gradient**, the working distance field written by scans.
///
/// Goals are pinned in the gradient while a scan relaxes outward from them.
/// Path extraction then walks the gradient greedily from a start cell.
///
/// The physical and cost layers are reference counted. [`fork`](Self::fork)
/// hands out independent maps that share them, so each concurrent caller
/// can own its own mutable gradient.
pub struct DijkstraMap<R> {
    /// Source of the per-step direction shuffle used to break ties.
    pub rng: R,
    pub(crate) config: MapConfig,
    pub(crate) range: Range,
    pub(crate) physical: Arc<[Gradient]>,
    pub(crate) cost: Arc<Vec<f64>>,
    pub(crate) gradient: Vec<Gradient>,
    pub(crate) goals: BTreeMap<usize, f64>,
    pub(crate) safety: Vec<f64>,
    pub(crate) path: Vec<Point>,
    pub(crate) mapped: usize,
    pub(crate) flee_cache: Option<FleeCache>,
    initialized: bool,
}

impl<R> DijkstraMap<R> {
    /// Create an empty map. Every query fails with
    /// [`PathError::Uninitialized`] until a level is loaded.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, MapConfig::default())
    }

    pub fn with_config(rng: R, config: MapConfig) -> Self {
        Self {
            rng,
            config,
            range: Range::default(),
            physical: Arc::from(Vec::new()),
            cost: Arc::new(Vec::new()),
            gradient: Vec::new(),
            goals: BTreeMap::new(),
            safety: Vec::new(),
            path: Vec::new(),
            mapped: 0,
            flee_cache: None,
            initialized: false,
        }
    }

    /// Build a map from text rows in one go.
    /// See [`initialize_from_text`](Self::initialize_from_text).
    pub fn from_text(rng: R, config: MapConfig, text: &str) -> Result<Self, PathError> {
        let mut map = Self::with_config(rng, config);
        map.initialize_from_text(text, None)?;
        Ok(map)
    }

    // -----------------------------------------------------------------------
    // Level loading
    // -----------------------------------------------------------------------

    /// Load a level from text. Lines are rows; `#` and `alternate_wall`
    /// are walls, anything else is floor. Surrounding whitespace of the
    /// whole text is ignored, but every row must have the same width.
    pub fn initialize_from_text(
        &mut self,
        text: &str,
        alternate_wall: Option<char>,
    ) -> Result<&mut Self, PathError> {
        let rows = parse_rows(text)?;
        let height = rows.len() as i32;
        let width = rows[0].len() as i32;
        self.initialize_with(width, height, |p| {
            let ch = rows[p.y as usize][p.x as usize];
            ch == '#' || Some(ch) == alternate_wall
        })
    }

    /// Load a `width × height` level whose walls are given by a predicate.
    pub fn initialize_with(
        &mut self,
        width: i32,
        height: i32,
        is_wall: impl Fn(Point) -> bool,
    ) -> Result<&mut Self, PathError> {
        let range = Range::with_size(width, height);
        if range.is_empty() {
            return Err(PathError::InvalidLevel(format!(
                "level must have a positive size, got {width}x{height}"
            )));
        }
        let physical: Vec<Gradient> = range
            .iter()
            .map(|p| {
                if is_wall(p) {
                    Gradient::Wall
                } else {
                    Gradient::Unreached
                }
            })
            .collect();
        self.load(range, physical, vec![1.0; range.len()]);
        Ok(self)
    }

    /// Load a level from a flat, row-major cost array. A negative or
    /// non-finite cost marks a wall; walls get a stored cost of 1.0.
    pub fn initialize_costs(
        &mut self,
        width: i32,
        height: i32,
        costs: &[f64],
    ) -> Result<&mut Self, PathError> {
        let range = Range::with_size(width, height);
        if range.is_empty() || costs.len() != range.len() {
            return Err(PathError::InvalidLevel(format!(
                "expected {} costs for a {width}x{height} level, got {}",
                range.len(),
                costs.len()
            )));
        }
        let physical = costs
            .iter()
            .map(|&c| {
                if !valid_cost(c) {
                    Gradient::Wall
                } else {
                    Gradient::Unreached
                }
            })
            .collect();
        let cost = costs
            .iter()
            .map(|&c| if valid_cost(c) { c } else { 1.0 })
            .collect();
        self.load(range, physical, cost);
        Ok(self)
    }

    /// Replace the cost overlay from text of the loaded level's size,
    /// mapping every floor character through `cost_of`. The physical map
    /// is left untouched.
    pub fn initialize_cost_from_text(
        &mut self,
        text: &str,
        cost_of: impl Fn(char) -> f64,
    ) -> Result<&mut Self, PathError> {
        self.ensure_initialized()?;
        let rows = parse_rows(text)?;
        if rows.len() as i32 != self.height() || rows[0].len() as i32 != self.width() {
            return Err(PathError::InvalidLevel(format!(
                "cost rows are {}x{}, level is {}x{}",
                rows[0].len(),
                rows.len(),
                self.width(),
                self.height()
            )));
        }
        let mut cost = Vec::with_capacity(self.range.len());
        for (p, g) in self.range.iter().zip(self.physical.iter()) {
            if g.is_wall() {
                cost.push(1.0);
                continue;
            }
            let c = cost_of(rows[p.y as usize][p.x as usize]);
            if !valid_cost(c) {
                return Err(PathError::InvalidCost(p, c));
            }
            cost.push(c);
        }
        self.cost = Arc::new(cost);
        self.flee_cache = None;
        Ok(self)
    }

    fn load(&mut self, range: Range, physical: Vec<Gradient>, cost: Vec<f64>) {
        let len = range.len();
        self.range = range;
        self.gradient = physical.clone();
        self.physical = Arc::from(physical);
        self.cost = Arc::new(cost);
        self.safety = vec![0.0; len];
        self.goals.clear();
        self.path.clear();
        self.mapped = 0;
        self.flee_cache = None;
        self.initialized = true;
    }

    /// An independent map over the same level. Terrain and costs are
    /// shared until either side changes a cost; goals, gradient, safety
    /// overlay and caches start fresh.
    pub fn fork<R2>(&self, rng: R2) -> DijkstraMap<R2> {
        DijkstraMap {
            rng,
            config: self.config,
            range: self.range,
            physical: Arc::clone(&self.physical),
            cost: Arc::clone(&self.cost),
            gradient: self.physical.to_vec(),
            goals: BTreeMap::new(),
            safety: vec![0.0; self.range.len()],
            path: Vec::new(),
            mapped: 0,
            flee_cache: None,
            initialized: self.initialized,
        }
    }

    // -----------------------------------------------------------------------
    // Configuration and accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub(crate) fn ensure_initialized(&self) -> Result<(), PathError> {
        if self.initialized {
            Ok(())
        } else {
            Err(PathError::Uninitialized)
        }
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MapConfig) {
        self.config = config;
        self.flee_cache = None;
    }

    #[inline]
    pub fn measurement(&self) -> Measurement {
        self.config.measurement
    }

    pub fn set_measurement(&mut self, measurement: Measurement) {
        self.config.measurement = measurement;
        self.flee_cache = None;
    }

    pub fn set_blocking_requirement(&mut self, requirement: u8) {
        self.config.blocking_requirement = requirement.min(2);
        self.flee_cache = None;
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// The level rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// The working distance field, row-major.
    #[inline]
    pub fn gradient(&self) -> &[Gradient] {
        &self.gradient
    }

    #[inline]
    pub fn gradient_at(&self, p: Point) -> Option<Gradient> {
        self.idx(p).map(|i| self.gradient[i])
    }

    #[inline]
    pub fn cost_at(&self, p: Point) -> Option<f64> {
        self.idx(p).map(|i| self.cost[i])
    }

    /// Whether `p` is terrain wall. Points outside the level count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.idx(p).is_none_or(|i| self.physical[i].is_wall())
    }

    /// Active goals and their pinned values, in row-major order.
    pub fn goals(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.goals.iter().map(|(&i, &v)| (self.point(i), v))
    }

    /// Steps of the most recent path extraction.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Cells assigned a distance by the most recent scan.
    #[inline]
    pub fn mapped_count(&self) -> usize {
        self.mapped
    }

    /// Resistance grid for line-of-sight checks: 1.0 on walls, 0.0 elsewhere.
    pub fn resistance_map(&self) -> Result<ResistanceMap, PathError> {
        self.ensure_initialized()?;
        Ok(ResistanceMap::from_walls(
            self.range,
            self.physical.iter().map(|g| g.is_wall()),
        ))
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.range.index_of(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.range.point_at(idx)
    }

    fn checked_idx(&self, p: Point) -> Result<usize, PathError> {
        self.ensure_initialized()?;
        self.idx(p).ok_or(PathError::OutOfBounds(p))
    }

    // -----------------------------------------------------------------------
    // Goal, cost and cell mutators
    // -----------------------------------------------------------------------

    /// Restore the whole gradient to the physical map. Goals stay listed but
    /// lose their pinned values until the next scan.
    pub fn reset_map(&mut self) {
        if self.initialized {
            self.gradient.copy_from_slice(&self.physical);
        }
    }

    /// Drop goals, the last path and every gradient change.
    pub fn reset(&mut self) {
        self.reset_map();
        self.goals.clear();
        self.path.clear();
        self.mapped = 0;
    }

    /// Mark `p` as a goal with value 0. Walls are silently ignored.
    pub fn set_goal(&mut self, p: Point) -> Result<(), PathError> {
        let i = self.checked_idx(p)?;
        self.pin_goal(i, 0.0);
        Ok(())
    }

    /// Mark every point as a goal, stopping at the first out-of-bounds one.
    pub fn set_goals(&mut self, pts: impl IntoIterator<Item = Point>) -> Result<(), PathError> {
        pts.into_iter().try_for_each(|p| self.set_goal(p))
    }

    /// Goal insertion used by path extraction: out-of-bounds and wall
    /// targets are skipped. Returns whether a goal was added.
    pub(crate) fn add_target(&mut self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.pin_goal(i, 0.0),
            None => false,
        }
    }

    pub(crate) fn pin_goal(&mut self, i: usize, value: f64) -> bool {
        if self.physical[i].is_wall() {
            return false;
        }
        self.goals.insert(i, value);
        self.gradient[i] = Gradient::Dist(value);
        true
    }

    /// Set the entry cost of `p`. Wall cells always keep a cost of 1.0.
    /// Negative and non-finite costs are refused.
    pub fn set_cost(&mut self, p: Point, cost: f64) -> Result<(), PathError> {
        let i = self.checked_idx(p)?;
        if !valid_cost(cost) {
            return Err(PathError::InvalidCost(p, cost));
        }
        let cost = if self.physical[i].is_wall() { 1.0 } else { cost };
        if self.cost[i] != cost {
            Arc::make_mut(&mut self.cost)[i] = cost;
            self.flee_cache = None;
        }
        Ok(())
    }

    /// Make `p` impossible to enter until it is reset.
    pub fn set_occupied(&mut self, p: Point) -> Result<(), PathError> {
        let i = self.checked_idx(p)?;
        self.gradient[i] = Gradient::Wall;
        Ok(())
    }

    /// Revert `p` to its physical value.
    pub fn reset_cell(&mut self, p: Point) -> Result<(), PathError> {
        let i = self.checked_idx(p)?;
        self.gradient[i] = self.physical[i];
        Ok(())
    }

    /// Remove every goal, restoring only the goal cells to their physical
    /// values. Other gradient cells keep whatever a scan wrote.
    pub fn clear_goals(&mut self) {
        if !self.initialized {
            return;
        }
        let goals = std::mem::take(&mut self.goals);
        for i in goals.into_keys() {
            self.gradient[i] = self.physical[i];
        }
    }

    // -----------------------------------------------------------------------
    // Safety overlay
    // -----------------------------------------------------------------------

    /// Per-cell danger overlay added to cover computations.
    #[inline]
    pub fn safety_map(&self) -> &[f64] {
        &self.safety
    }

    /// Raise the danger of each in-bounds point by 1.
    pub fn deteriorate(&mut self, risky: &[Point]) -> Result<&[f64], PathError> {
        self.ensure_initialized()?;
        for &p in risky {
            if let Some(i) = self.idx(p) {
                self.safety[i] += 1.0;
            }
        }
        Ok(&self.safety)
    }

    /// Lower the danger of each in-bounds point by 1, never below 0.
    pub fn relax(&mut self, safer: &[Point]) -> Result<&[f64], PathError> {
        self.ensure_initialized()?;
        for &p in safer {
            if let Some(i) = self.idx(p) {
                self.safety[i] = (self.safety[i] - 1.0).max(0.0);
            }
        }
        Ok(&self.safety)
    }

    pub fn reset_safety_map(&mut self) {
        self.safety.iter_mut().for_each(|s| *s = 0.0);
    }

    // -----------------------------------------------------------------------
    // Footprints
    // -----------------------------------------------------------------------

    /// Whether a `size × size` creature anchored at `anchor` fits: every
    /// footprint cell is inside the level, not terrain wall and not in
    /// `blocked`.
    pub(crate) fn footprint_fits(
        &self,
        anchor: Point,
        size: i32,
        blocked: &HashSet<Point>,
    ) -> bool {
        (0..size).all(|dy| {
            (0..size).all(|dx| {
                let p = anchor.shift(dx, dy);
                self.idx(p)
                    .is_some_and(|i| !self.physical[i].is_wall() && !blocked.contains(&p))
            })
        })
    }
}

#[inline]
fn valid_cost(c: f64) -> bool {
    c.is_finite() && c >= 0.0
}

fn parse_rows(text: &str) -> Result<Vec<Vec<char>>, PathError> {
    let rows: Vec<Vec<char>> = text.trim().lines().map(|l| l.chars().collect()).collect();
    let Some(width) = rows.first().map(Vec::len) else {
        return Err(PathError::InvalidLevel("no rows".into()));
    };
    if width == 0 {
        return Err(PathError::InvalidLevel("empty first row".into()));
    }
    if let Some(y) = rows.iter().position(|r| r.len() != width) {
        return Err(PathError::InvalidLevel(format!(
            "row {y} has width {}, expected {width}",
            rows[y].len()
        )));
    }
    Ok(rows)
}
