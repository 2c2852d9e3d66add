//! Shared map model for the `hexmap` demo.
//!
//! Demonstrates: seeded obstacle generation on a hex disc, A* pathfinding
//! bounded to the map, ring-expansion field of view, and an ASCII rendering
//! of the result.

use std::collections::HashSet;
use std::fmt;

use hexfield_core::{Context, Cuboid, HexCoord};
use hexfield_fov::{RadiateConfig, Transparency, VisibilityField};
use hexfield_paths::{HexPather, Path, PathFinder, PathOutcome, SearchConfig, SearchStats};
use rand::{RngExt, SeedableRng};

const CH_WALL: char = '#';
const CH_SEEN: char = '.';
const CH_UNSEEN: char = ',';
const CH_PATH: char = '*';
const CH_ORIGIN: char = '@';
const CH_TARGET: char = 'X';

/// Errors reported by the demo before any search runs.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoError {
    /// The coordinate lies outside the map disc.
    OutsideMap(HexCoord),
    /// The coordinate is a wall.
    Blocked(HexCoord),
    /// Wall density must lie in `0.0..=1.0`.
    InvalidDensity(f64),
    /// A coordinate argument could not be parsed.
    InvalidCoord(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::OutsideMap(c) => write!(f, "{c} is outside the map"),
            DemoError::Blocked(c) => write!(f, "{c} is a wall"),
            DemoError::InvalidDensity(d) => write!(f, "wall density {d} is not in 0..=1"),
            DemoError::InvalidCoord(s) => write!(f, "cannot parse {s:?} as \"q,r\""),
        }
    }
}

impl std::error::Error for DemoError {}

/// Parse a coordinate written as `q,r`.
pub fn parse_coord(s: &str) -> Result<HexCoord, DemoError> {
    let bad = || DemoError::InvalidCoord(s.to_string());
    let (q, r) = s.split_once(',').ok_or_else(bad)?;
    let q = q.trim().parse().map_err(|_| bad())?;
    let r = r.trim().parse().map_err(|_| bad())?;
    Ok(HexCoord::new(q, r))
}

/// A hex disc centered on the origin with a set of wall hexes.
#[derive(Debug, Clone)]
pub struct HexMap {
    radius: i32,
    walls: HashSet<HexCoord>,
}

impl HexMap {
    /// An empty map of the given radius.
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.saturating_abs(),
            walls: HashSet::new(),
        }
    }

    /// A map whose hexes are walls with probability `density`, except those
    /// in `keep`.
    pub fn generate(
        radius: i32,
        density: f64,
        seed: u64,
        keep: &[HexCoord],
    ) -> Result<Self, DemoError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(DemoError::InvalidDensity(density));
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut map = Self::new(radius);
        for c in map.bound() {
            if rng.random_range(0.0..1.0) < density && !keep.contains(&c) {
                map.walls.insert(c);
            }
        }
        log::info!(
            "generated map of radius {} with {} walls (seed {seed})",
            map.radius,
            map.wall_count()
        );
        Ok(map)
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// The region covered by the map.
    #[inline]
    pub fn bound(&self) -> Cuboid {
        Cuboid::hex_range(HexCoord::ZERO, self.radius)
    }

    #[inline]
    pub fn contains(&self, c: HexCoord) -> bool {
        c.length() <= self.radius
    }

    #[inline]
    pub fn is_wall(&self, c: HexCoord) -> bool {
        self.walls.contains(&c)
    }

    pub fn set_wall(&mut self, c: HexCoord, wall: bool) {
        if wall {
            self.walls.insert(c);
        } else {
            self.walls.remove(&c);
        }
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn transparency(&self, c: HexCoord) -> Transparency {
        if !self.contains(c) {
            Transparency::Unknown
        } else {
            Transparency::from(!self.is_wall(c))
        }
    }

    /// Check that `c` is an open hex of the map.
    pub fn check_open(&self, c: HexCoord) -> Result<(), DemoError> {
        if !self.contains(c) {
            return Err(DemoError::OutsideMap(c));
        }
        if self.is_wall(c) {
            return Err(DemoError::Blocked(c));
        }
        Ok(())
    }

    /// Draw the map row by row, with hexes of each row offset by half a
    /// cell from the row above.
    pub fn render(&self, scene: Option<&Scene>) -> String {
        let path: HashSet<HexCoord> = scene
            .and_then(|s| s.path.as_ref())
            .map(|p| p.coords().collect())
            .unwrap_or_default();
        let mut out = String::new();
        for r in -self.radius..=self.radius {
            let q_min = (-self.radius).max(-r - self.radius);
            let q_max = self.radius.min(-r + self.radius);
            out.extend(std::iter::repeat_n(' ', r.unsigned_abs() as usize));
            for q in q_min..=q_max {
                let c = HexCoord::new(q, r);
                let ch = match scene {
                    Some(s) if c == s.origin => CH_ORIGIN,
                    Some(s) if c == s.target => CH_TARGET,
                    _ if path.contains(&c) => CH_PATH,
                    _ if self.is_wall(c) => CH_WALL,
                    Some(s) if !s.seen.contains(&c) => CH_UNSEEN,
                    _ => CH_SEEN,
                };
                out.push(ch);
                if q < q_max {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl HexPather for HexMap {
    fn is_blocked(&self, c: HexCoord) -> bool {
        !self.contains(c) || self.is_wall(c)
    }
}

/// Everything computed for one origin/target pair.
#[derive(Debug, Clone)]
pub struct Scene {
    pub origin: HexCoord,
    pub target: HexCoord,
    /// `None` when the target cannot be reached.
    pub path: Option<Path>,
    pub cancelled: bool,
    pub stats: SearchStats,
    pub seen: HashSet<HexCoord>,
}

/// Find a path from `origin` to `target` and compute what `origin` sees
/// within `sight`.
pub fn run_scene(
    map: &HexMap,
    origin: HexCoord,
    target: HexCoord,
    sight: i32,
    ctx: Option<Context>,
) -> Result<Scene, DemoError> {
    map.check_open(origin)?;
    map.check_open(target)?;

    let mut config = SearchConfig::default().with_bound(map.bound());
    config.context = ctx;
    let mut finder = PathFinder::with_config(map, origin, target, config);
    let outcome = finder.run();
    let stats = finder.stats();

    let mut field = VisibilityField::with_config(RadiateConfig::default().with_bound(map.bound()));
    field.radiate(origin, sight, |c| map.transparency(c));

    let cancelled = outcome == PathOutcome::Cancelled;
    Ok(Scene {
        origin,
        target,
        path: outcome.into_path(),
        cancelled,
        stats,
        seen: field.into_visible(),
    })
}
