use std::collections::HashSet;

use hexfield_core::{Cuboid, HexCoord};

/// Nudge applied to line interpolation so that lines running exactly along a
/// hex edge resolve to both hexes sharing it.
const EPSILON: f64 = 1e-6;

/// How light treats a hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transparency {
    /// Seen and seen through.
    Transparent,
    /// Stops sight; reported only with [`RadiateConfig::include_opaque`].
    Opaque,
    /// Outside the known map. Stops sight and is never reported.
    #[default]
    Unknown,
}

impl From<bool> for Transparency {
    fn from(transparent: bool) -> Self {
        if transparent {
            Transparency::Transparent
        } else {
            Transparency::Opaque
        }
    }
}

/// Options for [`VisibilityField::radiate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadiateConfig {
    /// Hexes outside this region count as [`Transparency::Unknown`].
    pub bound: Option<Cuboid>,
    /// Also report opaque hexes that are reached (walls in view).
    pub include_opaque: bool,
}

impl RadiateConfig {
    pub fn with_bound(mut self, bound: Cuboid) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn with_include_opaque(mut self, include: bool) -> Self {
        self.include_opaque = include;
        self
    }
}

/// Ring-expansion field of view.
///
/// Each ring `k` around the origin is visited in turn. A hex on ring `k` is
/// reached when one of its parents, the hexes of ring `k - 1` on the straight
/// line back to the origin, was reached and is transparent. Expansion stops
/// at the requested radius, or as soon as a whole ring lets no light through.
///
/// The field keeps its buffers between calls, so reuse one instance when
/// recomputing vision every turn.
#[derive(Debug, Clone, Default)]
pub struct VisibilityField {
    config: RadiateConfig,
    origin: HexCoord,
    radius: i32,
    /// Reported hexes.
    visible: HashSet<HexCoord>,
    /// Reached transparent hexes; the only ones light continues from.
    lit: HashSet<HexCoord>,
}

impl VisibilityField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RadiateConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &RadiateConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RadiateConfig) {
        self.config = config;
    }

    /// Origin of the last computation.
    #[inline]
    pub fn origin(&self) -> HexCoord {
        self.origin
    }

    /// Radius of the last computation, as a non-negative value.
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Compute the hexes visible from `origin` within `max_radius`.
    ///
    /// The origin is always visible. A negative radius is treated as its
    /// absolute value.
    pub fn radiate<F>(
        &mut self,
        origin: HexCoord,
        max_radius: i32,
        is_transparent: F,
    ) -> &HashSet<HexCoord>
    where
        F: Fn(HexCoord) -> Transparency,
    {
        let radius = max_radius.saturating_abs();
        self.origin = origin;
        self.radius = radius;
        self.visible.clear();
        self.lit.clear();
        self.visible.insert(origin);
        self.lit.insert(origin);

        let bound = self.config.bound;
        let classify = |c: HexCoord| match bound {
            Some(b) if !b.contains(c) => Transparency::Unknown,
            _ => is_transparent(c),
        };

        let mut rings = 0;
        for k in 1..=radius {
            let mut propagates = false;
            for hex in Cuboid::hex_range(origin, k).hexes(true) {
                let [a, b] = parents(origin, hex, k);
                if !self.lit.contains(&a) && !self.lit.contains(&b) {
                    continue;
                }
                match classify(hex) {
                    Transparency::Transparent => {
                        self.lit.insert(hex);
                        self.visible.insert(hex);
                        propagates = true;
                    }
                    Transparency::Opaque if self.config.include_opaque => {
                        self.visible.insert(hex);
                    }
                    Transparency::Opaque | Transparency::Unknown => {}
                }
            }
            rings = k;
            if !propagates {
                break;
            }
        }
        log::debug!(
            "radiate from {origin} radius {radius}: {} visible, {rings} rings",
            self.visible.len()
        );
        &self.visible
    }

    /// Hexes visible in the last computation.
    #[inline]
    pub fn visible(&self) -> &HashSet<HexCoord> {
        &self.visible
    }

    #[inline]
    pub fn is_visible(&self, c: HexCoord) -> bool {
        self.visible.contains(&c)
    }

    pub fn iter_visible(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.visible.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn into_visible(self) -> HashSet<HexCoord> {
        self.visible
    }
}

/// Hexes visible from `origin` within `max_radius` given `is_transparent`.
///
/// ```
/// use hexfield_core::HexCoord;
/// use hexfield_fov::{Transparency, radiate};
///
/// let seen = radiate(HexCoord::ZERO, |_| Transparency::Transparent, 2);
/// assert_eq!(seen.len(), 19);
/// ```
pub fn radiate<F>(origin: HexCoord, is_transparent: F, max_radius: i32) -> HashSet<HexCoord>
where
    F: Fn(HexCoord) -> Transparency,
{
    let mut field = VisibilityField::new();
    field.radiate(origin, max_radius, is_transparent);
    field.into_visible()
}

/// The hexes of ring `ring - 1` on the line from `origin` to `hex`, which
/// lies on ring `ring`. Both entries are equal unless the line runs along a
/// hex edge.
fn parents(origin: HexCoord, hex: HexCoord, ring: i32) -> [HexCoord; 2] {
    let t = f64::from(ring - 1) / f64::from(ring);
    let lerp = |a: i32, b: i32| f64::from(a) + f64::from(b - a) * t;
    let q = lerp(origin.q, hex.q);
    let r = lerp(origin.r, hex.r);
    let z = -q - r;
    [
        cube_round(q + EPSILON, r + EPSILON, z - 2.0 * EPSILON),
        cube_round(q - EPSILON, r - EPSILON, z + 2.0 * EPSILON),
    ]
}

fn cube_round(q: f64, r: f64, z: f64) -> HexCoord {
    let (mut rq, mut rr, rz) = (q.round(), r.round(), z.round());
    let (dq, dr, dz) = ((rq - q).abs(), (rr - r).abs(), (rz - z).abs());
    if dq > dr && dq > dz {
        rq = -rr - rz;
    } else if dr > dz {
        rr = -rq - rz;
    }
    HexCoord::new(rq as i32, rr as i32)
}
