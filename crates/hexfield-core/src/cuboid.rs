//! Bounded hex regions: [`Cuboid`] and its coordinate iterator [`Hexes`].
//!
//! A cuboid is an axis-aligned box in cube space, with inclusive bounds on
//! each of `q`, `r` and `z`. The hexes it describes are the integer points
//! inside the box that lie on the plane `q + r + z == 0`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use crate::hex::HexCoord;

// ---------------------------------------------------------------------------
// Cuboid
// ---------------------------------------------------------------------------

/// An axial cuboid: inclusive `q`, `r` and `z` bounds.
///
/// Bounds never invert (`min <= max` on every axis). A cuboid may still hold
/// no hex at all; such cuboids are [empty](Self::is_empty) and all compare
/// equal.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CuboidBounds"))]
pub struct Cuboid {
    q_min: i32,
    q_max: i32,
    r_min: i32,
    r_max: i32,
    z_min: i32,
    z_max: i32,
}

/// Deserialized form of [`Cuboid`], canonicalized through [`Cuboid::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CuboidBounds {
    q_min: i32,
    q_max: i32,
    r_min: i32,
    r_max: i32,
    z_min: i32,
    z_max: i32,
}

#[cfg(feature = "serde")]
impl From<CuboidBounds> for Cuboid {
    fn from(b: CuboidBounds) -> Self {
        Cuboid::new(b.q_min, b.q_max, b.r_min, b.r_max, b.z_min, b.z_max)
    }
}

impl PartialEq for Cuboid {
    fn eq(&self, other: &Self) -> bool {
        (self.q_min == other.q_min
            && self.q_max == other.q_max
            && self.r_min == other.r_min
            && self.r_max == other.r_max
            && self.z_min == other.z_min
            && self.z_max == other.z_max)
            || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Cuboid {}

impl Hash for Cuboid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            Self::EMPTY.bounds().hash(state);
        } else {
            self.bounds().hash(state);
        }
    }
}

impl Cuboid {
    /// Canonical empty cuboid: the single point `(0, 0)` of the q/r axes
    /// cannot satisfy `z == 1`.
    pub const EMPTY: Self = Self {
        q_min: 0,
        q_max: 0,
        r_min: 0,
        r_max: 0,
        z_min: 1,
        z_max: 1,
    };

    /// Create a cuboid from explicit bounds. Each axis pair is canonicalized
    /// so that `min <= max`.
    pub fn new(q0: i32, q1: i32, r0: i32, r1: i32, z0: i32, z1: i32) -> Self {
        Self {
            q_min: q0.min(q1),
            q_max: q0.max(q1),
            r_min: r0.min(r1),
            r_max: r0.max(r1),
            z_min: z0.min(z1),
            z_max: z0.max(z1),
        }
    }

    /// All hexes within distance `radius` of `origin`. A negative radius is
    /// treated as its absolute value. Bounds saturate at the `i32` limits.
    pub fn hex_range(origin: HexCoord, radius: i32) -> Self {
        let radius = radius.saturating_abs();
        let z = origin.z();
        Self {
            q_min: origin.q.saturating_sub(radius),
            q_max: origin.q.saturating_add(radius),
            r_min: origin.r.saturating_sub(radius),
            r_max: origin.r.saturating_add(radius),
            z_min: z.saturating_sub(radius),
            z_max: z.saturating_add(radius),
        }
    }

    /// Bounds as `(q_min, q_max, r_min, r_max, z_min, z_max)`.
    #[inline]
    pub fn bounds(self) -> (i32, i32, i32, i32, i32, i32) {
        (
            self.q_min, self.q_max, self.r_min, self.r_max, self.z_min, self.z_max,
        )
    }

    /// Whether the cuboid contains no hex.
    #[inline]
    pub fn is_empty(self) -> bool {
        // The plane q + r + z == 0 misses the box when the reachable sums of
        // q + r cannot meet -z.
        let low = i64::from(self.q_min) + i64::from(self.r_min) + i64::from(self.z_min);
        let high = i64::from(self.q_max) + i64::from(self.r_max) + i64::from(self.z_max);
        low > 0 || high < 0
    }

    /// Whether `c` lies inside the cuboid.
    #[inline]
    pub fn contains(self, c: HexCoord) -> bool {
        let z = c.z();
        c.q >= self.q_min
            && c.q <= self.q_max
            && c.r >= self.r_min
            && c.r <= self.r_max
            && z >= self.z_min
            && z <= self.z_max
    }

    /// Intersection of two cuboids (may be empty).
    ///
    /// If the two cuboids share no hex, [`Cuboid::EMPTY`] is returned.
    pub fn intersect(self, other: Cuboid) -> Self {
        let q_min = self.q_min.max(other.q_min);
        let q_max = self.q_max.min(other.q_max);
        let r_min = self.r_min.max(other.r_min);
        let r_max = self.r_max.min(other.r_max);
        let z_min = self.z_min.max(other.z_min);
        let z_max = self.z_max.min(other.z_max);
        if q_min > q_max || r_min > r_max || z_min > z_max {
            return Self::EMPTY;
        }
        let c = Self {
            q_min,
            q_max,
            r_min,
            r_max,
            z_min,
            z_max,
        };
        if c.is_empty() { Self::EMPTY } else { c }
    }

    /// Intersection with the disc of `radius` around `origin`.
    #[inline]
    pub fn intersect_range(self, origin: HexCoord, radius: i32) -> Self {
        self.intersect(Self::hex_range(origin, radius))
    }

    /// Intersection with every cuboid of `others`.
    pub fn intersect_all(self, others: impl IntoIterator<Item = Cuboid>) -> Self {
        others.into_iter().fold(self, Self::intersect)
    }

    /// The inclusive `r` bounds of row `q`. The row is empty when
    /// `first > last`.
    #[inline]
    pub fn row(self, q: i32) -> (i32, i32) {
        let q = i64::from(q);
        let first = i64::from(self.r_min).max(-q - i64::from(self.z_max));
        let last = i64::from(self.r_max).min(-q - i64::from(self.z_min));
        if first > last {
            return (1, 0);
        }
        // Both lie within r_min..=r_max here.
        (first as i32, last as i32)
    }

    /// Number of hexes in the cuboid, computed row by row without
    /// enumerating them.
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.q_min..=self.q_max)
            .map(|q| {
                let (first, last) = self.row(q);
                (i64::from(last) - i64::from(first) + 1).max(0) as usize
            })
            .sum()
    }

    /// Lazy iterator over the hexes of the cuboid, row by row along `q`.
    ///
    /// With `border` set, only the outer shell is produced: the first and
    /// last rows whole, and the two end hexes of every row in between. For a
    /// [`hex_range`](Self::hex_range) disc that shell is the outermost ring.
    ///
    /// The iterator borrows nothing; calling `hexes` again restarts the
    /// enumeration.
    #[inline]
    pub fn hexes(self, border: bool) -> Hexes {
        Hexes::new(self, border)
    }
}

impl Default for Cuboid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl IntoIterator for Cuboid {
    type Item = HexCoord;
    type IntoIter = Hexes;
    #[inline]
    fn into_iter(self) -> Hexes {
        self.hexes(false)
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[q {}..={}, r {}..={}, z {}..={}]",
            self.q_min, self.q_max, self.r_min, self.r_max, self.z_min, self.z_max
        )
    }
}

// ---------------------------------------------------------------------------
// Hexes
// ---------------------------------------------------------------------------

/// Row-major iterator over the hexes of a [`Cuboid`].
#[derive(Clone, Debug)]
pub struct Hexes {
    cuboid: Cuboid,
    border: bool,
    q: i32,
    r: i32,
    last: i32,
    done: bool,
}

impl Hexes {
    fn new(cuboid: Cuboid, border: bool) -> Self {
        let (r, last) = cuboid.row(cuboid.q_min);
        Self {
            cuboid,
            border,
            q: cuboid.q_min,
            r,
            last,
            done: cuboid.is_empty(),
        }
    }

    #[inline]
    fn interior_row(&self) -> bool {
        self.q != self.cuboid.q_min && self.q != self.cuboid.q_max
    }

    fn next_row(&mut self) {
        if self.q >= self.cuboid.q_max {
            self.done = true;
            return;
        }
        self.q += 1;
        (self.r, self.last) = self.cuboid.row(self.q);
    }
}

impl Iterator for Hexes {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        while !self.done {
            if self.r <= self.last {
                let c = HexCoord::new(self.q, self.r);
                if self.r == self.last {
                    self.next_row();
                } else if self.border && self.interior_row() {
                    self.r = self.last;
                } else {
                    self.r += 1;
                }
                return Some(c);
            }
            self.next_row();
        }
        None
    }
}

impl FusedIterator for Hexes {}
