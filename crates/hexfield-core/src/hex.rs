//! Hex geometry primitives: [`HexCoord`] and [`HexDirection`].
//!
//! Coordinates are axial `(q, r)` with the implicit cube axis `z = -q - r`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::HexError;

// ---------------------------------------------------------------------------
// HexCoord
// ---------------------------------------------------------------------------

/// An axial hex coordinate. The third cube axis is derived: `q + r + z == 0`.
///
/// Components are expected to keep `q + r` within `i32`, so that the derived
/// axis is representable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { q: 0, r: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The derived cube axis.
    #[inline]
    pub const fn z(self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance from the origin.
    #[inline]
    pub fn length(self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.z().abs())
    }

    /// Minimum number of adjacent steps between `self` and `other`.
    #[inline]
    pub fn distance(self, other: HexCoord) -> i32 {
        (self - other).length()
    }

    /// The adjacent coordinate in direction `dir`.
    #[inline]
    pub fn neighbor(self, dir: HexDirection) -> Self {
        self + dir.offset()
    }

    /// All six neighbours, in [`HexDirection::ALL`] order.
    #[inline]
    pub fn neighbors(self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|d| self.neighbor(d))
    }

    /// The direction leading from `self` to an adjacent `other`, if they are
    /// adjacent.
    pub fn direction_to(self, other: HexCoord) -> Option<HexDirection> {
        let delta = other - self;
        HexDirection::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Rotate around the origin by `steps` sixths of a turn, in
    /// [`HexDirection::ALL`] order (E towards NE). Negative steps rotate the
    /// other way.
    pub fn rotate(self, steps: i32) -> Self {
        let mut c = self;
        for _ in 0..steps.rem_euclid(6) {
            c = Self::new(c.q + c.r, -c.q);
        }
        c
    }

    /// Rotate around `center` by `steps` sixths of a turn.
    #[inline]
    pub fn rotate_about(self, center: HexCoord, steps: i32) -> Self {
        (self - center).rotate(steps) + center
    }

    /// Angle in degrees of the vector from the origin to `self`, measured
    /// from the E direction towards NE, in `[0, 360)`.
    pub fn angle_degrees(self) -> f64 {
        let (x, y) = self.to_plane();
        if x == 0.0 && y == 0.0 {
            return 0.0;
        }
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Planar position of the hex center for unit edge-to-edge spacing, with
    /// E along +x and NE at +60°.
    #[inline]
    pub fn to_plane(self) -> (f64, f64) {
        let q = self.q as f64;
        let r = self.r as f64;
        (q + r * 0.5, -r * 3f64.sqrt() / 2.0)
    }
}

// --- trait impls for HexCoord ---

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.q.cmp(&other.q).then(self.r.cmp(&other.r))
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Add for HexCoord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Mul<i32> for HexCoord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

impl Neg for HexCoord {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

// ---------------------------------------------------------------------------
// HexDirection
// ---------------------------------------------------------------------------

/// One of the six hex neighbour directions, indexed 0..=5.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// All directions in index order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Index in 0..=5.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axial offset of a single step in this direction.
    #[inline]
    pub const fn offset(self) -> HexCoord {
        match self {
            HexDirection::East => HexCoord::new(1, 0),
            HexDirection::NorthEast => HexCoord::new(1, -1),
            HexDirection::NorthWest => HexCoord::new(0, -1),
            HexDirection::West => HexCoord::new(-1, 0),
            HexDirection::SouthWest => HexCoord::new(-1, 1),
            HexDirection::SouthEast => HexCoord::new(0, 1),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Turn by `steps` sixths (positive towards increasing index).
    #[inline]
    pub fn rotate(self, steps: i32) -> Self {
        Self::ALL[(self.index() as i32 + steps).rem_euclid(6) as usize]
    }

    /// Angle of this direction in degrees: East is 0, each index adds 60.
    #[inline]
    pub const fn angle_degrees(self) -> i32 {
        self.index() as i32 * 60
    }

    /// The direction closest to `angle` (degrees, any range).
    pub fn from_angle_degrees(angle: f64) -> Self {
        let sector = (angle / 60.0).round().rem_euclid(6.0) as usize;
        Self::ALL[sector % 6]
    }
}

impl TryFrom<i32> for HexDirection {
    type Error = HexError;

    fn try_from(index: i32) -> Result<Self, HexError> {
        if (0..6).contains(&index) {
            Ok(Self::ALL[index as usize])
        } else {
            Err(HexError::InvalidDirection(index))
        }
    }
}

impl From<HexDirection> for HexCoord {
    fn from(dir: HexDirection) -> Self {
        dir.offset()
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HexDirection::East => "E",
            HexDirection::NorthEast => "NE",
            HexDirection::NorthWest => "NW",
            HexDirection::West => "W",
            HexDirection::SouthWest => "SW",
            HexDirection::SouthEast => "SE",
        };
        f.write_str(name)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        let c = HexCoord::new(-3, 8);
        let json = serde_json::to_string(&c).unwrap();
        let back: HexCoord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn direction_round_trip() {
        let json = serde_json::to_string(&HexDirection::NorthWest).unwrap();
        let back: HexDirection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HexDirection::NorthWest);
    }
}
