//! Field of view on hexagonal grids.
//!
//! [`VisibilityField`] radiates outward from an origin one ring at a time.
//! A hex is seen when a hex on the straight line back to the origin, one ring
//! closer, is itself seen and transparent. Transparency comes from a
//! caller-supplied `Fn(HexCoord) -> Transparency`.

mod radiate;

pub use radiate::{RadiateConfig, Transparency, VisibilityField, radiate};
