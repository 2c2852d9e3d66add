//! Hexagonal grid core types for the *hexfield* crates.
//!
//! This crate provides the geometry shared by the *hexfield* crates: axial
//! hex coordinates and directions, bounded cuboid regions with lazy
//! enumeration, a cooperative-cancellation token, and the common error type.

pub mod context;
pub mod cuboid;
pub mod error;
pub mod hex;

pub use context::Context;
pub use cuboid::{Cuboid, Hexes};
pub use error::HexError;
pub use hex::{HexCoord, HexDirection};
