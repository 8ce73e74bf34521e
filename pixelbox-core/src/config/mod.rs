//! Configuration types
//!
//! Board-agnostic configuration structures, deserializable from TOML on
//! hosts that enable the `serde` feature.

pub mod buttons;
pub mod geometry;

pub use buttons::*;
pub use geometry::*;
