//! Hardware abstraction traits
//!
//! These traits define the interface between the painting engine
//! and hardware-specific implementations.

pub mod pixels;

pub use pixels::{PixelDriver, PixelError};
