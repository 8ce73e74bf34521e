//! Board-agnostic core logic for the Pixelbox painter
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Pixel output trait
//! - Grid geometry and button configuration
//! - Touch-to-cell coordinate mapping
//! - Framebuffer with single-level undo
//! - Canvas / button strip arbitration
//! - Serpentine renderer
//! - The [`Painter`](engine::Painter) engine tying it together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod color;
pub mod config;
pub mod engine;
pub mod framebuffer;
pub mod mapping;
pub mod render;
pub mod state;
pub mod traits;

pub use color::Color;
pub use engine::{Outcome, Painter};
pub use mapping::Cell;
