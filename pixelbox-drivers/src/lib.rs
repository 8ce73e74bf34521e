//! Pixel strip drivers
//!
//! This crate provides concrete implementations of the
//! [`PixelDriver`](pixelbox_core::traits::PixelDriver) trait:
//!
//! - WS2812 ("NeoPixel") strips clocked out over an SPI bus
//! - An in-memory strip for dry runs and tests

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod memory;
pub mod ws2812;

pub use memory::MemoryStrip;
pub use ws2812::{ColorOrder, Ws2812Spi};
