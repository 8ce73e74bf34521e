//! In-memory strip
//!
//! Keeps a staged and a shown copy of every pixel and counts frames.
//! Used for dry runs on machines without a strip attached.

use heapless::Vec;
use pixelbox_core::traits::{PixelDriver, PixelError};
use pixelbox_core::Color;

use crate::ws2812::MAX_PIXELS;

/// Pixel strip backed by RAM
#[derive(Debug, Clone)]
pub struct MemoryStrip {
    staged: Vec<Color, MAX_PIXELS>,
    shown: Vec<Color, MAX_PIXELS>,
    frames: u32,
}

impl MemoryStrip {
    /// Create an all-black strip of `len` pixels
    pub fn new(len: usize) -> Result<Self, PixelError> {
        let mut staged = Vec::new();
        staged
            .resize(len, Color::BLACK)
            .map_err(|_| PixelError::IndexOutOfRange)?;
        Ok(Self {
            shown: staged.clone(),
            staged,
            frames: 0,
        })
    }

    /// Pixels as of the last `show`
    pub fn shown(&self) -> &[Color] {
        &self.shown
    }

    /// Pixels written since the last `show` that differ from what is shown
    pub fn pending(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.staged
            .iter()
            .zip(self.shown.iter())
            .enumerate()
            .filter(|(_, (staged, shown))| staged != shown)
            .map(|(i, (&staged, _))| (i, staged))
    }

    /// Number of `show` calls so far
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl PixelDriver for MemoryStrip {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError> {
        let slot = self
            .staged
            .get_mut(index)
            .ok_or(PixelError::IndexOutOfRange)?;
        *slot = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), PixelError> {
        self.shown.clone_from(&self.staged);
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_staged() {
        let mut strip = MemoryStrip::new(8).unwrap();
        strip.write(3, Color::RED).unwrap();

        assert!(strip.shown().iter().all(|c| c.is_off()));
        let pending: std::vec::Vec<_> = strip.pending().collect();
        assert_eq!(pending, [(3, Color::RED)]);

        strip.show().unwrap();
        assert_eq!(strip.shown()[3], Color::RED);
        assert_eq!(strip.pending().count(), 0);
        assert_eq!(strip.frames(), 1);
    }

    #[test]
    fn test_rewrite_same_color_not_pending() {
        let mut strip = MemoryStrip::new(4).unwrap();
        strip.write(0, Color::BLACK).unwrap();
        assert_eq!(strip.pending().count(), 0);
    }

    #[test]
    fn test_bounds() {
        let mut strip = MemoryStrip::new(4).unwrap();
        assert_eq!(strip.write(4, Color::RED), Err(PixelError::IndexOutOfRange));
        assert!(MemoryStrip::new(MAX_PIXELS + 1).is_err());
    }

    #[test]
    fn test_fill() {
        let mut strip = MemoryStrip::new(4).unwrap();
        strip.fill(Color::BLUE).unwrap();
        strip.show().unwrap();
        assert!(strip.shown().iter().all(|&c| c == Color::BLUE));
    }
}
