//! Pixel array driver trait

use core::fmt;

use crate::color::Color;

/// Errors that can occur driving the pixel array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelError {
    /// Physical index beyond the end of the strip
    IndexOutOfRange,
    /// Strip has fewer pixels than the grid has cells
    StripTooShort,
    /// Bus transfer failed
    Bus,
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelError::IndexOutOfRange => write!(f, "pixel index out of range"),
            PixelError::StripTooShort => write!(f, "strip is shorter than the grid"),
            PixelError::Bus => write!(f, "strip bus transfer failed"),
        }
    }
}

/// Trait for an addressable pixel array
///
/// Writes are staged in the driver's output register and only become
/// visible on [`show`](PixelDriver::show). Implementations must not
/// expose a partially written frame.
pub trait PixelDriver {
    /// Number of pixels on the strip
    fn len(&self) -> usize;

    /// Stage a color at a physical index
    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError>;

    /// Push all staged writes to the hardware
    fn show(&mut self) -> Result<(), PixelError>;

    /// Strip has no pixels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage the same color on every pixel
    fn fill(&mut self, color: Color) -> Result<(), PixelError> {
        for index in 0..self.len() {
            self.write(index, color)?;
        }
        Ok(())
    }
}

impl<T: PixelDriver + ?Sized> PixelDriver for &mut T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError> {
        (**self).write(index, color)
    }

    fn show(&mut self) -> Result<(), PixelError> {
        (**self).show()
    }
}
