//! Grid geometry configuration
//!
//! Static description of the LED grid, the touch panel's active area and
//! how the two are oriented relative to each other. Loaded once at
//! startup and never changed afterwards.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of grid cells (32x32)
pub const MAX_CELLS: usize = 1024;

/// Maximum number of virtual buttons
pub const MAX_BUTTONS: usize = 16;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Grid has zero rows or columns
    EmptyGrid,
    /// Grid exceeds [`MAX_CELLS`]
    GridTooLarge,
    /// Touch area has a non-positive dimension
    InvalidTouchArea,
    /// Rotation is not 0, 90, 180 or 270
    InvalidRotation(u16),
    /// Button count is zero or exceeds [`MAX_BUTTONS`]
    InvalidButtonCount(u8),
    /// Button strip width is negative, or zero with the strip on the left
    InvalidStripWidth,
    /// More buttons configured than `button_count`
    TooManyButtons,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "grid must have at least one row and column"),
            ConfigError::GridTooLarge => write!(f, "grid exceeds {} cells", MAX_CELLS),
            ConfigError::InvalidTouchArea => write!(f, "touch area dimensions must be positive"),
            ConfigError::InvalidRotation(deg) => {
                write!(f, "rotation must be 0, 90, 180 or 270 (got {})", deg)
            }
            ConfigError::InvalidButtonCount(n) => {
                write!(f, "button count must be 1..={} (got {})", MAX_BUTTONS, n)
            }
            ConfigError::InvalidStripWidth => write!(f, "invalid button strip width"),
            ConfigError::TooManyButtons => write!(f, "more buttons configured than button_count"),
        }
    }
}

/// Clockwise rotation applied after the axis swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(ConfigError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Which panel edge carries the virtual button strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StripSide {
    Left,
    #[default]
    Right,
}

/// Grid and touch panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridGeometry {
    /// LED rows
    pub rows: u16,
    /// LED columns
    pub cols: u16,
    /// Width of the touch area covering the LED grid (raw units)
    pub touch_width: i32,
    /// Height of the touch area (raw units)
    pub touch_height: i32,
    /// Swap row and column after scaling
    pub swap_axes: bool,
    /// Mirror left/right
    pub hflip: bool,
    /// Mirror up/down
    pub vflip: bool,
    /// Clockwise rotation about the grid's own axes
    pub rotate: Rotation,
    /// Number of virtual buttons on the strip
    pub button_count: u8,
    /// Panel edge carrying the button strip
    pub button_strip_side: StripSide,
    /// Width of the button strip (raw units)
    pub button_strip_width: i32,
    /// Indicators run down the last column instead of along the last row
    pub indicators_transposed: bool,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            touch_width: 768,
            touch_height: 768,
            swap_axes: true,
            hflip: false,
            vflip: false,
            rotate: Rotation::Deg0,
            button_count: 8,
            button_strip_side: StripSide::Right,
            button_strip_width: 256,
            indicators_transposed: false,
        }
    }
}

impl GridGeometry {
    /// Number of cells in the grid
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Check the geometry for values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.cell_count() > MAX_CELLS {
            return Err(ConfigError::GridTooLarge);
        }
        if self.touch_width <= 0 || self.touch_height <= 0 {
            return Err(ConfigError::InvalidTouchArea);
        }
        if self.button_count == 0 || self.button_count as usize > MAX_BUTTONS {
            return Err(ConfigError::InvalidButtonCount(self.button_count));
        }
        let strip_ok = match self.button_strip_side {
            StripSide::Left => self.button_strip_width > 0,
            StripSide::Right => self.button_strip_width >= 0,
        };
        if !strip_ok {
            return Err(ConfigError::InvalidStripWidth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let geometry = GridGeometry::default();
        assert_eq!(geometry.validate(), Ok(()));
        assert_eq!(geometry.cell_count(), 256);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let geometry = GridGeometry {
            rows: 0,
            ..Default::default()
        };
        assert_eq!(geometry.validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let geometry = GridGeometry {
            rows: 64,
            cols: 64,
            ..Default::default()
        };
        assert_eq!(geometry.validate(), Err(ConfigError::GridTooLarge));
    }

    #[test]
    fn test_rejects_button_count() {
        let geometry = GridGeometry {
            button_count: 0,
            ..Default::default()
        };
        assert_eq!(geometry.validate(), Err(ConfigError::InvalidButtonCount(0)));
    }

    #[test]
    fn test_left_strip_needs_width() {
        let geometry = GridGeometry {
            button_strip_side: StripSide::Left,
            button_strip_width: 0,
            ..Default::default()
        };
        assert_eq!(geometry.validate(), Err(ConfigError::InvalidStripWidth));
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::try_from(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::try_from(270), Ok(Rotation::Deg270));
        assert_eq!(Rotation::try_from(45), Err(ConfigError::InvalidRotation(45)));
        assert_eq!(Rotation::Deg180.degrees(), 180);
    }
}
