//! RGB colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit RGB color
///
/// Deserializes from a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[u8; 3]", into = "[u8; 3]"))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// All channels off
    pub fn is_off(&self) -> bool {
        *self == Color::BLACK
    }

    /// Scale every channel by `level / 255`
    pub fn scaled(self, level: u8) -> Self {
        let scale = |c: u8| ((c as u16 * level as u16 + 127) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(Color::WHITE.scaled(255), Color::WHITE);
        assert_eq!(Color::WHITE.scaled(0), Color::BLACK);
        assert_eq!(Color::new(200, 100, 0).scaled(128), Color::new(100, 50, 0));
    }

    #[test]
    fn test_is_off() {
        assert!(Color::default().is_off());
        assert!(!Color::RED.is_off());
    }
}
