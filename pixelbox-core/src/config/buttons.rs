//! Virtual button configuration

use heapless::Vec;

use super::geometry::{ConfigError, GridGeometry, MAX_BUTTONS};
use crate::color::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a virtual button does when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Blank the whole canvas
    Clear,
    /// Restore the canvas as it was before the last stroke
    Undo,
    /// Paint with black
    Erase,
    /// Paint with the given color
    SetColor(Color),
    /// Unassigned button, only lights its indicator
    #[default]
    Unassigned,
}

impl Action {
    /// Color the button's indicator lights up in
    pub fn indicator_color(&self) -> Color {
        match self {
            Action::SetColor(color) => *color,
            _ => Color::WHITE,
        }
    }

    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Action::Clear => "clear",
            Action::Undo => "undo",
            Action::Erase => "erase",
            Action::SetColor(_) => "color",
            Action::Unassigned => "unused",
        }
    }
}

/// One virtual button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Action performed on selection
    pub action: Action,
    /// Indicator color override
    #[cfg_attr(feature = "serde", serde(default))]
    pub indicator: Option<Color>,
}

impl ButtonConfig {
    /// Button with the action's own indicator color
    pub const fn new(action: Action) -> Self {
        Self {
            action,
            indicator: None,
        }
    }

    /// Indicator color for this button
    pub fn indicator_color(&self) -> Color {
        self.indicator.unwrap_or_else(|| self.action.indicator_color())
    }
}

/// Button table, indexed by button number
pub type ButtonTable = Vec<ButtonConfig, MAX_BUTTONS>;

/// The stock eight-button layout
pub fn default_buttons() -> ButtonTable {
    let actions = [
        Action::Clear,
        Action::Undo,
        Action::Erase,
        Action::SetColor(Color::WHITE),
        Action::SetColor(Color::RED),
        Action::SetColor(Color::GREEN),
        Action::SetColor(Color::BLUE),
        Action::SetColor(Color::YELLOW),
    ];
    actions.into_iter().map(ButtonConfig::new).collect()
}

/// Everything the painting engine needs at startup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PainterConfig {
    /// Grid and panel geometry
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid: GridGeometry,
    /// Button table; buttons beyond its length are unassigned
    #[cfg_attr(feature = "serde", serde(default = "default_buttons"))]
    pub buttons: ButtonTable,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            grid: GridGeometry::default(),
            buttons: default_buttons(),
        }
    }
}

impl PainterConfig {
    /// Validate geometry and button table together
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.buttons.len() > self.grid.button_count as usize {
            return Err(ConfigError::TooManyButtons);
        }
        Ok(())
    }

    /// Button at `index`, unassigned if the table is shorter
    pub fn button(&self, index: u8) -> ButtonConfig {
        self.buttons
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = PainterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.buttons.len(), 8);
        assert_eq!(config.button(0).action, Action::Clear);
        assert_eq!(config.button(4).action, Action::SetColor(Color::RED));
    }

    #[test]
    fn test_short_table_is_unassigned() {
        let mut config = PainterConfig::default();
        config.buttons.truncate(2);
        assert_eq!(config.button(5).action, Action::Unassigned);
        assert_eq!(config.button(5).indicator_color(), Color::WHITE);
    }

    #[test]
    fn test_too_many_buttons() {
        let mut config = PainterConfig::default();
        config.grid.button_count = 4;
        assert_eq!(config.validate(), Err(ConfigError::TooManyButtons));
    }

    #[test]
    fn test_indicator_override() {
        let button = ButtonConfig {
            action: Action::Erase,
            indicator: Some(Color::CYAN),
        };
        assert_eq!(button.indicator_color(), Color::CYAN);
        assert_eq!(ButtonConfig::new(Action::Erase).indicator_color(), Color::WHITE);
        assert_eq!(
            ButtonConfig::new(Action::SetColor(Color::BLUE)).indicator_color(),
            Color::BLUE
        );
    }
}
