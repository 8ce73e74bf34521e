//! Application configuration
//!
//! A TOML file with `[input]`, `[strip]`, `[grid]` and `[[buttons]]`
//! sections. The default file is compiled into the binary; `--config`
//! replaces it entirely. Sections and keys left out fall back to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use pixelbox_core::config::{default_buttons, ButtonTable, GridGeometry, PainterConfig};
use pixelbox_drivers::ColorOrder;
use serde::Deserialize;

use crate::error::AppError;

/// Configuration used when no file is given
pub const EMBEDDED_CONFIG: &str = include_str!("../pixelbox.toml");

const DEFAULT_DEVICE: &str =
    "/dev/input/by-id/usb-UsbHID_SingWon-CTP-V1.18A_6F6A099B1133-event-if00";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Touch panel event device
    pub device: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// SPI bus the strip hangs off
    pub spi: PathBuf,
    /// Global brightness, 0.0 - 1.0
    pub brightness: f32,
    /// Channel order on the wire
    pub order: ColorOrder,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            spi: PathBuf::from("/dev/spidev0.0"),
            brightness: 0.1,
            order: ColorOrder::Grb,
        }
    }
}

impl StripConfig {
    /// Brightness as a 0-255 level
    pub fn level(&self) -> u8 {
        (self.brightness.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub strip: StripConfig,
    pub grid: GridGeometry,
    pub buttons: ButtonTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            strip: StripConfig::default(),
            grid: GridGeometry::default(),
            buttons: default_buttons(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or the embedded default
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)?
            }
            None => Self::parse(EMBEDDED_CONFIG)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without validating
    pub fn parse(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Check geometry, button table and brightness
    pub fn validate(&self) -> Result<(), AppError> {
        self.painter().validate().map_err(AppError::Geometry)?;
        if !(0.0..=1.0).contains(&self.strip.brightness) {
            return Err(AppError::Brightness(self.strip.brightness));
        }
        Ok(())
    }

    /// Engine configuration
    pub fn painter(&self) -> PainterConfig {
        PainterConfig {
            grid: self.grid,
            buttons: self.buttons.clone(),
        }
    }
}
