//! Application errors

use std::io;
use std::path::PathBuf;

use pixelbox_core::config::ConfigError;
use pixelbox_core::engine::PainterError;
use pixelbox_core::traits::PixelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("invalid geometry: {0}")]
    Geometry(ConfigError),

    #[error("brightness must be between 0.0 and 1.0, got {0}")]
    Brightness(f32),

    #[error("failed to open touch device {}: {source}", path.display())]
    OpenDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open SPI bus {}: {message}", path.display())]
    OpenSpi { path: PathBuf, message: String },

    #[error("strip: {0}")]
    Strip(PixelError),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to start input thread: {0}")]
    Thread(#[source] io::Error),
}

impl From<PixelError> for AppError {
    fn from(e: PixelError) -> Self {
        AppError::Strip(e)
    }
}

impl From<PainterError> for AppError {
    fn from(e: PainterError) -> Self {
        match e {
            PainterError::Config(e) => AppError::Geometry(e),
            PainterError::Pixel(e) => AppError::Strip(e),
        }
    }
}
