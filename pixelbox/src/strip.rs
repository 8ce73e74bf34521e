//! LED strip output
//!
//! Either the real WS2812 strip on a spidev bus, or a dry-run strip that
//! logs what would have changed.

use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::SpidevBus;
use pixelbox_core::traits::{PixelDriver, PixelError};
use pixelbox_core::Color;
use pixelbox_drivers::ws2812::SPI_FREQUENCY_HZ;
use pixelbox_drivers::{MemoryStrip, Ws2812Spi};
use tracing::info;

use crate::config::StripConfig;
use crate::error::AppError;

/// Strip used by the binary
pub enum Strip {
    Spi(Box<Ws2812Spi<SpidevBus>>),
    DryRun(DryRunStrip),
}

impl Strip {
    /// Open the strip described by `config`, `len` pixels long
    pub fn open(config: &StripConfig, len: usize) -> Result<Self, AppError> {
        let mut bus = SpidevBus::open(&config.spi).map_err(|e| AppError::OpenSpi {
            path: config.spi.clone(),
            message: format!("{:?}", e),
        })?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_FREQUENCY_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        bus.configure(&options).map_err(|e| AppError::OpenSpi {
            path: config.spi.clone(),
            message: e.to_string(),
        })?;

        let strip = Ws2812Spi::new(bus, len)?
            .with_brightness(config.level())
            .with_order(config.order);
        info!(
            spi = %config.spi.display(),
            pixels = len,
            brightness = strip.brightness(),
            order = ?strip.order(),
            "opened LED strip"
        );
        Ok(Strip::Spi(Box::new(strip)))
    }

    /// Strip that only logs
    pub fn dry_run(len: usize) -> Result<Self, AppError> {
        info!(pixels = len, "dry run, LED strip not driven");
        Ok(Strip::DryRun(DryRunStrip::new(len)?))
    }
}

impl PixelDriver for Strip {
    fn len(&self) -> usize {
        match self {
            Strip::Spi(s) => s.len(),
            Strip::DryRun(s) => s.len(),
        }
    }

    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError> {
        match self {
            Strip::Spi(s) => s.write(index, color),
            Strip::DryRun(s) => s.write(index, color),
        }
    }

    fn show(&mut self) -> Result<(), PixelError> {
        match self {
            Strip::Spi(s) => s.show(),
            Strip::DryRun(s) => s.show(),
        }
    }
}

/// Memory strip that logs each changed pixel on show
pub struct DryRunStrip {
    inner: MemoryStrip,
}

impl DryRunStrip {
    pub fn new(len: usize) -> Result<Self, PixelError> {
        Ok(Self {
            inner: MemoryStrip::new(len)?,
        })
    }
}

impl PixelDriver for DryRunStrip {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError> {
        self.inner.write(index, color)
    }

    fn show(&mut self) -> Result<(), PixelError> {
        let changed = self.inner.pending().count();
        if changed > 8 {
            info!(frame = self.inner.frames(), changed, "frame");
        } else {
            for (index, color) in self.inner.pending() {
                info!(index, r = color.r, g = color.g, b = color.b, "pixel");
            }
        }
        self.inner.show()
    }
}
