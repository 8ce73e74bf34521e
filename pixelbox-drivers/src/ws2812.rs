//! WS2812 strip over SPI
//!
//! The WS2812 takes a single-wire NRZ signal: every data bit is a high
//! pulse followed by a low one, and the pulse width tells 0 from 1. With
//! the bus clocked at 3 MHz each SPI bit lasts ~333 ns, so one data bit
//! is encoded as four SPI bits:
//!
//! ```text
//! 0 → 1000   (333 ns high, 1 µs low)
//! 1 → 1110   (1 µs high, 333 ns low)
//! ```
//!
//! Two data bits fit in one SPI byte, so each pixel (24 bits) becomes 12
//! bytes on the wire. The frame ends with a run of zero bytes that holds
//! the line low long enough for the strip to latch.
//!
//! Only MOSI is used; wire it to the strip's DIN through a level shifter.

use embedded_hal::spi::SpiBus;
use heapless::Vec;
use pixelbox_core::config::MAX_CELLS;
use pixelbox_core::traits::{PixelDriver, PixelError};
use pixelbox_core::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SPI clock the encoding is timed for
pub const SPI_FREQUENCY_HZ: u32 = 3_000_000;

/// Encoded bytes per pixel
pub const BYTES_PER_PIXEL: usize = 12;

/// Zero bytes after each frame (~320 µs low at 3 MHz)
pub const RESET_BYTES: usize = 120;

/// Largest strip the driver can stage
pub const MAX_PIXELS: usize = MAX_CELLS;

const MAX_ENCODED: usize = MAX_PIXELS * BYTES_PER_PIXEL + RESET_BYTES;

/// SPI byte for each pair of data bits, MSB first
const PATTERNS: [u8; 4] = [0b1000_1000, 0b1000_1110, 0b1110_1000, 0b1110_1110];

/// Order the strip expects the color channels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorOrder {
    Rgb,
    Rbg,
    /// WS2812B default
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Channel bytes in wire order
    pub fn apply(self, color: Color) -> [u8; 3] {
        let Color { r, g, b } = color;
        match self {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Rbg => [r, b, g],
            ColorOrder::Grb => [g, r, b],
            ColorOrder::Gbr => [g, b, r],
            ColorOrder::Brg => [b, r, g],
            ColorOrder::Bgr => [b, g, r],
        }
    }
}

/// Encode one channel byte as four SPI bytes
pub fn encode_byte(byte: u8) -> [u8; 4] {
    let mut out = [0; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        let pair = (byte >> (6 - 2 * i)) & 0b11;
        *slot = PATTERNS[pair as usize];
    }
    out
}

/// WS2812 strip driven through an SPI bus
///
/// Pixels are staged in RAM; [`show`](PixelDriver::show) encodes the
/// whole strip and sends it in a single bus write.
pub struct Ws2812Spi<SPI> {
    spi: SPI,
    pixels: Vec<Color, MAX_PIXELS>,
    brightness: u8,
    order: ColorOrder,
    buffer: Vec<u8, MAX_ENCODED>,
}

impl<SPI: SpiBus<u8>> Ws2812Spi<SPI> {
    /// Create a driver for `len` pixels with full brightness
    ///
    /// The bus must already be clocked at [`SPI_FREQUENCY_HZ`].
    pub fn new(spi: SPI, len: usize) -> Result<Self, PixelError> {
        let mut pixels = Vec::new();
        pixels
            .resize(len, Color::BLACK)
            .map_err(|_| PixelError::IndexOutOfRange)?;
        Ok(Self {
            spi,
            pixels,
            brightness: u8::MAX,
            order: ColorOrder::default(),
            buffer: Vec::new(),
        })
    }

    /// Set global brightness (0-255), applied at encode time
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set channel order
    pub fn with_order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Channel order in use
    pub fn order(&self) -> ColorOrder {
        self.order
    }

    /// Staged color at `index`, before brightness scaling
    pub fn pixel(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    /// Release the bus
    pub fn release(self) -> SPI {
        self.spi
    }

    fn encode(&mut self) -> Result<(), PixelError> {
        self.buffer.clear();
        for &color in self.pixels.iter() {
            for channel in self.order.apply(color.scaled(self.brightness)) {
                self.buffer
                    .extend_from_slice(&encode_byte(channel))
                    .map_err(|_| PixelError::IndexOutOfRange)?;
            }
        }
        self.buffer
            .extend_from_slice(&[0; RESET_BYTES])
            .map_err(|_| PixelError::IndexOutOfRange)
    }
}

impl<SPI: SpiBus<u8>> PixelDriver for Ws2812Spi<SPI> {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn write(&mut self, index: usize, color: Color) -> Result<(), PixelError> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(PixelError::IndexOutOfRange)?;
        *slot = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), PixelError> {
        self.encode()?;
        self.spi
            .write(&self.buffer)
            .map_err(|_| PixelError::Bus)?;
        self.spi.flush().map_err(|_| PixelError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockSpi {
        writes: std::vec::Vec<std::vec::Vec<u8>>,
        fail: bool,
    }

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiBus<u8> for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.writes.push(words.to_vec());
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn decode_byte(encoded: &[u8]) -> u8 {
        encoded.iter().fold(0, |acc, &b| {
            let pair = PATTERNS.iter().position(|&p| p == b).unwrap() as u8;
            (acc << 2) | pair
        })
    }

    #[test]
    fn test_encode_byte() {
        assert_eq!(encode_byte(0x00), [0x88; 4]);
        assert_eq!(encode_byte(0xFF), [0xEE; 4]);
        assert_eq!(
            encode_byte(0b1001_0011),
            [0b1110_1000, 0b1000_1110, 0b1000_1000, 0b1110_1110]
        );
    }

    #[test]
    fn test_color_order() {
        let c = Color::new(1, 2, 3);
        assert_eq!(ColorOrder::Grb.apply(c), [2, 1, 3]);
        assert_eq!(ColorOrder::Rgb.apply(c), [1, 2, 3]);
        assert_eq!(ColorOrder::Bgr.apply(c), [3, 2, 1]);
    }

    #[test]
    fn test_show_sends_one_frame() {
        let mut strip = Ws2812Spi::new(MockSpi::default(), 4).unwrap();
        strip.write(1, Color::new(0x12, 0x34, 0x56)).unwrap();
        strip.show().unwrap();

        let spi = strip.release();
        assert_eq!(spi.writes.len(), 1);
        let frame = &spi.writes[0];
        assert_eq!(frame.len(), 4 * BYTES_PER_PIXEL + RESET_BYTES);
        assert!(frame[4 * BYTES_PER_PIXEL..].iter().all(|&b| b == 0));

        // Pixel 1, GRB on the wire
        let pixel = &frame[BYTES_PER_PIXEL..2 * BYTES_PER_PIXEL];
        assert_eq!(decode_byte(&pixel[0..4]), 0x34);
        assert_eq!(decode_byte(&pixel[4..8]), 0x12);
        assert_eq!(decode_byte(&pixel[8..12]), 0x56);
    }

    #[test]
    fn test_brightness_applied_on_wire_only() {
        let mut strip = Ws2812Spi::new(MockSpi::default(), 1)
            .unwrap()
            .with_brightness(26)
            .with_order(ColorOrder::Rgb);
        strip.write(0, Color::WHITE).unwrap();
        strip.show().unwrap();

        assert_eq!(strip.pixel(0), Some(Color::WHITE));
        assert_eq!(strip.brightness(), 26);
        assert_eq!(strip.order(), ColorOrder::Rgb);
        let spi = strip.release();
        let expected = Color::WHITE.scaled(26).r;
        assert_eq!(decode_byte(&spi.writes[0][0..4]), expected);
    }

    #[test]
    fn test_write_out_of_range() {
        let mut strip = Ws2812Spi::new(MockSpi::default(), 2).unwrap();
        assert_eq!(strip.write(2, Color::RED), Err(PixelError::IndexOutOfRange));
    }

    #[test]
    fn test_bus_error() {
        let spi = MockSpi {
            fail: true,
            ..Default::default()
        };
        let mut strip = Ws2812Spi::new(spi, 2).unwrap();
        assert_eq!(strip.show(), Err(PixelError::Bus));
    }

    #[test]
    fn test_full_length_strip_encodes_whole_frame() {
        let mut strip = Ws2812Spi::new(MockSpi::default(), MAX_PIXELS).unwrap();
        strip.write(MAX_PIXELS - 1, Color::BLUE).unwrap();
        assert_eq!(strip.show(), Ok(()));

        let spi = strip.release();
        let frame = &spi.writes[0];
        assert_eq!(frame.len(), MAX_ENCODED);
        let last = &frame[(MAX_PIXELS - 1) * BYTES_PER_PIXEL..MAX_PIXELS * BYTES_PER_PIXEL];
        assert_eq!(decode_byte(&last[8..12]), 0xFF);
        assert!(frame[MAX_PIXELS * BYTES_PER_PIXEL..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_too_many_pixels() {
        assert!(Ws2812Spi::new(MockSpi::default(), MAX_PIXELS + 1).is_err());
    }
}
