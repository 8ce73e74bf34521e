//! Event loop

use std::sync::mpsc::Receiver;
use std::time::Duration;

use pixelbox_core::traits::{PixelDriver, PixelError};
use pixelbox_core::{Color, Outcome, Painter};
use tracing::{debug, error, info, trace, warn};

use crate::error::AppError;
use crate::input::Message;

/// Pixels lit by the test pattern
const TEST_PATTERN_PIXELS: usize = 10;

/// How long the test pattern stays on
const TEST_PATTERN_HOLD: Duration = Duration::from_secs(2);

/// Why the loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Ctrl-C or SIGTERM
    Signal,
    /// The touch device went away
    DeviceLost(String),
    /// Every sender hung up
    Disconnected,
}

/// Run until a stop condition, then blank the strip
///
/// The strip is blanked on every exit path, errors included. A failed
/// blank is logged and not retried.
pub fn run<D: PixelDriver>(
    painter: &mut Painter<D>,
    rx: &Receiver<Message>,
) -> Result<StopReason, AppError> {
    let result = event_loop(painter, rx);

    match painter.shutdown() {
        Ok(()) => info!("strip cleared"),
        Err(e) => warn!(error = %e, "failed to clear strip on shutdown"),
    }

    result
}

fn event_loop<D: PixelDriver>(
    painter: &mut Painter<D>,
    rx: &Receiver<Message>,
) -> Result<StopReason, AppError> {
    painter.start()?;
    info!("ready");

    loop {
        let message = match rx.recv() {
            Ok(message) => message,
            Err(_) => return Ok(StopReason::Disconnected),
        };

        match message {
            Message::Field(event) => match painter.process(event) {
                Ok(Some(outcome)) => log_outcome(&outcome),
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "strip update failed");
                    return Err(e.into());
                }
            },
            Message::DeviceLost(reason) => {
                warn!(%reason, "touch device lost");
                return Ok(StopReason::DeviceLost(reason));
            }
            Message::Shutdown => {
                info!("shutdown requested");
                return Ok(StopReason::Signal);
            }
        }
    }
}

fn log_outcome(outcome: &Outcome) {
    match *outcome {
        Outcome::StrokeStarted { cell, index, .. } | Outcome::Painted { cell, index, .. } => {
            debug!(row = cell.row, col = cell.col, index, "touch LED");
        }
        Outcome::ButtonSelected { button, action } => {
            info!(button, action = action.label(), "button selected");
        }
        Outcome::Released { committed } => trace!(committed, "released"),
        Outcome::Unchanged | Outcome::Ignored => trace!(?outcome, "no change"),
    }
}

/// Light the first pixels green, hold, then blank the strip
///
/// A shutdown message ends the hold early. The strip is blanked even if
/// lighting it failed.
pub fn test_pattern<D: PixelDriver>(
    painter: &mut Painter<D>,
    rx: &Receiver<Message>,
) -> Result<(), PixelError> {
    test_pattern_for(painter, rx, TEST_PATTERN_HOLD)
}

fn test_pattern_for<D: PixelDriver>(
    painter: &mut Painter<D>,
    rx: &Receiver<Message>,
    hold: Duration,
) -> Result<(), PixelError> {
    info!(pixels = TEST_PATTERN_PIXELS, "test pattern");
    let lit = light_test_pattern(painter);

    if lit.is_ok() {
        if let Ok(Message::Shutdown) = rx.recv_timeout(hold) {
            info!("test pattern interrupted");
        }
    }

    let cleared = painter.shutdown();
    lit.and(cleared)
}

fn light_test_pattern<D: PixelDriver>(painter: &mut Painter<D>) -> Result<(), PixelError> {
    let renderer = painter.renderer_mut();
    let count = TEST_PATTERN_PIXELS.min(renderer.driver().len());
    for index in 0..count {
        renderer.driver_mut().write(index, Color::GREEN)?;
    }
    renderer.show()
}
