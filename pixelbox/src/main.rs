//! Pixelbox
//!
//! Paint on a serpentine WS2812 matrix through the touch panel laid over
//! it. The panel's right edge (configurable) carries a strip of virtual
//! buttons for colors, erase, clear and undo.
//!
//! # Threads
//!
//! - `touch-input`: blocks on the evdev device and forwards field updates
//! - main: owns the painter and processes messages in arrival order
//!
//! The Ctrl-C handler posts onto the same channel, so shutdown is handled
//! by the main thread like any other message.

mod config;
mod error;
mod input;
mod runner;
mod strip;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use pixelbox_core::Painter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::Message;
use crate::runner::StopReason;
use crate::strip::Strip;

/// Touch-to-LED painter
#[derive(Parser, Debug)]
#[command(name = "pixelbox", version, about)]
struct Cli {
    /// Configuration file; the built-in defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Touch device, overriding [input].device
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Log pixel changes instead of driving the strip
    #[arg(long)]
    dry_run: bool,

    /// Light the first ten pixels green for two seconds, then exit
    #[arg(long)]
    test_pattern: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixelbox=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(device) = cli.device {
        config.input.device = device;
    }

    let grid = config.grid;
    info!(
        rows = grid.rows,
        cols = grid.cols,
        touch_width = grid.touch_width,
        touch_height = grid.touch_height,
        swap_axes = grid.swap_axes,
        rotate = grid.rotate.degrees(),
        buttons = grid.button_count,
        strip_side = ?grid.button_strip_side,
        "configuration loaded"
    );

    let pixels = grid.cell_count();
    let strip = if cli.dry_run {
        Strip::dry_run(pixels)?
    } else {
        Strip::open(&config.strip, pixels)?
    };
    let mut painter = Painter::new(&config.painter(), strip)?;

    let (tx, rx) = mpsc::channel();
    let signal_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = signal_tx.send(Message::Shutdown);
    })?;

    if cli.test_pattern {
        runner::test_pattern(&mut painter, &rx)?;
        return Ok(ExitCode::SUCCESS);
    }

    let device = input::open(&config.input.device)?;
    input::spawn_reader(device, tx)?;

    let reason = runner::run(&mut painter, &rx)?;
    Ok(exit_code(reason))
}

/// Every stop reason is a clean exit; only errors fail the process
fn exit_code(reason: StopReason) -> ExitCode {
    match reason {
        StopReason::Signal | StopReason::Disconnected => info!("stopped"),
        StopReason::DeviceLost(reason) => info!(%reason, "stopped after device loss"),
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_success(code: ExitCode) -> bool {
        format!("{:?}", code) == format!("{:?}", ExitCode::SUCCESS)
    }

    #[test]
    fn test_device_loss_exits_cleanly() {
        assert!(is_success(exit_code(StopReason::DeviceLost(
            "no such device".into()
        ))));
        assert!(is_success(exit_code(StopReason::Signal)));
        assert!(is_success(exit_code(StopReason::Disconnected)));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["pixelbox", "--dry-run", "--test-pattern"]).unwrap();
        assert!(cli.dry_run);
        assert!(cli.test_pattern);
        assert!(cli.config.is_none());
    }
}
