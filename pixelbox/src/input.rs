//! Touch panel input
//!
//! A dedicated thread blocks on the evdev device and forwards every
//! translated field update to the event loop. Events the painter does not
//! use are dropped here.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use evdev::Device;
use pixelbox_protocol::FieldEvent;
use tracing::{debug, error, info};

use crate::error::AppError;

/// Messages delivered to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A field update from the panel
    Field(FieldEvent),
    /// The device stopped delivering events
    DeviceLost(String),
    /// A termination signal arrived
    Shutdown,
}

/// Open the touch panel
pub fn open(path: &Path) -> Result<Device, AppError> {
    let device = Device::open(path).map_err(|source| AppError::OpenDevice {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        name = device.name().unwrap_or("unknown"),
        "opened touch device"
    );
    Ok(device)
}

/// Forward events from `device` until it fails or the loop goes away
pub fn spawn_reader(mut device: Device, tx: Sender<Message>) -> Result<JoinHandle<()>, AppError> {
    thread::Builder::new()
        .name("touch-input".into())
        .spawn(move || loop {
            let events = match device.fetch_events() {
                Ok(events) => events,
                Err(e) => {
                    error!(error = %e, "touch device read failed");
                    let _ = tx.send(Message::DeviceLost(e.to_string()));
                    return;
                }
            };

            for event in events {
                let Some(field) = FieldEvent::from_raw(event.event_type().0, event.code(), event.value())
                else {
                    continue;
                };
                if tx.send(Message::Field(field)).is_err() {
                    debug!("event loop gone, input thread exiting");
                    return;
                }
            }
        })
        .map_err(AppError::Thread)
}
