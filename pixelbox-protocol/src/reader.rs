//! Touch sample reconstruction
//!
//! The panel reports fields one at a time and only when they change. The
//! reader keeps the latest value of each field and, at each sync marker,
//! emits at most one [`Contact`]:
//!
//! - both coordinates known: [`Contact::Frame`] with the current values
//!   (last write within the sample wins)
//! - a coordinate unknown but the contact lifted since the last sync:
//!   [`Contact::Released`]
//! - otherwise nothing; partial samples are dropped

use crate::events::{FieldEvent, TouchFrame, LIFTOFF_TRACKING_ID};

/// Output of the reader at a sync marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Contact {
    /// A complete touch sample
    Frame(TouchFrame),
    /// The contact lifted and no complete sample is pending
    Released,
}

/// Stateful reducer from field updates to touch samples
#[derive(Debug, Clone)]
pub struct EventStreamReader {
    x: Option<i32>,
    y: Option<i32>,
    tracking_id: i32,
    down: bool,
    released: bool,
}

impl Default for EventStreamReader {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStreamReader {
    /// Create a reader with no contact
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            tracking_id: LIFTOFF_TRACKING_ID,
            down: false,
            released: false,
        }
    }

    /// Forget both coordinates, keeping the contact state
    ///
    /// Called after a sample has been consumed so the next sample must
    /// carry fresh coordinates before it paints.
    pub fn reset_coordinates(&mut self) {
        self.x = None;
        self.y = None;
    }

    /// Whether the contact is currently on the panel
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Coordinates seen since the last reset
    pub fn pending(&self) -> (Option<i32>, Option<i32>) {
        (self.x, self.y)
    }

    /// Feed one field update
    ///
    /// Returns `Some` only for [`FieldEvent::FrameSync`].
    pub fn feed(&mut self, event: FieldEvent) -> Option<Contact> {
        match event {
            FieldEvent::PositionX(x) => {
                self.x = Some(x);
                self.down = true;
                None
            }
            FieldEvent::PositionY(y) => {
                self.y = Some(y);
                self.down = true;
                None
            }
            FieldEvent::TrackingId(LIFTOFF_TRACKING_ID) => {
                self.tracking_id = LIFTOFF_TRACKING_ID;
                self.down = false;
                self.released = true;
                self.reset_coordinates();
                None
            }
            FieldEvent::TrackingId(id) => {
                self.tracking_id = id;
                self.down = true;
                None
            }
            FieldEvent::KeyTouch(pressed) => {
                self.down = pressed;
                if !pressed {
                    self.released = true;
                }
                None
            }
            FieldEvent::FrameSync => self.sync(),
        }
    }

    /// Feed several updates, returning the last contact produced
    pub fn feed_all(&mut self, events: &[FieldEvent]) -> Option<Contact> {
        let mut last = None;
        for &event in events {
            if let Some(contact) = self.feed(event) {
                last = Some(contact);
            }
        }
        last
    }

    fn sync(&mut self) -> Option<Contact> {
        let released = core::mem::replace(&mut self.released, false);

        match (self.x, self.y) {
            (Some(x), Some(y)) => {
                let frame = TouchFrame {
                    x,
                    y,
                    tracking_id: self.tracking_id,
                    down: self.down,
                };
                if !self.down {
                    self.reset_coordinates();
                }
                Some(Contact::Frame(frame))
            }
            _ if released => Some(Contact::Released),
            _ => None,
        }
    }
}
