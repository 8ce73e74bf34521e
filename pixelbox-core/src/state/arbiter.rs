//! Canvas / button strip arbitration
//!
//! The panel delivers one coordinate stream for both the drawing surface
//! and the virtual button strip overlaid on its edge. The arbiter keeps
//! two mutually exclusive held flags and turns each contact into a
//! [`Transition`]:
//!
//! ```text
//!            canvas touch                       strip touch
//!   idle ───────────────────► touch_held ◄──────────────────┐
//!    │  ▲                        │   ▲                      │
//!    │  └──────── release ───────┘   │ canvas touch         │
//!    │                               │ (commit)             │
//!    │  strip touch                  ▼                      │
//!    └────────────────────────► button_held ────────────────┘
//!                                   │
//!                         release (commit)
//! ```

use pixelbox_protocol::{Contact, TouchFrame};

use crate::config::{GridGeometry, StripSide};
use crate::mapping::{self, Cell};

/// Which part of the panel a touch landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Drawing surface, with coordinates relative to the canvas origin
    Canvas { x: i32, y: i32 },
    /// Virtual button strip
    Buttons { y: i32 },
}

/// Region thresholds, computed once from the geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionLayout {
    side: StripSide,
    threshold: i32,
}

impl RegionLayout {
    /// Derive thresholds from the geometry
    pub fn new(geometry: &GridGeometry) -> Self {
        let threshold = match geometry.button_strip_side {
            StripSide::Left => geometry.button_strip_width,
            StripSide::Right => geometry.touch_width,
        };
        Self {
            side: geometry.button_strip_side,
            threshold,
        }
    }

    /// Classify a raw touch
    ///
    /// With the strip on the right, `x <= touch_width` is canvas. With the
    /// strip on the left, `x < button_strip_width` is strip and canvas
    /// coordinates are shifted by the strip width.
    pub fn classify(&self, x: i32, y: i32) -> Region {
        match self.side {
            StripSide::Right if x <= self.threshold => Region::Canvas { x, y },
            StripSide::Right => Region::Buttons { y },
            StripSide::Left if x < self.threshold => Region::Buttons { y },
            StripSide::Left => Region::Canvas {
                x: x - self.threshold,
                y,
            },
        }
    }
}

/// Result of feeding one contact to the arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Canvas became held: snapshot, then paint `cell`
    ///
    /// `commit` is set when the button strip was held and its batched
    /// edits must be drawn first.
    StrokeStarted { cell: Cell, commit: bool },
    /// Stroke moved onto a new cell
    StrokeMoved { cell: Cell },
    /// Stroke is still on the last painted cell
    StrokeUnchanged,
    /// Button strip became held
    ButtonPressed { y: i32 },
    /// Contact is still on the button strip
    ButtonHeld { y: i32 },
    /// Contact lifted; `commit` if the button strip was held
    Released { commit: bool },
    /// Lift with nothing held
    Idle,
}

/// Held-state machine over the two regions
#[derive(Debug, Clone)]
pub struct RegionArbiter {
    geometry: GridGeometry,
    layout: RegionLayout,
    touch_held: bool,
    button_held: bool,
    last_cell: Option<Cell>,
}

impl RegionArbiter {
    /// Create an idle arbiter
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            layout: RegionLayout::new(&geometry),
            geometry,
            touch_held: false,
            button_held: false,
            last_cell: None,
        }
    }

    /// Canvas is held
    pub fn touch_held(&self) -> bool {
        self.touch_held
    }

    /// Button strip is held
    pub fn button_held(&self) -> bool {
        self.button_held
    }

    /// Last painted cell of the current stroke
    pub fn last_cell(&self) -> Option<Cell> {
        self.last_cell
    }

    /// Process one reader output
    pub fn on_contact(&mut self, contact: Contact) -> Transition {
        match contact {
            Contact::Frame(frame) if frame.down => self.on_frame(frame),
            Contact::Frame(_) | Contact::Released => self.release(),
        }
    }

    fn on_frame(&mut self, frame: TouchFrame) -> Transition {
        match self.layout.classify(frame.x, frame.y) {
            Region::Canvas { x, y } => self.on_canvas(mapping::map(x, y, &self.geometry)),
            Region::Buttons { y } => self.on_buttons(y),
        }
    }

    fn on_canvas(&mut self, cell: Cell) -> Transition {
        if !self.touch_held {
            let commit = core::mem::replace(&mut self.button_held, false);
            self.touch_held = true;
            self.last_cell = Some(cell);
            return Transition::StrokeStarted { cell, commit };
        }

        if self.last_cell == Some(cell) {
            Transition::StrokeUnchanged
        } else {
            self.last_cell = Some(cell);
            Transition::StrokeMoved { cell }
        }
    }

    fn on_buttons(&mut self, y: i32) -> Transition {
        if self.button_held {
            return Transition::ButtonHeld { y };
        }

        self.touch_held = false;
        self.last_cell = None;
        self.button_held = true;
        Transition::ButtonPressed { y }
    }

    fn release(&mut self) -> Transition {
        let was_touch = core::mem::replace(&mut self.touch_held, false);
        let was_button = core::mem::replace(&mut self.button_held, false);
        self.last_cell = None;

        if was_touch || was_button {
            Transition::Released { commit: was_button }
        } else {
            Transition::Idle
        }
    }
}
