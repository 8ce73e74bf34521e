//! Painting engine
//!
//! [`Painter`] threads one field event at a time through the reader, the
//! region arbiter and the button controller, and applies the result to
//! the framebuffer. It owns the renderer, so every hardware update in the
//! system goes through here.

use core::fmt;

use pixelbox_protocol::{EventStreamReader, FieldEvent};

use crate::buttons::ButtonController;
use crate::color::Color;
use crate::config::{Action, ConfigError, PainterConfig};
use crate::framebuffer::FrameBuffer;
use crate::mapping::Cell;
use crate::render::Renderer;
use crate::state::{InteractionState, RegionArbiter, Transition};
use crate::traits::{PixelDriver, PixelError};

/// Errors constructing a painter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PainterError {
    /// Invalid geometry or button table
    Config(ConfigError),
    /// Strip does not fit the grid
    Pixel(PixelError),
}

impl From<ConfigError> for PainterError {
    fn from(e: ConfigError) -> Self {
        PainterError::Config(e)
    }
}

impl From<PixelError> for PainterError {
    fn from(e: PixelError) -> Self {
        PainterError::Pixel(e)
    }
}

impl fmt::Display for PainterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PainterError::Config(e) => write!(f, "config: {}", e),
            PainterError::Pixel(e) => write!(f, "strip: {}", e),
        }
    }
}

/// What a processed sample did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A new stroke began and painted its first cell
    StrokeStarted { cell: Cell, index: usize, color: Color },
    /// The stroke moved onto a new cell
    Painted { cell: Cell, index: usize, color: Color },
    /// The stroke is still on the last painted cell
    Unchanged,
    /// A button was selected and its action applied to the buffer
    ButtonSelected { button: u8, action: Action },
    /// The contact lifted; `committed` if batched edits were drawn
    Released { committed: bool },
    /// Nothing to do (strip touch outside every bucket, lift while idle)
    Ignored,
}

/// Touch painter over a pixel driver
pub struct Painter<D> {
    reader: EventStreamReader,
    arbiter: RegionArbiter,
    buttons: ButtonController,
    framebuffer: FrameBuffer,
    renderer: Renderer<D>,
}

impl<D: PixelDriver> Painter<D> {
    /// Create a painter; nothing is written until [`start`](Self::start)
    pub fn new(config: &PainterConfig, driver: D) -> Result<Self, PainterError> {
        config.validate()?;
        let grid = config.grid;
        let framebuffer = FrameBuffer::new(grid.rows, grid.cols)?;
        let renderer = Renderer::new(driver, grid.rows, grid.cols)?;

        Ok(Self {
            reader: EventStreamReader::new(),
            arbiter: RegionArbiter::new(grid),
            buttons: ButtonController::new(config),
            framebuffer,
            renderer,
        })
    }

    /// Blank the strip
    pub fn start(&mut self) -> Result<(), PixelError> {
        self.framebuffer.clear(&mut self.renderer)
    }

    /// Process one field update
    ///
    /// Returns `None` until a sync marker completes a sample.
    pub fn process(&mut self, event: FieldEvent) -> Result<Option<Outcome>, PixelError> {
        let Some(contact) = self.reader.feed(event) else {
            return Ok(None);
        };

        let outcome = match self.arbiter.on_contact(contact) {
            Transition::StrokeStarted { cell, commit } => {
                if commit {
                    self.framebuffer.draw_all(&mut self.renderer)?;
                }
                self.framebuffer.snapshot();
                self.buttons.mark_snapshot();
                let (index, color) = self.paint(cell)?;
                Outcome::StrokeStarted { cell, index, color }
            }
            Transition::StrokeMoved { cell } => {
                let (index, color) = self.paint(cell)?;
                Outcome::Painted { cell, index, color }
            }
            Transition::StrokeUnchanged => {
                self.reader.reset_coordinates();
                Outcome::Unchanged
            }
            Transition::ButtonPressed { y } => self.press(y, true),
            Transition::ButtonHeld { y } => self.press(y, false),
            Transition::Released { commit } => {
                if commit {
                    self.framebuffer.draw_all(&mut self.renderer)?;
                }
                Outcome::Released { committed: commit }
            }
            Transition::Idle => Outcome::Ignored,
        };

        Ok(Some(outcome))
    }

    /// Process a batch of field updates, returning the last outcome
    pub fn process_all<I>(&mut self, events: I) -> Result<Option<Outcome>, PixelError>
    where
        I: IntoIterator<Item = FieldEvent>,
    {
        let mut last = None;
        for event in events {
            if let Some(outcome) = self.process(event)? {
                last = Some(outcome);
            }
        }
        Ok(last)
    }

    /// Blank the buffer and the strip
    ///
    /// Called once on the way out; the caller decides what to do with a
    /// failure.
    pub fn shutdown(&mut self) -> Result<(), PixelError> {
        self.framebuffer.clear(&mut self.renderer)
    }

    fn paint(&mut self, cell: Cell) -> Result<(usize, Color), PixelError> {
        let color = self.buttons.selected_color();
        self.framebuffer
            .set_pixel(cell, color, &mut self.renderer)?;
        self.reader.reset_coordinates();
        Ok((self.renderer.index_of(cell), color))
    }

    fn press(&mut self, y: i32, fresh: bool) -> Outcome {
        match self.buttons.press_at(y, fresh, &mut self.framebuffer) {
            Some(selection) => Outcome::ButtonSelected {
                button: selection.button,
                action: selection.action,
            },
            None => Outcome::Ignored,
        }
    }

    /// Combined interaction state
    pub fn interaction(&self) -> InteractionState {
        InteractionState {
            touch_held: self.arbiter.touch_held(),
            button_held: self.arbiter.button_held(),
            selected_color: self.buttons.selected_color(),
            selected_button: self.buttons.selected_button(),
            prev_selected_button: self.buttons.prev_selected_button(),
            last_cell: self.arbiter.last_cell(),
        }
    }

    /// Logical grid
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Button strip
    pub fn buttons(&self) -> &ButtonController {
        &self.buttons
    }

    /// Renderer and driver
    pub fn renderer(&self) -> &Renderer<D> {
        &self.renderer
    }

    /// Mutable renderer, for diagnostics that drive the strip directly
    pub fn renderer_mut(&mut self) -> &mut Renderer<D> {
        &mut self.renderer
    }

    /// Consume the painter and return the driver
    pub fn into_driver(self) -> D {
        self.renderer.into_driver()
    }
}
