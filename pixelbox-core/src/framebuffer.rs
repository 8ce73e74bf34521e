//! Authoritative logical display state
//!
//! The framebuffer holds one color per grid cell plus a single undo
//! snapshot. Painting is eager: [`FrameBuffer::set_pixel`] flushes the
//! touched cell straight away. Bulk edits from the button strip only
//! touch the buffer and are pushed later with [`FrameBuffer::draw_all`].

use heapless::Vec;

use crate::color::Color;
use crate::config::{ConfigError, MAX_CELLS};
use crate::mapping::Cell;
use crate::render::Renderer;
use crate::traits::{PixelDriver, PixelError};

type Grid = Vec<Color, MAX_CELLS>;

/// Logical color grid with single-level undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: u16,
    cols: u16,
    cells: Grid,
    undo: Option<Grid>,
}

impl FrameBuffer {
    /// Create an all-black buffer
    pub fn new(rows: u16, cols: u16) -> Result<Self, ConfigError> {
        let len = rows as usize * cols as usize;
        if len == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let mut cells = Grid::new();
        cells
            .resize(len, Color::BLACK)
            .map_err(|_| ConfigError::GridTooLarge)?;
        Ok(Self {
            rows,
            cols,
            cells,
            undo: None,
        })
    }

    fn offset(&self, cell: Cell) -> Option<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    /// Color of a cell
    pub fn get(&self, cell: Cell) -> Option<Color> {
        self.offset(cell).map(|i| self.cells[i])
    }

    /// Set a cell in the buffer only
    ///
    /// Returns false if the cell is outside the grid.
    pub fn set(&mut self, cell: Cell, color: Color) -> bool {
        match self.offset(cell) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Set a cell and flush it immediately
    pub fn set_pixel<D: PixelDriver>(
        &mut self,
        cell: Cell,
        color: Color,
        renderer: &mut Renderer<D>,
    ) -> Result<(), PixelError> {
        if !self.set(cell, color) {
            return Err(PixelError::IndexOutOfRange);
        }
        renderer.flush_cell(cell, color)
    }

    /// Set every cell in the buffer only
    pub fn fill(&mut self, color: Color) {
        self.cells.iter_mut().for_each(|c| *c = color);
    }

    /// Blank every cell and flush immediately
    pub fn clear<D: PixelDriver>(&mut self, renderer: &mut Renderer<D>) -> Result<(), PixelError> {
        self.fill(Color::BLACK);
        self.draw_all(renderer)
    }

    /// Push the whole buffer with a single show
    pub fn draw_all<D: PixelDriver>(&self, renderer: &mut Renderer<D>) -> Result<(), PixelError> {
        renderer.flush_grid(&self.cells)
    }

    /// Capture the current buffer as the undo snapshot
    ///
    /// Replaces any earlier snapshot.
    pub fn snapshot(&mut self) {
        match &mut self.undo {
            Some(undo) => undo.clone_from(&self.cells),
            None => self.undo = Some(self.cells.clone()),
        }
    }

    /// Restore the undo snapshot into the buffer
    ///
    /// The snapshot is kept, so restoring twice is idempotent. Returns
    /// false if no snapshot has been taken yet.
    pub fn restore(&mut self) -> bool {
        match &self.undo {
            Some(undo) => {
                self.cells.clone_from(undo);
                true
            }
            None => false,
        }
    }

    /// Row-major view of the cells
    pub fn as_slice(&self) -> &[Color] {
        &self.cells
    }

    /// Iterate over `(cell, color)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Cell::new((i / cols) as u16, (i % cols) as u16), c))
    }

    /// Number of cells that are not black
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_off()).count()
    }
}
