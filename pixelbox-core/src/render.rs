//! Serpentine renderer
//!
//! The LED strip snakes through the grid: even rows run left to right,
//! odd rows run right to left. The renderer translates logical cells to
//! strip indices and owns the single point where the hardware changes
//! state, the driver's `show`.

use crate::color::Color;
use crate::mapping::Cell;
use crate::traits::{PixelDriver, PixelError};

/// Physical strip index of a logical cell
pub const fn serpentine_index(row: u16, col: u16, cols: u16) -> usize {
    let base = row as usize * cols as usize;
    if row % 2 == 0 {
        base + col as usize
    } else {
        base + (cols - 1 - col) as usize
    }
}

/// Writes logical cells to a pixel driver
pub struct Renderer<D> {
    driver: D,
    rows: u16,
    cols: u16,
    shows: u32,
}

impl<D: PixelDriver> Renderer<D> {
    /// Create a renderer for a `rows` x `cols` grid
    ///
    /// Fails if the strip is shorter than the grid.
    pub fn new(driver: D, rows: u16, cols: u16) -> Result<Self, PixelError> {
        if driver.len() < rows as usize * cols as usize {
            return Err(PixelError::StripTooShort);
        }
        Ok(Self {
            driver,
            rows,
            cols,
            shows: 0,
        })
    }

    /// Strip index of `cell`
    pub fn index_of(&self, cell: Cell) -> usize {
        serpentine_index(cell.row, cell.col, self.cols)
    }

    /// Stage one cell without showing it
    pub fn write_cell(&mut self, cell: Cell, color: Color) -> Result<(), PixelError> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(PixelError::IndexOutOfRange);
        }
        let index = self.index_of(cell);
        self.driver.write(index, color)
    }

    /// Stage one cell and show it
    pub fn flush_cell(&mut self, cell: Cell, color: Color) -> Result<(), PixelError> {
        self.write_cell(cell, color)?;
        self.show()
    }

    /// Stage a full row-major grid and show it once
    pub fn flush_grid(&mut self, cells: &[Color]) -> Result<(), PixelError> {
        let cols = self.cols as usize;
        for (i, &color) in cells.iter().enumerate() {
            let cell = Cell::new((i / cols) as u16, (i % cols) as u16);
            self.write_cell(cell, color)?;
        }
        self.show()
    }

    /// Show staged writes
    pub fn show(&mut self) -> Result<(), PixelError> {
        self.driver.show()?;
        self.shows = self.shows.wrapping_add(1);
        Ok(())
    }

    /// Number of `show` calls so far
    pub fn shows(&self) -> u32 {
        self.shows
    }

    /// Get access to the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get mutable access to the underlying driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the renderer and return the driver
    pub fn into_driver(self) -> D {
        self.driver
    }
}
